pub mod engine;
pub mod models;
pub mod repository;

pub use engine::{BookingEngine, BookingError, BookingRules};
pub use models::{Booking, BookingReceipt, BookingRequest, BookingSnack, BookingStatus, SnackSelection};
pub use repository::BookingStore;
