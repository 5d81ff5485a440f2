pub mod movie;
pub mod repository;
pub mod screening;
pub mod snack;

pub use movie::Movie;
pub use repository::{CatalogRepository, SnackRepository};
pub use screening::Screening;
pub use snack::{Snack, SnackCategory};
