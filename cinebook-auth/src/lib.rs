pub mod credentials;
pub mod repository;
pub mod service;
pub mod session;
pub mod user;
pub mod validation;

pub use repository::{SessionRepository, UserRepository};
pub use service::{AuthError, Authenticator, RegisterRequest};
pub use session::{Session, SessionManager};
pub use user::{Admin, AdminRole, User};
