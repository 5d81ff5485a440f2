pub mod app_config;
pub mod booking_repo;
pub mod catalog_repo;
pub mod database;
pub mod memory;
pub mod seed;
pub mod session_repo;
pub mod user_repo;

pub use database::PgStore;
pub use memory::MemoryStore;

pub(crate) fn db_error(err: sqlx::Error) -> cinebook_core::StoreError {
    cinebook_core::StoreError::Backend(err.to_string())
}
