use std::fmt::Display;

/// Errors surfaced by every repository implementation, regardless of backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Insufficient seats: requested {requested}, available {available}")]
    SeatConflict {
        requested: i32,
        available: i32,
    },

    #[error("Duplicate value for {field}")]
    Duplicate {
        field: &'static str,
    },

    #[error("Storage backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(err: impl Display) -> Self {
        StoreError::Backend(err.to_string())
    }
}
