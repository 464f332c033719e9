//! Error types for the frame server core.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BisouError {
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("Invalid button index {index} for step {step}")]
    InvalidButton { step: &'static str, index: u8 },

    #[error("Store lock poisoned")]
    LockPoisoned,

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
