//! Error types for customers and the generator that spawns them.

use crate::framework::FloorError;
use thiserror::Error;

/// Errors that end a customer's visit, or halt arrivals altogether.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CustomerError {
    /// The ledger can no longer be locked safely.
    #[error("Ledger unavailable: {0}")]
    Ledger(#[from] FloorError),
}

impl CustomerError {
    pub fn is_fatal(&self) -> bool {
        match self {
            CustomerError::Ledger(e) => e.is_fatal(),
        }
    }
}
