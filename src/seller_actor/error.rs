//! Error types for the Seller actor.

use crate::framework::FloorError;
use thiserror::Error;

/// Errors that end a seller's shift early.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SellerError {
    /// The ledger can no longer be locked safely.
    #[error("Ledger unavailable: {0}")]
    Ledger(#[from] FloorError),
}
