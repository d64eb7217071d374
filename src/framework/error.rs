//! # Floor Errors
//!
//! Failures of the shared coordination machinery. Business outcomes such as a
//! missing item or a complaint are never errors; they are ledger counters.

/// Errors raised by the ledger lock or the request channel.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum FloorError {
    /// A previous holder panicked mid-update, so the ledger may be half-written.
    #[error("Ledger lock poisoned")]
    LedgerPoisoned,
    #[error("Request channel closed")]
    ChannelClosed,
}

impl FloorError {
    /// Fatal errors end the actor that hit them; the rest only lose one message.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FloorError::LedgerPoisoned)
    }
}
