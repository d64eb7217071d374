//! Coordination core shared by every actor on the floor.
//!
//! # Main Components
//!
//! - [`Ledger`] - production/sales counters behind a mutex, plus the lock-free active flag
//! - [`RequestChannel`] - the multi-producer multi-consumer queue carrying [`FloorMsg`]s
//! - [`FloorContext`] - config, ledger and queue handles injected into every actor
//! - [`FloorActor`] - trait implemented by customers, sellers and the support tasks
//! - [`FloorError`] - failures of the lock or the queue

pub mod actor;
pub mod channel;
pub mod context;
pub mod error;
pub mod ledger;

pub use actor::*;
pub use channel::*;
pub use context::*;
pub use error::*;
pub use ledger::*;
