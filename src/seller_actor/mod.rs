//! # Seller Actor
//!
//! Sellers stand behind the counter for the whole run. Each one polls the
//! shared queue, settles requests against the ledger and replies.
//!
//! ## Structure
//!
//! - [`sale`] - availability check, pricing and the ledger update for one request
//! - [`seller`] - the [`Seller`] polling loop and its [`SellerReport`]
//! - [`error`] - [`SellerError`]
//! - [`new()`] - factory that builds a seller from the shared context
//!
//! ## One iteration
//!
//! 1. Non-blocking take from the queue; on an empty queue wait [`IDLE_BACKOFF`] and retry.
//! 2. Lock the ledger, sell or record a missing item, unlock.
//! 3. Post a [`SaleResponse`](crate::framework::SaleResponse). No customer reads it.
//! 4. Take one more message straight away. A complaint is counted and handled
//!    (1-3 s, outside the lock); anything else is dropped.
//!
//! The loop exits the first time the ledger reports the simulation inactive,
//! after finishing the message in hand.

pub mod error;
pub mod sale;
pub mod seller;

pub use error::*;
pub use sale::*;
pub use seller::*;

use crate::framework::FloorContext;
use crate::model::SellerId;

/// RNG streams for sellers start here so they never collide with customers'.
const SELLER_STREAM_BASE: u64 = 1 << 32;

/// Creates seller `id` wired to the shared ledger and queue.
pub fn new(id: SellerId, ctx: &FloorContext) -> Seller {
    let rng = ctx.rng_for(SELLER_STREAM_BASE + u64::from(id.0));
    Seller::new(id, ctx.clone(), rng)
}
