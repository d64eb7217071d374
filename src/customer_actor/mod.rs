//! # Customer Actor
//!
//! Customers are short-lived: one task per visit, spawned by the
//! [`CustomerGenerator`] while the simulation is active.
//!
//! ## Structure
//!
//! - [`customer`] - a single visit ([`Customer`], [`CustomerReport`])
//! - [`generator`] - the arrival loop ([`CustomerGenerator`], [`GeneratorReport`])
//! - [`error`] - [`CustomerError`]
//! - [`new()`] - factory that builds the generator from the shared context
//!
//! ## A visit
//!
//! 1. Draw a patience and a number of order lines in `1..=max_purchase_items`.
//! 2. Send each order line as a request, pausing [`ITEM_PAUSE`] in between.
//! 3. Sleep for the whole patience.
//! 4. Under the ledger lock: count the customer as frustrated and, with
//!    `complaint_probability`, re-send the last order line as a complaint.
//!
//! ```rust,ignore
//! let generator = customer_actor::new(&ctx);
//! let handle = spawn_actor(generator);
//! ctx.ledger.stop();
//! let report = handle.await??; // waits for every customer still inside
//! ```

pub mod customer;
pub mod error;
pub mod generator;

pub use customer::*;
pub use error::*;
pub use generator::*;

use crate::framework::FloorContext;

/// RNG stream of the generator; customers are seeded from it in turn.
const GENERATOR_STREAM: u64 = 0;

/// Creates the customer generator wired to the shared ledger and queue.
pub fn new(ctx: &FloorContext) -> CustomerGenerator {
    CustomerGenerator::new(ctx.clone(), ctx.rng_for(GENERATOR_STREAM))
}
