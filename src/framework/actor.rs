//! # Floor Actors
//!
//! Every participant on the sales floor (customers, sellers, the generator,
//! the oven, the monitor) is a self-contained task. This module defines the
//! trait they share and the helpers that spawn them inside a tracing span.

use async_trait::async_trait;
use std::fmt::Debug;
use tokio::task::{JoinHandle, JoinSet};
use tracing::Instrument;

/// An independent unit of concurrency on the floor.
///
/// Actors own their per-task state (RNG, local counters) and reach shared state
/// only through the [`Ledger`](crate::framework::Ledger) and the
/// [`RequestChannel`](crate::framework::RequestChannel) they were built with.
/// `run` consumes the actor; long-lived actors loop until the ledger reports
/// the simulation inactive, short-lived ones return after a single visit.
#[async_trait]
pub trait FloorActor: Send + 'static {
    /// Summary handed back when the actor exits cleanly.
    type Report: Send + Debug + 'static;

    type Error: std::error::Error + Send + Sync + 'static;

    /// Role used as the span name, e.g. `"seller"`.
    const ROLE: &'static str;

    /// Instance label recorded on the span, e.g. `seller_2`.
    fn label(&self) -> String;

    async fn run(self) -> Result<Self::Report, Self::Error>;
}

/// Handle to a spawned actor.
pub type ActorHandle<A> = JoinHandle<Result<<A as FloorActor>::Report, <A as FloorActor>::Error>>;

/// Spawns `actor` on the current runtime inside an `actor` span.
pub fn spawn_actor<A: FloorActor>(actor: A) -> ActorHandle<A> {
    let span = tracing::info_span!("actor", role = A::ROLE, id = %actor.label());
    tokio::spawn(actor.run().instrument(span))
}

/// Like [`spawn_actor`], but tracks the task in `set`.
pub fn spawn_actor_in<A: FloorActor>(set: &mut JoinSet<Result<A::Report, A::Error>>, actor: A) {
    let span = tracing::info_span!("actor", role = A::ROLE, id = %actor.label());
    set.spawn(actor.run().instrument(span));
}
