//! # Bakery Floor
//!
//! A simulation of a bakery's sales floor. Customers arrive at random, place
//! orders, wait out their patience and sometimes complain; sellers poll a
//! shared queue and settle orders against a shared ledger.
//!
//! ## Concurrency Model
//!
//! - Every participant is a Tokio task implementing [`FloorActor`](framework::FloorActor).
//! - The only shared mutable state is the [`Ledger`](framework::Ledger). Its
//!   counters are touched under one mutex, held for a read-check-write and
//!   never across an `.await`.
//! - `simulation_active` is polled lock-free; clearing it is the sole
//!   termination signal.
//! - Messages travel over one multi-producer multi-consumer
//!   [`RequestChannel`](framework::RequestChannel), tagged as request,
//!   response or complaint.
//!
//! ## Module Tour
//!
//! - [`framework`] - ledger, channel, actor trait, shared context, errors
//! - [`model`] - products, item requests, [`BakeryConfig`](model::BakeryConfig)
//! - [`customer_actor`] - the generator and one-visit customers
//! - [`seller_actor`] - the sellers and the sale/pricing rules
//! - [`production`] - the oven restocking the shelves
//! - [`lifecycle`] - [`BakerySystem`](lifecycle::BakerySystem), the monitor, tracing setup
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run -- --config bakery.toml --sellers 4 --duration 120
//! cargo test
//! ```

pub mod customer_actor;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod production;
pub mod seller_actor;
