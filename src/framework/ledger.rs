//! # Shared Ledger
//!
//! The one piece of mutable state shared by every actor on the floor: what has
//! been baked, what has been sold, and the running customer statistics.
//!
//! ## Locking discipline
//!
//! - Every counter lives inside a [`Mutex`] and is only touched through the
//!   guard returned by [`Ledger::acquire`]. Dropping the guard releases it.
//! - The guard is a `std` guard and is never held across an `.await`; critical
//!   sections are plain synchronous read-check-write blocks.
//! - `simulation_active` sits outside the lock as an [`AtomicBool`]. Actors poll
//!   it with a relaxed load; a stale read only delays shutdown.
//!
//! A poisoned lock means some holder panicked halfway through an update. The
//! ledger can no longer be trusted, so acquisition returns
//! [`FloorError::LedgerPoisoned`] and the caller is expected to stop.

use crate::framework::FloorError;
use crate::model::{ProductType, PRODUCT_TYPE_COUNT};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, error, info};

/// How often [`Ledger::stopped`] re-checks the active flag.
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Production, sales and customer statistics for one simulation run.
///
/// Counters only ever grow, and `sold_items[t] <= produced_items[t]` holds for
/// every product whenever the status is observed under the lock.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductionStatus {
    pub produced_items: [u64; PRODUCT_TYPE_COUNT],
    pub sold_items: [u64; PRODUCT_TYPE_COUNT],
    pub frustrated_customers: u64,
    pub complained_customers: u64,
    /// Complaints a seller has taken off the channel and dealt with.
    pub complaints_handled: u64,
    pub missing_items_requests: u64,
    pub total_profit: f64,
}

impl ProductionStatus {
    /// Units of `product` on the shelf right now.
    pub fn available(&self, product: ProductType) -> u64 {
        let i = product.index();
        self.produced_items[i].saturating_sub(self.sold_items[i])
    }

    pub fn total_produced(&self) -> u64 {
        self.produced_items.iter().sum()
    }

    pub fn total_sold(&self) -> u64 {
        self.sold_items.iter().sum()
    }
}

/// Guard over the ledger's counters. Release happens on drop.
pub type LedgerGuard<'a> = MutexGuard<'a, ProductionStatus>;

/// The shared ledger: an active flag plus the lock-guarded [`ProductionStatus`].
///
/// Created once before any actor starts and shared behind an `Arc`.
#[derive(Debug)]
pub struct Ledger {
    active: AtomicBool,
    status: Mutex<ProductionStatus>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// An empty, active ledger.
    pub fn new() -> Self {
        Self::with_status(ProductionStatus::default())
    }

    /// An active ledger starting from an existing backlog.
    pub fn with_status(status: ProductionStatus) -> Self {
        Self {
            active: AtomicBool::new(true),
            status: Mutex::new(status),
        }
    }

    /// Lock-free liveness poll.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    /// Ends the simulation. Returns `true` if this call did the flip.
    pub fn stop(&self) -> bool {
        let was_active = self.active.swap(false, Ordering::Relaxed);
        if was_active {
            info!("Simulation stopped");
        }
        was_active
    }

    /// Resolves once `simulation_active` has been observed false.
    pub async fn stopped(&self) {
        while self.is_active() {
            tokio::time::sleep(STOP_POLL_INTERVAL).await;
        }
    }

    /// Blocks until the caller holds exclusive access to the counters.
    ///
    /// No reentrancy: acquiring twice from the same task deadlocks.
    pub fn acquire(&self) -> Result<LedgerGuard<'_>, FloorError> {
        self.status.lock().map_err(|_| {
            error!("Ledger lock poisoned");
            FloorError::LedgerPoisoned
        })
    }

    /// Copy of the counters taken under the lock.
    pub fn snapshot(&self) -> Result<ProductionStatus, FloorError> {
        Ok(self.acquire()?.clone())
    }

    /// Adds freshly baked units. Only the production side calls this.
    pub fn record_production(&self, product: ProductType, amount: u64) -> Result<(), FloorError> {
        let mut status = self.acquire()?;
        status.produced_items[product.index()] += amount;
        debug!(%product, amount, on_shelf = status.available(product), "Production recorded");
        Ok(())
    }
}
