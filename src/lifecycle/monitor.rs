//! # Floor Monitor
//!
//! A read-only observer of the ledger. Every interval it takes a snapshot under
//! the lock, logs it, and ends the simulation once a configured limit is hit.
//! It never writes a counter; its only write is flipping the active flag.

use crate::framework::{FloorActor, FloorContext, FloorError, ProductionStatus};
use crate::model::{ProductType, SimulationLimits};
use async_trait::async_trait;
use std::fmt::Display;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

/// Default time between two snapshots.
pub const MONITOR_INTERVAL: Duration = Duration::from_secs(1);

/// Why the simulation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    RuntimeElapsed,
    FrustrationLimit,
    ComplaintLimit,
    MissingItemsLimit,
    ProfitTarget,
    /// Stopped from outside: Ctrl-C, a test, or an explicit `stop()`.
    Requested,
}

impl Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            StopReason::RuntimeElapsed => "maximum runtime elapsed",
            StopReason::FrustrationLimit => "too many frustrated customers",
            StopReason::ComplaintLimit => "too many complaints",
            StopReason::MissingItemsLimit => "too many missing-item requests",
            StopReason::ProfitTarget => "profit target reached",
            StopReason::Requested => "stop requested",
        };
        f.write_str(reason)
    }
}

/// First limit `status` has reached, if any. Unset limits never trip.
pub fn check_limits(limits: &SimulationLimits, status: &ProductionStatus, elapsed: Duration) -> Option<StopReason> {
    if limits.max_runtime_secs.is_some_and(|max| elapsed >= Duration::from_secs(max)) {
        return Some(StopReason::RuntimeElapsed);
    }
    if limits.max_frustrated_customers.is_some_and(|max| status.frustrated_customers >= max) {
        return Some(StopReason::FrustrationLimit);
    }
    if limits.max_complained_customers.is_some_and(|max| status.complained_customers >= max) {
        return Some(StopReason::ComplaintLimit);
    }
    if limits.max_missing_items_requests.is_some_and(|max| status.missing_items_requests >= max) {
        return Some(StopReason::MissingItemsLimit);
    }
    if limits.profit_target.is_some_and(|target| status.total_profit >= target) {
        return Some(StopReason::ProfitTarget);
    }
    None
}

pub struct Monitor {
    ctx: FloorContext,
    interval: Duration,
}

impl Monitor {
    pub fn new(ctx: FloorContext, interval: Duration) -> Self {
        Self { ctx, interval }
    }

    fn log_snapshot(&self, status: &ProductionStatus, elapsed: Duration) {
        info!(
            elapsed_secs = elapsed.as_secs(),
            produced = status.total_produced(),
            sold = status.total_sold(),
            profit = status.total_profit,
            frustrated = status.frustrated_customers,
            complained = status.complained_customers,
            missing = status.missing_items_requests,
            queued = self.ctx.channel.len(),
            "Floor status"
        );
        for product in ProductType::ALL {
            let i = product.index();
            debug!(%product, produced = status.produced_items[i], sold = status.sold_items[i], "Shelf");
        }
    }
}

#[async_trait]
impl FloorActor for Monitor {
    type Report = StopReason;
    type Error = FloorError;
    const ROLE: &'static str = "monitor";

    fn label(&self) -> String {
        "monitor".to_string()
    }

    async fn run(self) -> Result<StopReason, FloorError> {
        let started = Instant::now();
        loop {
            tokio::time::sleep(self.interval).await;
            if !self.ctx.ledger.is_active() {
                return Ok(StopReason::Requested);
            }

            let status = self.ctx.ledger.snapshot()?;
            let elapsed = started.elapsed();
            self.log_snapshot(&status, elapsed);

            if let Some(reason) = check_limits(&self.ctx.config.limits, &status, elapsed) {
                info!(%reason, "Limit reached, closing the floor");
                self.ctx.ledger.stop();
                return Ok(reason);
            }
        }
    }
}
