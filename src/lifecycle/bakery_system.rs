use super::monitor::{Monitor, StopReason, MONITOR_INTERVAL};
use crate::customer_actor::{self, CustomerError, CustomerGenerator, GeneratorReport};
use crate::framework::{spawn_actor, ActorHandle, FloorContext, FloorError, Ledger, ProductionStatus};
use crate::model::{BakeryConfig, ConfigError, SellerId};
use crate::production::{self, Oven, OvenReport};
use crate::seller_actor::{self, Seller, SellerError, SellerReport};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinError;
use tokio::time::Instant;
use tracing::{error, info};

/// Errors surfaced while starting or tearing down the whole floor.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Seller failed: {0}")]
    Seller(#[from] SellerError),

    #[error("Customers failed: {0}")]
    Customer(#[from] CustomerError),

    #[error("Floor failure: {0}")]
    Floor(#[from] FloorError),

    #[error("Actor task failed: {0}")]
    TaskFailed(String),
}

/// Everything that happened during one run, gathered at shutdown.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub stop_reason: StopReason,
    pub elapsed: Duration,
    pub status: ProductionStatus,
    pub sellers: Vec<SellerReport>,
    pub customers: GeneratorReport,
    pub oven: OvenReport,
}

impl SimulationReport {
    /// Sales made across all sellers.
    pub fn customers_served(&self) -> u64 {
        self.sellers.iter().map(|s| s.customers_served).sum()
    }

    pub fn log_summary(&self) {
        let status = &self.status;
        info!(
            reason = %self.stop_reason,
            elapsed_secs = self.elapsed.as_secs(),
            customers = self.customers.spawned,
            served = self.customers_served(),
            frustrated = status.frustrated_customers,
            complained = status.complained_customers,
            complaints_handled = status.complaints_handled,
            missing = status.missing_items_requests,
            profit = %format!("{:.2}", status.total_profit),
            "Simulation finished"
        );
        for seller in &self.sellers {
            info!(
                seller_id = %seller.seller_id,
                served = seller.customers_served,
                out_of_stock = seller.out_of_stock,
                complaints = seller.complaints_handled,
                dropped = seller.messages_dropped,
                "Seller shift"
            );
        }
    }
}

/// The main orchestrator for the sales floor.
///
/// `BakerySystem` is responsible for:
/// - **Shared state**: creating the ledger and the request queue before any actor starts
/// - **Lifecycle**: spawning sellers, the customer generator, the oven and the monitor
/// - **Teardown**: flipping the active flag and awaiting every task, so nothing
///   outlives the ledger it points to
///
/// # Example
///
/// ```ignore
/// let system = BakerySystem::start(BakeryConfig::default())?;
/// let report = system.run_until(async { let _ = tokio::signal::ctrl_c().await; }).await?;
/// report.log_summary();
/// ```
pub struct BakerySystem {
    ctx: FloorContext,
    sellers: Vec<ActorHandle<Seller>>,
    generator: ActorHandle<CustomerGenerator>,
    oven: ActorHandle<Oven>,
    monitor: ActorHandle<Monitor>,
    started: Instant,
}

impl BakerySystem {
    /// Validates `config` and opens the floor with empty shelves.
    pub fn start(config: BakeryConfig) -> Result<Self, SystemError> {
        Self::start_with_backlog(config, ProductionStatus::default())
    }

    /// Opens the floor with `backlog` already on the ledger.
    pub fn start_with_backlog(config: BakeryConfig, backlog: ProductionStatus) -> Result<Self, SystemError> {
        config.validate()?;
        let num_sellers = config.num_sellers;
        let ctx = FloorContext::with_ledger(config, Ledger::with_status(backlog));

        // Sellers and the oven first, so the first customer finds someone behind the counter.
        let sellers = (1..=num_sellers)
            .map(|i| spawn_actor(seller_actor::new(SellerId(i as u32), &ctx)))
            .collect();
        let oven = spawn_actor(production::new(&ctx));
        let generator = spawn_actor(customer_actor::new(&ctx));
        let monitor = spawn_actor(Monitor::new(ctx.clone(), MONITOR_INTERVAL));

        info!(sellers = num_sellers, seed = ?ctx.config.seed, "Bakery open");
        Ok(Self {
            ctx,
            sellers,
            generator,
            oven,
            monitor,
            started: Instant::now(),
        })
    }

    pub fn context(&self) -> &FloorContext {
        &self.ctx
    }

    /// Read-only view of the ledger, taken under the lock.
    pub fn snapshot(&self) -> Result<ProductionStatus, FloorError> {
        self.ctx.ledger.snapshot()
    }

    /// Flips the active flag; actors exit at their next poll.
    pub fn stop(&self) -> bool {
        self.ctx.ledger.stop()
    }

    /// Runs until a limit closes the floor or `signal` resolves, then shuts down.
    pub async fn run_until<F>(self, signal: F) -> Result<SimulationReport, SystemError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            _ = signal => info!("Stop requested"),
            _ = self.ctx.ledger.stopped() => {}
        }
        self.shutdown().await
    }

    /// Stops the simulation and waits for every actor to finish its current work.
    ///
    /// All tasks are awaited even when one of them failed; the first failure
    /// is returned after teardown completes.
    pub async fn shutdown(self) -> Result<SimulationReport, SystemError> {
        self.ctx.ledger.stop();
        info!("Shutting down floor...");

        let mut first_error = None;
        let stop_reason = collect(self.monitor.await, &mut first_error).unwrap_or(StopReason::Requested);
        let customers = collect(self.generator.await, &mut first_error).unwrap_or_default();
        let mut sellers = Vec::with_capacity(self.sellers.len());
        for handle in self.sellers {
            if let Some(report) = collect(handle.await, &mut first_error) {
                sellers.push(report);
            }
        }
        let oven = collect(self.oven.await, &mut first_error).unwrap_or_default();

        if let Some(e) = first_error {
            return Err(e);
        }

        let status = self.ctx.ledger.snapshot()?;
        info!("Floor shutdown complete.");
        Ok(SimulationReport {
            stop_reason,
            elapsed: self.started.elapsed(),
            status,
            sellers,
            customers,
            oven,
        })
    }
}

/// Unwraps one joined actor, remembering the first failure.
fn collect<R, E>(joined: Result<Result<R, E>, JoinError>, first_error: &mut Option<SystemError>) -> Option<R>
where
    E: Into<SystemError>,
{
    match joined {
        Ok(Ok(report)) => Some(report),
        Ok(Err(e)) => {
            let e: SystemError = e.into();
            error!(error = %e, "Actor failed");
            first_error.get_or_insert(e);
            None
        }
        Err(e) => {
            error!(error = %e, "Actor task failed");
            first_error.get_or_insert(SystemError::TaskFailed(e.to_string()));
            None
        }
    }
}
