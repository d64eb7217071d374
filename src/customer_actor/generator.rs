use super::{Customer, CustomerError, CustomerReport};
use crate::framework::{spawn_actor_in, FloorActor, FloorContext};
use crate::model::CustomerId;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::task::{JoinError, JoinSet};
use tracing::{error, info};

type CustomerResult = Result<CustomerReport, CustomerError>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratorReport {
    pub spawned: u64,
    pub completed: u64,
    pub complained: u64,
    /// Customers that returned an error or panicked.
    pub failed: u64,
}

impl GeneratorReport {
    /// Tallies one finished customer. Hands back the error if it was fatal.
    fn record(&mut self, result: Result<CustomerResult, JoinError>) -> Option<CustomerError> {
        match result {
            Ok(Ok(report)) => {
                self.completed += 1;
                if report.complained {
                    self.complained += 1;
                }
                None
            }
            Ok(Err(e)) => {
                self.failed += 1;
                error!(error = %e, "Customer failed");
                e.is_fatal().then_some(e)
            }
            Err(e) => {
                self.failed += 1;
                error!(error = %e, "Customer task panicked");
                None
            }
        }
    }
}

/// Spawns customers at random intervals while the floor is open.
///
/// Every customer runs as its own task in a [`JoinSet`]. Once arrivals stop,
/// the generator waits for the customers still inside before returning, so no
/// customer outlives it.
pub struct CustomerGenerator {
    ctx: FloorContext,
    rng: StdRng,
    next_id: u64,
}

impl CustomerGenerator {
    pub fn new(ctx: FloorContext, rng: StdRng) -> Self {
        Self { ctx, rng, next_id: 0 }
    }

    fn spawn_customer(&mut self, customers: &mut JoinSet<CustomerResult>) -> CustomerId {
        let id = CustomerId(self.next_id);
        self.next_id += 1;
        let rng = StdRng::seed_from_u64(self.rng.gen());
        spawn_actor_in(customers, Customer::new(id, self.ctx.clone(), rng));
        id
    }

    fn draw_arrival_gap(&mut self) -> Duration {
        let params = &self.ctx.config.customer_params;
        Duration::from_secs(self.rng.gen_range(params.min_arrival_secs..=params.max_arrival_secs))
    }
}

#[async_trait]
impl FloorActor for CustomerGenerator {
    type Report = GeneratorReport;
    type Error = CustomerError;
    const ROLE: &'static str = "generator";

    fn label(&self) -> String {
        "customer_generator".to_string()
    }

    async fn run(mut self) -> Result<GeneratorReport, CustomerError> {
        info!("Customer generator started");
        let mut customers = JoinSet::new();
        let mut report = GeneratorReport::default();
        let mut halted = None;

        while self.ctx.ledger.is_active() {
            let id = self.spawn_customer(&mut customers);
            report.spawned += 1;
            info!(customer_id = %id, "Generated customer");

            while let Some(result) = customers.try_join_next() {
                if let Some(e) = report.record(result) {
                    halted.get_or_insert(e);
                }
            }
            if let Some(e) = &halted {
                error!(error = %e, "Customer arrivals halted");
                break;
            }

            let gap = self.draw_arrival_gap();
            tokio::time::sleep(gap).await;
        }

        info!(in_flight = customers.len(), "Customer generator stopping");
        while let Some(result) = customers.join_next().await {
            if let Some(e) = report.record(result) {
                halted.get_or_insert(e);
            }
        }
        info!(
            spawned = report.spawned,
            completed = report.completed,
            failed = report.failed,
            "Customer generator terminating"
        );

        match halted {
            Some(e) => Err(e),
            None => Ok(report),
        }
    }
}
