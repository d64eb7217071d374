//! # Production Feed
//!
//! The oven is the upstream writer of `produced_items`. It is not part of the
//! customer/seller exchange: it only restocks the shelves on a fixed cadence so
//! sellers have something to sell.

use crate::framework::{FloorActor, FloorContext, FloorError};
use crate::model::ProductType;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info};

/// RNG stream of the oven.
const OVEN_STREAM: u64 = 1 << 40;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OvenReport {
    pub batches: u64,
    pub items_baked: u64,
}

/// Adds a random batch of every product each `production.interval_secs`.
pub struct Oven {
    ctx: FloorContext,
    rng: StdRng,
}

impl Oven {
    pub fn new(ctx: FloorContext, rng: StdRng) -> Self {
        Self { ctx, rng }
    }

    fn bake_batch(&mut self) -> Result<u64, FloorError> {
        let params = &self.ctx.config.production;
        let mut baked = 0;
        for product in ProductType::ALL {
            let amount = u64::from(self.rng.gen_range(params.min_batch..=params.max_batch));
            if amount > 0 {
                self.ctx.ledger.record_production(product, amount)?;
                baked += amount;
            }
        }
        Ok(baked)
    }
}

#[async_trait]
impl FloorActor for Oven {
    type Report = OvenReport;
    type Error = FloorError;
    const ROLE: &'static str = "oven";

    fn label(&self) -> String {
        "oven".to_string()
    }

    async fn run(mut self) -> Result<OvenReport, FloorError> {
        let interval = Duration::from_secs(self.ctx.config.production.interval_secs);
        info!(interval_secs = interval.as_secs(), "Oven started");
        let mut report = OvenReport::default();

        while self.ctx.ledger.is_active() {
            let baked = self.bake_batch()?;
            report.batches += 1;
            report.items_baked += baked;
            debug!(baked, "Batch out of the oven");
            tokio::time::sleep(interval).await;
        }

        info!(batches = report.batches, items_baked = report.items_baked, "Oven terminating");
        Ok(report)
    }
}

/// Creates the oven wired to the shared ledger.
pub fn new(ctx: &FloorContext) -> Oven {
    Oven::new(ctx.clone(), ctx.rng_for(OVEN_STREAM))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::spawn_actor;
    use crate::model::{BakeryConfig, ProductionParams};

    #[tokio::test(start_paused = true)]
    async fn fixed_batches_accumulate_until_stop() {
        let config = BakeryConfig {
            production: ProductionParams {
                interval_secs: 1,
                min_batch: 2,
                max_batch: 2,
            },
            seed: Some(1),
            ..BakeryConfig::default()
        };
        let ctx = FloorContext::new(config);
        let handle = spawn_actor(new(&ctx));

        // Batches land at t = 0, 1, 2; the stop at 2.5 s is seen at t = 3.
        tokio::time::sleep(Duration::from_millis(2_500)).await;
        ctx.ledger.stop();
        let report = handle.await.unwrap().unwrap();

        assert_eq!(report.batches, 3);
        assert_eq!(report.items_baked, 3 * 2 * ProductType::ALL.len() as u64);
        let status = ctx.ledger.snapshot().unwrap();
        assert!(ProductType::ALL.iter().all(|p| status.produced_items[p.index()] == 6));
    }
}
