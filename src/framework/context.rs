//! # Floor Context
//!
//! The dependencies every actor is built with: the immutable configuration,
//! the shared ledger and the shared queue. Cloning a context clones the
//! handles, never the state behind them.

use crate::framework::{Ledger, RequestChannel};
use crate::model::BakeryConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

/// Spreads per-actor streams apart when deriving seeded RNGs.
const STREAM_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone)]
pub struct FloorContext {
    pub config: Arc<BakeryConfig>,
    pub ledger: Arc<Ledger>,
    pub channel: RequestChannel,
}

impl FloorContext {
    /// Fresh ledger and queue for `config`.
    pub fn new(config: BakeryConfig) -> Self {
        Self::with_ledger(config, Ledger::new())
    }

    pub fn with_ledger(config: BakeryConfig, ledger: Ledger) -> Self {
        Self {
            config: Arc::new(config),
            ledger: Arc::new(ledger),
            channel: RequestChannel::new(),
        }
    }

    /// RNG for one actor. Seeded runs give each `stream` its own
    /// reproducible sequence; unseeded runs draw from OS entropy.
    pub fn rng_for(&self, stream: u64) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ stream.wrapping_mul(STREAM_STRIDE)),
            None => StdRng::from_entropy(),
        }
    }
}
