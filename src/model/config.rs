//! Immutable simulation parameters shared by every actor.
//!
//! A [`BakeryConfig`] is loaded once at startup (usually from TOML) and then
//! handed to each actor behind an `Arc`. Nothing mutates it after validation.

use crate::model::{ProductType, PRODUCT_TYPE_COUNT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Arrival and patience ranges for customers, all in whole seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerParams {
    pub min_arrival_secs: u64,
    pub max_arrival_secs: u64,
    pub min_patience_secs: u64,
    pub max_patience_secs: u64,
}

impl Default for CustomerParams {
    fn default() -> Self {
        Self {
            min_arrival_secs: 1,
            max_arrival_secs: 3,
            min_patience_secs: 5,
            max_patience_secs: 10,
        }
    }
}

/// How the oven restocks the shelves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionParams {
    pub interval_secs: u64,
    pub min_batch: u32,
    pub max_batch: u32,
}

impl Default for ProductionParams {
    fn default() -> Self {
        Self {
            interval_secs: 2,
            min_batch: 0,
            max_batch: 4,
        }
    }
}

/// Thresholds that end the simulation. `None` disables a limit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationLimits {
    pub max_runtime_secs: Option<u64>,
    pub max_frustrated_customers: Option<u64>,
    pub max_complained_customers: Option<u64>,
    pub max_missing_items_requests: Option<u64>,
    pub profit_target: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BakeryConfig {
    pub customer_params: CustomerParams,

    /// Upper bound on order lines per visit.
    pub max_purchase_items: u32,

    /// Subtype count per product type; 0 means the product has a single variety.
    pub num_categories: [u32; PRODUCT_TYPE_COUNT],

    /// Base unit price per product type.
    pub product_prices: [f64; PRODUCT_TYPE_COUNT],

    /// Probability in [0, 1] that a customer files a complaint on leaving.
    pub complaint_probability: f64,

    pub num_sellers: usize,

    /// Seeds every actor's RNG when set, making a run reproducible.
    pub seed: Option<u64>,

    pub production: ProductionParams,

    pub limits: SimulationLimits,
}

impl Default for BakeryConfig {
    fn default() -> Self {
        Self {
            customer_params: CustomerParams::default(),
            max_purchase_items: 3,
            num_categories: [2, 3, 4, 5, 3, 3, 0],
            product_prices: [2.50, 5.00, 4.00, 1.50, 3.50, 3.00, 2.00],
            complaint_probability: 0.3,
            num_sellers: 3,
            seed: None,
            production: ProductionParams::default(),
            limits: SimulationLimits {
                max_runtime_secs: Some(60),
                ..SimulationLimits::default()
            },
        }
    }
}

impl BakeryConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: BakeryConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.customer_params;
        if p.min_arrival_secs > p.max_arrival_secs {
            return Err(ConfigError::Invalid(format!(
                "min_arrival_secs ({}) exceeds max_arrival_secs ({})",
                p.min_arrival_secs, p.max_arrival_secs
            )));
        }
        if p.min_patience_secs > p.max_patience_secs {
            return Err(ConfigError::Invalid(format!(
                "min_patience_secs ({}) exceeds max_patience_secs ({})",
                p.min_patience_secs, p.max_patience_secs
            )));
        }
        if self.max_purchase_items == 0 {
            return Err(ConfigError::Invalid("max_purchase_items must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.complaint_probability) {
            return Err(ConfigError::Invalid(format!(
                "complaint_probability {} is outside [0, 1]",
                self.complaint_probability
            )));
        }
        for product in ProductType::ALL {
            let price = self.product_prices[product.index()];
            if !price.is_finite() || price < 0.0 {
                return Err(ConfigError::Invalid(format!("price of {product} must be a non-negative number, got {price}")));
            }
        }
        if self.num_sellers == 0 {
            return Err(ConfigError::Invalid("num_sellers must be at least 1".into()));
        }
        let prod = &self.production;
        if prod.interval_secs == 0 {
            return Err(ConfigError::Invalid("production.interval_secs must be at least 1".into()));
        }
        if prod.min_batch > prod.max_batch {
            return Err(ConfigError::Invalid(format!(
                "production.min_batch ({}) exceeds production.max_batch ({})",
                prod.min_batch, prod.max_batch
            )));
        }
        Ok(())
    }

    pub fn base_price(&self, product: ProductType) -> f64 {
        self.product_prices[product.index()]
    }

    pub fn subtypes(&self, product: ProductType) -> u32 {
        self.num_categories[product.index()]
    }
}
