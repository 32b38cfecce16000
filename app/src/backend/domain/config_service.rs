//! Loading and checking the storefront pricing configuration.

use anyhow::{Context, Result};
use log::{info, warn};
use shared::{DiscountTier, EstimatorConfig};
use std::collections::HashSet;
use std::sync::Arc;

use crate::backend::storage::ConfigStorage;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Discount tier with pct {pct}% has min_qty 0; tiers must start at 1 unit or more")]
    ZeroMinQuantity { pct: u32 },
    #[error("More than one discount tier has min_qty {0}")]
    DuplicateMinQuantity(u32),
    #[error("WhatsApp number must contain digits only (got {0:?})")]
    InvalidWhatsAppNumber(String),
}

/// Check a configuration and return the version the estimator should use.
///
/// Discount percentages above 100 are clamped to 100. An empty rate table is
/// allowed (every estimate then prices at 0) but logged.
pub fn validate_config(mut config: EstimatorConfig) -> Result<EstimatorConfig, ConfigError> {
    let mut seen = HashSet::new();
    for tier in config.volume_discounts.tiers() {
        if tier.min_qty == 0 {
            return Err(ConfigError::ZeroMinQuantity { pct: tier.pct });
        }
        if !seen.insert(tier.min_qty) {
            return Err(ConfigError::DuplicateMinQuantity(tier.min_qty));
        }
    }

    let number = config.whatsapp_number.trim();
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigError::InvalidWhatsAppNumber(config.whatsapp_number.clone()));
    }

    for tier in config.volume_discounts.0.iter_mut() {
        if tier.pct > 100 {
            warn!("Discount tier for {}+ units is {}%, clamping to 100%", tier.min_qty, tier.pct);
            *tier = DiscountTier { min_qty: tier.min_qty, pct: 100 };
        }
    }

    if config.base_rates.is_empty() {
        warn!("Rate table is empty; every estimate will price rentals at 0");
    }

    Ok(config)
}

/// Service that loads the configuration from storage and validates it
pub struct ConfigService<C: ConfigStorage> {
    storage: Arc<C>,
}

impl<C: ConfigStorage> ConfigService<C> {
    pub fn new(storage: Arc<C>) -> Self {
        Self { storage }
    }

    pub fn load(&self) -> Result<EstimatorConfig> {
        let config = self
            .storage
            .load_config()
            .context("Failed to load estimator config")?;
        let config = validate_config(config).context("Invalid estimator config")?;
        info!(
            "Estimator config ready: {} plans, {} discount tiers, delivery fee {}",
            config.base_rates.0.len(),
            config.volume_discounts.tiers().len(),
            config.delivery_fee
        );
        Ok(config)
    }
}
