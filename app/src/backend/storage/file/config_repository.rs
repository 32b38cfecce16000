//! # Estimator Config Repository
//!
//! Keeps the storefront configuration in `estimator_config.yaml` at the root of
//! the data directory. The file is created with the default rate table on
//! first load, and can then be edited by hand to change pricing.
//!
//! ## YAML Format
//!
//! ```yaml
//! business_name: Metro Mac Rentals
//! whatsapp_number: '639000000000'
//! currency_symbol: ₱
//! delivery_fee: 250
//! base_rates:
//!   day:
//!     air: 600
//!     pro: 800
//!   month:
//!     air: 4000
//!     pro: 5500
//! volume_discounts:
//! - min_qty: 3
//!   pct: 5
//! - min_qty: 5
//!   pct: 8
//! max_deposit_units: 4
//! per_unit_deposit: 3000
//! ```
//!
//! Fields left out of the file take their default values.

use anyhow::{Context, Result};
use log::info;
use shared::EstimatorConfig;

use super::connection::FileConnection;
use crate::backend::storage::traits::ConfigStorage;

pub const CONFIG_FILE_NAME: &str = "estimator_config.yaml";

#[derive(Clone)]
pub struct ConfigRepository {
    connection: FileConnection,
}

impl ConfigRepository {
    pub fn new(connection: FileConnection) -> Self {
        Self { connection }
    }
}

impl ConfigStorage for ConfigRepository {
    fn load_config(&self) -> Result<EstimatorConfig> {
        match self.connection.read_optional(CONFIG_FILE_NAME)? {
            Some(yaml_content) => {
                let config: EstimatorConfig = serde_yaml::from_str(&yaml_content)
                    .with_context(|| format!("Failed to parse {}", CONFIG_FILE_NAME))?;
                info!("Loaded estimator config from {}", CONFIG_FILE_NAME);
                Ok(config)
            }
            None => {
                let config = EstimatorConfig::default();
                self.save_config(&config)?;
                info!("Created default estimator config at {}", CONFIG_FILE_NAME);
                Ok(config)
            }
        }
    }

    fn save_config(&self, config: &EstimatorConfig) -> Result<()> {
        let yaml_content = serde_yaml::to_string(config)?;
        self.connection.write_atomic(CONFIG_FILE_NAME, &yaml_content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::file::test_utils::TestEnvironment;
    use std::fs;

    #[test]
    fn test_first_load_writes_defaults() {
        let env = TestEnvironment::new().unwrap();
        let repo = ConfigRepository::new(env.connection.clone());

        let config = repo.load_config().unwrap();
        assert_eq!(config, EstimatorConfig::default());
        assert!(env.base_directory().join(CONFIG_FILE_NAME).exists());

        // Second load reads the file back
        assert_eq!(repo.load_config().unwrap(), EstimatorConfig::default());
    }

    #[test]
    fn test_partial_yaml_overrides_defaults() {
        let env = TestEnvironment::new().unwrap();
        fs::write(
            env.base_directory().join(CONFIG_FILE_NAME),
            "delivery_fee: 400\nbase_rates:\n  month:\n    air: 4200\n",
        )
        .unwrap();

        let config = ConfigRepository::new(env.connection.clone()).load_config().unwrap();
        assert_eq!(config.delivery_fee, 400);
        assert_eq!(config.base_rates.rate_for("month", "air"), Some(4200));
        assert_eq!(config.base_rates.rate_for("day", "air"), None);
        assert_eq!(config.per_unit_deposit, 3000);
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let env = TestEnvironment::new().unwrap();
        fs::write(env.base_directory().join(CONFIG_FILE_NAME), "delivery_fee: [").unwrap();

        let result = ConfigRepository::new(env.connection.clone()).load_config();
        assert!(result.is_err());
    }

    #[test]
    fn test_save_then_load() {
        let env = TestEnvironment::new().unwrap();
        let repo = ConfigRepository::new(env.connection.clone());

        let mut config = EstimatorConfig::default();
        config.whatsapp_number = "639171234567".to_string();
        config.max_deposit_units = 2;
        repo.save_config(&config).unwrap();

        assert_eq!(repo.load_config().unwrap(), config);
    }
}
