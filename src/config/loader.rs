//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a restaurant's
//! pool definitions from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::calculation::validate_pools;
use crate::error::{EngineError, EngineResult};
use crate::models::ContributionPool;

use super::types::{PoolsConfig, RestaurantConfig, RestaurantMetadata};

/// Loads and provides access to restaurant pool configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── restaurant.yaml  # Restaurant metadata
/// └── pools.yaml       # Contribution pool definitions
/// ```
///
/// # Example
///
/// ```no_run
/// use tip_pool_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let pool = loader.get_pool("dish").unwrap();
/// println!("{} takes {}%", pool.name, pool.contribution_percentage);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: RestaurantConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML (`ConfigParseError`)
    /// - A pool definition fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<RestaurantMetadata>(&path.join("restaurant.yaml"))?;
        let pools_config = Self::load_yaml::<PoolsConfig>(&path.join("pools.yaml"))?;

        Self::from_parts(metadata, pools_config.pools)
    }

    /// Builds a loader from already-parsed parts, validating the pools.
    pub fn from_parts(
        metadata: RestaurantMetadata,
        pools: Vec<ContributionPool>,
    ) -> EngineResult<Self> {
        validate_pools(&pools)?;
        debug!(
            restaurant_id = %metadata.id,
            pools = pools.len(),
            "Loaded pool configuration"
        );

        Ok(Self {
            config: RestaurantConfig::new(metadata, pools),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying restaurant configuration.
    pub fn config(&self) -> &RestaurantConfig {
        &self.config
    }

    /// Returns the restaurant metadata.
    pub fn restaurant(&self) -> &RestaurantMetadata {
        self.config.restaurant()
    }

    /// Returns the configured pools in application order.
    pub fn pools(&self) -> &[ContributionPool] {
        self.config.pools()
    }

    /// Gets a pool by its id.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tip_pool_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// let pool = loader.get_pool("kitchen")?;
    /// println!("Pool: {}", pool.name);
    /// # Ok::<(), tip_pool_engine::error::EngineError>(())
    /// ```
    pub fn get_pool(&self, pool_id: &str) -> EngineResult<&ContributionPool> {
        self.pools()
            .iter()
            .find(|p| p.id == pool_id)
            .ok_or_else(|| EngineError::PoolNotFound {
                pool_id: pool_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShareMethod;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn metadata() -> RestaurantMetadata {
        RestaurantMetadata {
            id: "test".to_string(),
            name: "Test".to_string(),
            timezone: "UTC".to_string(),
        }
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.restaurant().id, "harbour_bistro");
        assert_eq!(loader.restaurant().name, "Harbour Bistro");
        assert_eq!(loader.restaurant().timezone, "Australia/Sydney");
        assert_eq!(loader.pools().len(), 3);
    }

    #[test]
    fn test_pools_keep_file_order() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let ids: Vec<&str> = loader.pools().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["dish", "bus", "kitchen"]);
    }

    #[test]
    fn test_get_pool() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let kitchen = loader.get_pool("kitchen").unwrap();
        assert_eq!(kitchen.share_method, ShareMethod::Role);
        assert_eq!(kitchen.contribution_percentage, dec("2.5"));
        assert_eq!(kitchen.role_weight("Chef"), dec("3"));
        assert_eq!(kitchen.role_weight("Prep"), dec("1"));
    }

    #[test]
    fn test_get_pool_unknown_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.get_pool("valet") {
            Err(EngineError::PoolNotFound { pool_id }) => assert_eq!(pool_id, "valet"),
            other => panic!("Expected PoolNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        match ConfigLoader::load("/nonexistent/path") {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("restaurant.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_parts_rejects_invalid_pool() {
        let pools = vec![ContributionPool::new("dish", "Dish", dec("120"), ShareMethod::Hours)];

        let result = ConfigLoader::from_parts(metadata(), pools);
        assert!(matches!(result, Err(EngineError::InvalidPercentage { .. })));
    }

    #[test]
    fn test_from_parts_accepts_no_pools() {
        let loader = ConfigLoader::from_parts(metadata(), vec![]).unwrap();
        assert!(loader.pools().is_empty());
    }
}
