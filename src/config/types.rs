//! Configuration types for restaurant pool settings.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

use crate::models::ContributionPool;

/// Metadata about the restaurant the pools belong to.
#[derive(Debug, Clone, Deserialize)]
pub struct RestaurantMetadata {
    /// Unique identifier for the restaurant.
    pub id: String,
    /// The human-readable name of the restaurant.
    pub name: String,
    /// IANA timezone the restaurant's tip periods are recorded in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

/// Pools configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct PoolsConfig {
    /// Pool definitions, in the order they are applied.
    #[serde(default)]
    pub pools: Vec<ContributionPool>,
}

/// The complete restaurant configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct RestaurantConfig {
    metadata: RestaurantMetadata,
    pools: Vec<ContributionPool>,
}

impl RestaurantConfig {
    /// Creates a new RestaurantConfig from its component parts.
    pub fn new(metadata: RestaurantMetadata, pools: Vec<ContributionPool>) -> Self {
        Self { metadata, pools }
    }

    /// Returns the restaurant metadata.
    pub fn restaurant(&self) -> &RestaurantMetadata {
        &self.metadata
    }

    /// Returns the configured pools in application order.
    pub fn pools(&self) -> &[ContributionPool] {
        &self.pools
    }
}
