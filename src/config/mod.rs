//! Configuration loading for the Tip-Pool Engine.
//!
//! This module stands in for a restaurant's settings store: it loads the
//! restaurant metadata and its contribution pool definitions from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use tip_pool_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded {} pools for {}", config.pools().len(), config.restaurant().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{PoolsConfig, RestaurantConfig, RestaurantMetadata};
