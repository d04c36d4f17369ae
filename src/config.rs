//! Configuration management for the catalog engine
//!
//! All configurable parameters in one place with environment variable
//! overrides. Follows the principle: sensible defaults, configurable in
//! production.

use std::env;
use tracing::info;

use crate::constants::{DEFAULT_POPULAR_COUNT, MAX_POPULAR_COUNT};

/// Engine configuration loaded from environment with defaults
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Films returned by the popularity query when no count is given
    /// (default: 10)
    pub default_popular_count: i64,

    /// Hard cap on a single popularity query (default: 1000)
    pub max_popular_count: i64,

    /// Whether running in production mode
    pub is_production: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_popular_count: DEFAULT_POPULAR_COUNT,
            max_popular_count: MAX_POPULAR_COUNT,
            is_production: false,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables with defaults
    #[allow(clippy::field_reassign_with_default)] // Environment overrides require mutable config
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.is_production = env::var("FILMGRAPH_ENV")
            .map(|v| {
                let v = v.to_lowercase();
                v == "production" || v == "prod"
            })
            .unwrap_or(false);

        if let Ok(val) = env::var("FILMGRAPH_POPULAR_COUNT") {
            if let Ok(n) = val.parse::<i64>() {
                if n > 0 {
                    config.default_popular_count = n;
                }
            }
        }

        if let Ok(val) = env::var("FILMGRAPH_MAX_POPULAR") {
            if let Ok(n) = val.parse::<i64>() {
                if n > 0 {
                    config.max_popular_count = n;
                }
            }
        }

        config
    }

    /// Log the current configuration
    pub fn log(&self) {
        info!("Configuration:");
        info!(
            "   Mode: {}",
            if self.is_production {
                "PRODUCTION"
            } else {
                "Development"
            }
        );
        info!("   Default popular count: {}", self.default_popular_count);
        info!("   Max popular count: {}", self.max_popular_count);
    }
}

/// Environment variable documentation
#[allow(unused)] // Public API - available for CLI help output
pub fn print_env_help() {
    println!("Filmgraph Configuration Environment Variables:");
    println!();
    println!("  FILMGRAPH_ENV            - Set to 'production' or 'prod' for production mode");
    println!("  FILMGRAPH_POPULAR_COUNT  - Default popularity query size (default: 10)");
    println!("  FILMGRAPH_MAX_POPULAR    - Hard cap on a popularity query (default: 1000)");
    println!();
    println!("  RUST_LOG                 - Log level (e.g., info, debug, trace)");
    println!();
}
