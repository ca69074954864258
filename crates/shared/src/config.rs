//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Change-tracking configuration.
    #[serde(default)]
    pub tracking: TrackingConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Change-tracking configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackingConfig {
    /// Number of history rows loaded for metric trend queries.
    #[serde(default = "default_trend_periods")]
    pub trend_periods: u64,
    /// Number of significant changes listed in a change summary.
    #[serde(default = "default_summary_top_changes")]
    pub summary_top_changes: u64,
}

fn default_trend_periods() -> u64 {
    12
}

fn default_summary_top_changes() -> u64 {
    10
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            trend_periods: default_trend_periods(),
            summary_top_changes: default_summary_top_changes(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("VANTORA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracking_defaults() {
        let tracking = TrackingConfig::default();
        assert_eq!(tracking.trend_periods, 12);
        assert_eq!(tracking.summary_top_changes, 10);
    }
}
