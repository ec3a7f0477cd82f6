//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Marketplace economics configuration.
    #[serde(default)]
    pub economy: EconomyConfig,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Marketplace economics configuration.
///
/// These knobs cover the payout side; the rule constants themselves (quota
/// ceiling, strike limit, penalty curve) are fixed in the core services.
#[derive(Debug, Clone, Deserialize)]
pub struct EconomyConfig {
    /// USD paid out per XP on withdrawal.
    #[serde(default = "default_xp_to_usd_rate")]
    pub xp_to_usd_rate: f64,
    /// Minimum XP that can be withdrawn in one request.
    #[serde(default = "default_min_withdrawal_xp")]
    pub min_withdrawal_xp: i32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            xp_to_usd_rate: default_xp_to_usd_rate(),
            min_withdrawal_xp: default_min_withdrawal_xp(),
        }
    }
}

const fn default_max_connections() -> u32 {
    100
}

const fn default_min_connections() -> u32 {
    5
}

const fn default_xp_to_usd_rate() -> f64 {
    0.01
}

const fn default_min_withdrawal_xp() -> i32 {
    100
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `CROWDSTOCK_ENV`)
    /// 3. Environment variables with `CROWDSTOCK_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("CROWDSTOCK_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("CROWDSTOCK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(
                config::Environment::with_prefix("CROWDSTOCK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_economy_defaults() {
        let economy = EconomyConfig::default();
        assert!((economy.xp_to_usd_rate - 0.01).abs() < f64::EPSILON);
        assert_eq!(economy.min_withdrawal_xp, 100);
    }

    #[test]
    fn test_deserialize_minimal() {
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(
                "[database]\nurl = \"postgres://localhost/crowdstock\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.database.url, "postgres://localhost/crowdstock");
        assert_eq!(config.database.max_connections, 100);
        assert_eq!(config.economy.min_withdrawal_xp, 100);
    }
}
