//! Configuration management for the library core

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoansConfig {
    /// Loan length in days, counted from the moment an item is lent
    pub duration_days: i64,
}

/// Argon2 cost parameters used when storing credentials
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub argon2_memory_kib: u32,
    pub argon2_iterations: u32,
    pub argon2_parallelism: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SeedUser {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SeedItem {
    pub title: String,
    pub author: String,
    pub identifier: String,
    #[serde(default)]
    pub ebook_url: Option<String>,
}

/// Accounts and items registered when the services are built
#[derive(Debug, Deserialize, Clone)]
pub struct SeedConfig {
    #[serde(default)]
    pub users: Vec<SeedUser>,
    #[serde(default)]
    pub items: Vec<SeedItem>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub loans: LoansConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (e.g. LIBRARY__LOANS__DURATION_DAYS)
            .add_source(
                Environment::with_prefix("LIBRARY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for LoansConfig {
    fn default() -> Self {
        Self { duration_days: 7 }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            argon2_memory_kib: argon2::Params::DEFAULT_M_COST,
            argon2_iterations: argon2::Params::DEFAULT_T_COST,
            argon2_parallelism: argon2::Params::DEFAULT_P_COST,
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            users: vec![
                SeedUser {
                    username: "admin".to_string(),
                    password: "admin123".to_string(),
                    role: "admin".to_string(),
                },
                SeedUser {
                    username: "user1".to_string(),
                    password: "pass1".to_string(),
                    role: "user".to_string(),
                },
            ],
            items: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.loans.duration_days, 7);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.seed.users.len(), 2);
        assert_eq!(config.seed.users[0].username, "admin");
        assert!(config.seed.items.is_empty());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str("[loans]\nduration_days = 14\n", FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.loans.duration_days, 14);
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.seed.users.len(), 2);
    }
}
