//! Configuration management for the Grain Contract Management client
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with GCM_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// CRM API configuration
    pub crm: CrmConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CrmConfig {
    /// Base URL of the contract/CRM API
    pub base_url: String,

    /// Organization partition key sent with every request
    pub organization_key: String,

    /// Bearer token issued by the auth service. The client only carries
    /// the token; issuance and refresh live elsewhere.
    pub access_token: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("GCM_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("crm.base_url", "https://crm-develop.grainchain.io/api/v1")?
            .set_default("crm.organization_key", "")?
            .set_default("crm.access_token", "")?
            .set_default("crm.timeout_seconds", 30)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (GCM_ prefix)
            .add_source(
                Environment::with_prefix("GCM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
