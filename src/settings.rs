//! Service configuration.
//!
//! Layers, later ones overriding earlier ones:
//! 1. `config/default.toml`
//! 2. `config/{RUN_MODE}.toml` (`RUN_MODE` defaults to `development`)
//! 3. `REMIT__*` environment variables, e.g. `REMIT__SERVER__PORT=9090`

use serde::Deserialize;
use std::path::PathBuf;

use crate::seed::{self, SeedError};
use crate::Account;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Where the initial balances come from. Both sources may be combined.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LedgerConfig {
    /// JSON or CSV file of initial balances.
    pub initial_balances_path: Option<PathBuf>,
    /// Accounts declared inline in the config file.
    #[serde(default)]
    pub accounts: Vec<Account>,
}

impl AppConfig {
    /// Loads configuration from config files and the environment.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("REMIT").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Inline accounts followed by those read from `initial_balances_path`,
    /// validated together.
    pub fn initial_accounts(&self) -> Result<Vec<Account>, SeedError> {
        let mut accounts = self.ledger.accounts.clone();
        if let Some(path) = &self.ledger.initial_balances_path {
            accounts.extend(seed::load_accounts(path)?);
        }
        seed::validate(&accounts)?;
        Ok(accounts)
    }
}
