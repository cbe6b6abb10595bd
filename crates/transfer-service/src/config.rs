//! Service configuration
//!
//! Stored as pretty JSON. A missing file yields the default configuration.

use crate::form::{Account, TransferContext, TransferForm};
use nam_transfer_core::{ApplicationFeatures, AssetDirectory, ChainParameters, Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default RPC endpoint
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:26657";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Fallback filter directive when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Transfer service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceConfig {
    /// RPC endpoint recorded on every transaction
    pub rpc_url: String,
    /// Chain parameters
    pub chain: ChainParameters,
    /// Feature flags
    pub features: ApplicationFeatures,
    /// Initial state of the shielded toggle
    pub shielded_by_default: bool,
    /// Logging
    pub log: LogConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            chain: ChainParameters::default(),
            features: ApplicationFeatures::default(),
            shielded_by_default: true,
            log: LogConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from `path`, falling back to defaults if absent
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Write configuration to `path` atomically
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.validate()?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;

        tracing::info!(path = %path.display(), "Saved service config");
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.rpc_url.trim().is_empty() {
            return Err(Error::Config("RPC URL must not be empty".to_string()));
        }
        if self.log.level.trim().is_empty() {
            return Err(Error::Config("Log level must not be empty".to_string()));
        }
        Ok(())
    }

    /// Empty transfer form with the configured shielded toggle
    pub fn transfer_form(&self) -> TransferForm {
        TransferForm::new(self.shielded_by_default)
    }

    /// Context for resolving forms against the configured chain and features
    pub fn transfer_context(&self, accounts: Vec<Account>, assets: AssetDirectory) -> TransferContext {
        TransferContext {
            accounts,
            assets,
            chain: Some(self.chain.clone()),
            features: self.features,
            rpc_url: self.rpc_url.clone(),
        }
    }
}
