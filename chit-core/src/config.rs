//! Ledger configuration (TOML).
//!
//! ```toml
//! operator = "Eric Miller"
//! processing_delay_ms = 2000
//! seed = 42
//!
//! [opening]
//! alpha = "1000000.00"
//! beta = "0.00"
//! trading = "0"
//! ```
//!
//! Balances are decimals; quoted strings keep cents exact, bare TOML numbers
//! are accepted too.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::domain::BalanceSet;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid opening balance: {0}")]
    InvalidBalance(String),
}

/// Everything the ledger needs at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Name shown on the header and as the sender of transfers.
    pub operator: String,
    /// Length of the simulated origin-verification phase.
    pub processing_delay_ms: u64,
    /// Fixed seed for receipt ids and simulated payments. Entropy when absent.
    pub seed: Option<u64>,
    pub opening: BalanceSet,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            operator: "Eric Miller".to_string(),
            processing_delay_ms: 2000,
            seed: None,
            opening: BalanceSet::new(
                Decimal::new(599_916_821_250, 2),
                Decimal::new(822_457_400, 2),
                Decimal::from(847_866),
            ),
        }
    }
}

impl LedgerConfig {
    /// Parse and validate a TOML document. Missing keys take defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: LedgerConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }

    /// Alpha and trading must start non-negative; beta may be any value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let b = &self.opening;
        if b.alpha < Decimal::ZERO {
            return Err(ConfigError::InvalidBalance(format!("alpha = {}", b.alpha)));
        }
        if b.trading < Decimal::ZERO {
            return Err(ConfigError::InvalidBalance(format!("trading = {}", b.trading)));
        }
        Ok(())
    }
}
