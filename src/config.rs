use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::{LedgerError, Result};
use crate::interest::DayCountConvention;

/// highest sequence a two-digit transaction suffix can hold
pub const MAX_DAILY_SEQUENCE: u32 = 99;

/// ledger configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// name shown in the console banners
    pub bank_name: String,
    /// year basis used for the final interest division
    pub day_count_convention: DayCountConvention,
    /// per account, per date cap on recorded transactions
    pub max_transactions_per_day: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            bank_name: "GIC Bank".to_string(),
            day_count_convention: DayCountConvention::Actual365,
            max_transactions_per_day: MAX_DAILY_SEQUENCE,
        }
    }
}

impl LedgerConfig {
    /// parse and validate a json configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LedgerConfig =
            serde_json::from_str(json).map_err(|e| LedgerError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// load from a json file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bank_name.trim().is_empty() {
            return Err(LedgerError::InvalidConfiguration {
                message: "bank_name must not be empty".to_string(),
            });
        }

        if !(1..=MAX_DAILY_SEQUENCE).contains(&self.max_transactions_per_day) {
            return Err(LedgerError::InvalidConfiguration {
                message: format!(
                    "max_transactions_per_day must be between 1 and {}, got {}",
                    MAX_DAILY_SEQUENCE, self.max_transactions_per_day
                ),
            });
        }

        Ok(())
    }
}
