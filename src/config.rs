//! Ledger configuration
//!
//! Defaults can be overridden through environment variables.

use std::env;

use crate::money::Money;

const DEFAULT_COUNTRY_CODE: &str = "EE";
const DEFAULT_CROSS_BANK_FEE: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Two letter prefix of every account number
    pub country_code: String,

    /// Flat fee charged to the sender of a transfer between two banks
    pub cross_bank_fee: Money,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            cross_bank_fee: Money::from_units(DEFAULT_CROSS_BANK_FEE),
        }
    }
}

impl LedgerConfig {
    /// Load configuration from `LEDGER_COUNTRY_CODE` and `LEDGER_CROSS_BANK_FEE`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let country_code = match lookup("LEDGER_COUNTRY_CODE") {
            Some(code) => code.trim().to_string(),
            None => defaults.country_code,
        };
        if country_code.len() != 2 || !country_code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::InvalidValue("LEDGER_COUNTRY_CODE"));
        }

        let cross_bank_fee = match lookup("LEDGER_CROSS_BANK_FEE") {
            Some(fee) => fee
                .parse::<Money>()
                .map_err(|_| ConfigError::InvalidValue("LEDGER_CROSS_BANK_FEE"))?,
            None => defaults.cross_bank_fee,
        };
        if cross_bank_fee.is_negative() {
            return Err(ConfigError::InvalidValue("LEDGER_CROSS_BANK_FEE"));
        }

        Ok(Self {
            country_code,
            cross_bank_fee,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
