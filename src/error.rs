//! Ledger errors.
//!
//! Every operation either commits completely or returns one of these.

use thiserror::Error;

use crate::money::{Money, MoneyParseError};

pub type LedgerResult<T> = Result<T, LedgerError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Age must be at least one year
    #[error("Invalid age: {0}, must be greater than 0")]
    InvalidAge(i64),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: Money, available: Money },

    #[error("Invalid transfer: {0}")]
    InvalidTransfer(String),

    /// Account was closed when its owner left the bank
    #[error("Account is closed: {0}")]
    AccountClosed(String),

    #[error("Unknown person")]
    UnknownPerson,

    #[error("Unknown bank")]
    UnknownBank,

    #[error("Unknown account")]
    UnknownAccount,

    #[error("Unknown transaction")]
    UnknownTransaction,

    #[error(transparent)]
    MoneyParse(#[from] MoneyParseError),
}

impl LedgerError {
    pub fn insufficient_funds(required: Money, available: Money) -> Self {
        Self::InsufficientFunds {
            required,
            available,
        }
    }

    pub fn non_positive_amount(amount: Money) -> Self {
        Self::InvalidAmount(format!("{} must be greater than 0", amount))
    }
}
