//! In-memory retail banking ledger.
//!
//! People join banks, which open an account for them; accounts take ATM
//! deposits and withdrawals and send transfers to each other, and every
//! movement is kept as an immutable transaction for statements and
//! turnover reporting.

pub mod account;
pub mod bank;
pub mod config;
pub mod error;
pub mod ledger;
pub mod money;
pub mod person;
pub mod report;
pub mod scenario;
pub mod transaction;

pub use account::{Account, AccountId};
pub use bank::{Bank, BankId};
pub use config::{ConfigError, LedgerConfig};
pub use error::{LedgerError, LedgerResult};
pub use ledger::{Ledger, TransactionDisplay};
pub use money::{Money, MoneyParseError};
pub use person::{Person, PersonId};
pub use report::Report;
pub use transaction::{Transaction, TransactionId};
