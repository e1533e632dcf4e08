use std::{collections::HashSet, fmt::Display};

use crate::bank::BankId;
use crate::error::{LedgerError, LedgerResult};
use crate::money::Money;
use crate::person::PersonId;
use crate::transaction::TransactionId;

const ACCOUNT_NUMBER_DIGITS: usize = 18;
const ACCOUNT_NUMBER_SPACE: u64 = 1_000_000_000_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(pub(crate) usize);

/**
 * Balance holder opened by a bank for one of its customers.
 *
 * Owner and bank are fixed for the life of the account. The history
 * only ever grows, closing the account keeps it readable.
 */
#[derive(Debug, Clone)]
pub struct Account {
    number: String,
    owner: PersonId,
    bank: BankId,
    balance: Money,
    transactions: Vec<TransactionId>,
    closed: bool,
}

impl Account {
    pub(crate) fn open(number: String, owner: PersonId, bank: BankId) -> Account {
        Account {
            number,
            owner,
            bank,
            balance: Money::ZERO,
            transactions: Vec::new(),
            closed: false,
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn owner(&self) -> PersonId {
        self.owner
    }

    pub fn bank(&self) -> BankId {
        self.bank
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn transactions(&self) -> &[TransactionId] {
        &self.transactions
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub(crate) fn ensure_open(&self) -> LedgerResult<()> {
        if self.closed {
            return Err(LedgerError::AccountClosed(self.number.clone()));
        }
        Ok(())
    }

    /// Checks that `amount` could be credited without touching the balance.
    pub(crate) fn check_credit(&self, amount: Money) -> LedgerResult<Money> {
        self.ensure_open()?;
        if !amount.is_positive() {
            return Err(LedgerError::non_positive_amount(amount));
        }
        self.balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::InvalidAmount(format!("{} overflows the balance", amount)))
    }

    /// Checks that `amount` could be debited without touching the balance.
    pub(crate) fn check_debit(&self, amount: Money) -> LedgerResult<Money> {
        self.ensure_open()?;
        if !amount.is_positive() {
            return Err(LedgerError::non_positive_amount(amount));
        }
        if self.balance < amount {
            return Err(LedgerError::insufficient_funds(amount, self.balance));
        }
        Ok(self.balance - amount)
    }

    /// Balance changes for transfers go through here and record nothing;
    /// the caller owns the single transaction for the whole movement.
    pub(crate) fn credit(&mut self, amount: Money) -> LedgerResult<()> {
        self.balance = self.check_credit(amount)?;
        Ok(())
    }

    pub(crate) fn debit(&mut self, amount: Money) -> LedgerResult<()> {
        self.balance = self.check_debit(amount)?;
        Ok(())
    }

    pub(crate) fn record(&mut self, transaction: TransactionId) {
        self.transactions.push(transaction);
    }

    pub(crate) fn close(&mut self) {
        self.closed = true;
    }
}

impl Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number)
    }
}

/// Hands out sequential account numbers. The counter wraps around the
/// eighteen-digit space and skips any number already issued.
#[derive(Debug, Clone)]
pub struct AccountNumbers {
    country_code: String,
    next: u64,
    issued: HashSet<String>,
}

impl AccountNumbers {
    pub fn new(country_code: impl Into<String>) -> AccountNumbers {
        AccountNumbers {
            country_code: country_code.into(),
            next: 1,
            issued: HashSet::new(),
        }
    }

    pub fn next_number(&mut self) -> String {
        loop {
            let candidate = format!(
                "{}{:0width$}",
                self.country_code,
                self.next,
                width = ACCOUNT_NUMBER_DIGITS
            );
            self.next = (self.next + 1) % ACCOUNT_NUMBER_SPACE;
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}
