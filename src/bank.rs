use std::fmt::Display;

use crate::account::AccountId;
use crate::person::PersonId;
use crate::transaction::TransactionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BankId(pub(crate) usize);

struct Customer {
    person: PersonId,
    account: AccountId,
}

/**
 * Customer roster and the bank's own ledger of transactions.
 *
 * Customers keep joining order and each one appears at most once,
 * paired with the account the bank opened for them.
 */
pub struct Bank {
    name: String,
    customers: Vec<Customer>,
    transactions: Vec<TransactionId>,
}

impl Bank {
    pub(crate) fn new(name: impl Into<String>) -> Bank {
        Bank {
            name: name.into(),
            customers: Vec::new(),
            transactions: Vec::new(),
        }
    }

    pub fn customers(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.customers.iter().map(|customer| customer.person)
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    pub fn is_customer(&self, person: PersonId) -> bool {
        self.account_of(person).is_some()
    }

    /// The account this bank keeps for `person`, if they are a customer.
    pub fn account_of(&self, person: PersonId) -> Option<AccountId> {
        self.customers
            .iter()
            .find(|customer| customer.person == person)
            .map(|customer| customer.account)
    }

    pub fn transactions(&self) -> &[TransactionId] {
        &self.transactions
    }

    /// Returns false when `person` is already on the roster.
    pub(crate) fn enroll(&mut self, person: PersonId, account: AccountId) -> bool {
        if self.is_customer(person) {
            return false;
        }
        self.customers.push(Customer { person, account });
        true
    }

    /// Takes `person` off the roster, handing back their account.
    pub(crate) fn unenroll(&mut self, person: PersonId) -> Option<AccountId> {
        let position = self
            .customers
            .iter()
            .position(|customer| customer.person == person)?;
        Some(self.customers.remove(position).account)
    }

    pub(crate) fn record(&mut self, transaction: TransactionId) {
        self.transactions.push(transaction);
    }
}

impl Display for Bank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
