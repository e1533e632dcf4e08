use std::fmt::Display;

use crate::account::AccountId;
use crate::error::{LedgerError, LedgerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PersonId(pub(crate) usize);

/// A natural person that can become a bank customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    first_name: String,
    last_name: String,
    age: i64,
    account: Option<AccountId>,
}

impl Person {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: i64,
    ) -> LedgerResult<Person> {
        check_age(age)?;
        Ok(Person {
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
            account: None,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn age(&self) -> i64 {
        self.age
    }

    /// Leaves the age untouched when the new value is rejected.
    pub fn set_age(&mut self, age: i64) -> LedgerResult<()> {
        check_age(age)?;
        self.age = age;
        Ok(())
    }

    /// The account opened by the bank this person most recently joined.
    pub fn account(&self) -> Option<AccountId> {
        self.account
    }

    pub(crate) fn link_account(&mut self, account: Option<AccountId>) {
        self.account = account;
    }
}

fn check_age(age: i64) -> LedgerResult<()> {
    if age <= 0 {
        return Err(LedgerError::InvalidAge(age));
    }
    Ok(())
}

impl Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}
