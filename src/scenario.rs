//! Replays a CSV scenario of customer and money operations against a ledger.
//!
//! Rows that cannot be read are dropped with a warning, the same as rows
//! the ledger rejects, so one bad line never stops the replay.

use std::{collections::HashMap, io, path::Path};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::account::AccountId;
use crate::bank::BankId;
use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::money::Money;
use crate::person::PersonId;

#[derive(Debug, Deserialize, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Open,
    Close,
    Age,
    Deposit,
    Withdraw,
    Transfer,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ScenarioRow {
    pub date: NaiveDate,
    pub op: Operation,
    pub person: String,
    pub age: Option<i64>,
    pub bank: Option<String>,
    pub amount: Option<String>,
    pub to_person: Option<String>,
    pub to_bank: Option<String>,
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("missing column value: {0}")]
    MissingField(&'static str),

    #[error("person must be given as \"First Last\": {0:?}")]
    BadName(String),

    #[error("unknown person: {0}")]
    UnknownPerson(String),

    #[error("unknown bank: {0}")]
    UnknownBank(String),

    #[error("{person} is not a customer of {bank}")]
    NotACustomer { person: String, bank: String },

    #[error("rejected by ledger: {0}")]
    Ledger(#[from] LedgerError),

    #[error("cannot read scenario: {0}")]
    Csv(#[from] csv::Error),
}

pub fn read_scenario(path: &Path) -> Result<impl Iterator<Item = ScenarioRow>, ScenarioError> {
    let reader = csv_reader().from_path(path)?;
    Ok(rows(reader))
}

pub fn read_scenario_from<R: io::Read>(input: R) -> impl Iterator<Item = ScenarioRow> {
    rows(csv_reader().from_reader(input))
}

fn csv_reader() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).trim(csv::Trim::All);
    builder
}

fn rows<R: io::Read>(reader: csv::Reader<R>) -> impl Iterator<Item = ScenarioRow> {
    reader
        .into_deserialize()
        .filter_map(|row: Result<ScenarioRow, csv::Error>| match row {
            Ok(row) => Some(row),
            Err(err) => {
                warn!(error = %err, "dropped scenario row");
                None
            }
        })
}

/// Ledger plus the name lookups a scenario needs.
pub struct Replay {
    ledger: Ledger,
    people: HashMap<String, PersonId>,
    banks: HashMap<String, BankId>,
    applied: usize,
    dropped: usize,
}

impl Replay {
    pub fn new(ledger: Ledger) -> Replay {
        Replay {
            ledger,
            people: HashMap::new(),
            banks: HashMap::new(),
            applied: 0,
            dropped: 0,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn applied(&self) -> usize {
        self.applied
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Applies every row, logging and counting the ones that fail.
    pub fn run(&mut self, rows: impl IntoIterator<Item = ScenarioRow>) {
        for row in rows {
            if let Err(err) = self.apply(&row) {
                warn!(error = %err, op = ?row.op, person = %row.person, "dropped scenario row");
                self.dropped += 1;
            } else {
                self.applied += 1;
            }
        }
        info!(applied = self.applied, dropped = self.dropped, "scenario replayed");
    }

    pub fn apply(&mut self, row: &ScenarioRow) -> Result<(), ScenarioError> {
        self.ledger.set_business_date(row.date);
        match row.op {
            Operation::Open => {
                let bank_name = required(&row.bank, "bank")?;
                let person = match self.people.get(&row.person).copied() {
                    Some(person) => person,
                    None => self.create_person(&row.person, row.age)?,
                };
                let bank = self.bank_or_create(bank_name);
                self.ledger.add_customer(bank, person)?;
            }
            Operation::Close => {
                let bank = self.known_bank(required(&row.bank, "bank")?)?;
                let person = self.known_person(&row.person)?;
                self.ledger.remove_customer(bank, person)?;
            }
            Operation::Age => {
                let person = self.known_person(&row.person)?;
                let age = row.age.ok_or(ScenarioError::MissingField("age"))?;
                self.ledger.set_age(person, age)?;
            }
            Operation::Deposit => {
                let account = self.account_of(&row.person, required(&row.bank, "bank")?)?;
                self.ledger.deposit(account, amount(row)?)?;
            }
            Operation::Withdraw => {
                let account = self.account_of(&row.person, required(&row.bank, "bank")?)?;
                self.ledger.withdraw(account, amount(row)?)?;
            }
            Operation::Transfer => {
                let sender = self.account_of(&row.person, required(&row.bank, "bank")?)?;
                let receiver = self.account_of(
                    required(&row.to_person, "to_person")?,
                    required(&row.to_bank, "to_bank")?,
                )?;
                self.ledger.transfer(sender, receiver, amount(row)?)?;
            }
        }
        Ok(())
    }

    fn create_person(&mut self, name: &str, age: Option<i64>) -> Result<PersonId, ScenarioError> {
        let (first_name, last_name) = name
            .split_once(' ')
            .map(|(first, last)| (first.trim(), last.trim()))
            .filter(|(first, last)| !first.is_empty() && !last.is_empty())
            .ok_or_else(|| ScenarioError::BadName(name.to_string()))?;
        let age = age.ok_or(ScenarioError::MissingField("age"))?;
        let person = self.ledger.add_person(first_name, last_name, age)?;
        self.people.insert(name.to_string(), person);
        Ok(person)
    }

    fn bank_or_create(&mut self, name: &str) -> BankId {
        if let Some(bank) = self.banks.get(name) {
            return *bank;
        }
        let bank = self.ledger.add_bank(name);
        self.banks.insert(name.to_string(), bank);
        bank
    }

    fn known_person(&self, name: &str) -> Result<PersonId, ScenarioError> {
        self.people
            .get(name)
            .copied()
            .ok_or_else(|| ScenarioError::UnknownPerson(name.to_string()))
    }

    fn known_bank(&self, name: &str) -> Result<BankId, ScenarioError> {
        self.banks
            .get(name)
            .copied()
            .ok_or_else(|| ScenarioError::UnknownBank(name.to_string()))
    }

    fn account_of(&self, person_name: &str, bank_name: &str) -> Result<AccountId, ScenarioError> {
        let person = self.known_person(person_name)?;
        let bank = self.known_bank(bank_name)?;
        self.ledger
            .bank(bank)?
            .account_of(person)
            .ok_or_else(|| ScenarioError::NotACustomer {
                person: person_name.to_string(),
                bank: bank_name.to_string(),
            })
    }
}

fn required<'a>(field: &'a Option<String>, name: &'static str) -> Result<&'a str, ScenarioError> {
    field
        .as_deref()
        .filter(|value| !value.is_empty())
        .ok_or(ScenarioError::MissingField(name))
}

fn amount(row: &ScenarioRow) -> Result<Money, ScenarioError> {
    let amount: Money = required(&row.amount, "amount")?
        .parse()
        .map_err(LedgerError::from)?;
    Ok(amount)
}
