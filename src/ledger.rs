//! In-memory store owning every person, bank, account and transaction.
//!
//! Entities point at each other through the id handles handed out here,
//! so the bank/account/person associations never form reference cycles.

use std::fmt::Display;

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::account::{Account, AccountId, AccountNumbers};
use crate::bank::{Bank, BankId};
use crate::config::LedgerConfig;
use crate::error::{LedgerError, LedgerResult};
use crate::money::Money;
use crate::person::{Person, PersonId};
use crate::transaction::{Transaction, TransactionId};

pub struct Ledger {
    config: LedgerConfig,
    people: Vec<Person>,
    banks: Vec<Bank>,
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
    numbers: AccountNumbers,
    business_date: Option<NaiveDate>,
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::new(LedgerConfig::default())
    }
}

impl Ledger {
    pub fn new(config: LedgerConfig) -> Ledger {
        Ledger {
            numbers: AccountNumbers::new(config.country_code.clone()),
            config,
            people: Vec::new(),
            banks: Vec::new(),
            accounts: Vec::new(),
            transactions: Vec::new(),
            business_date: None,
        }
    }

    /// Date stamped on new transactions; today's local date unless pinned.
    pub fn business_date(&self) -> NaiveDate {
        self.business_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn set_business_date(&mut self, date: NaiveDate) {
        self.business_date = Some(date);
    }

    pub fn clear_business_date(&mut self) {
        self.business_date = None;
    }

    pub fn add_person(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: i64,
    ) -> LedgerResult<PersonId> {
        let person = Person::new(first_name, last_name, age)?;
        self.people.push(person);
        Ok(PersonId(self.people.len() - 1))
    }

    pub fn add_bank(&mut self, name: impl Into<String>) -> BankId {
        self.banks.push(Bank::new(name));
        BankId(self.banks.len() - 1)
    }

    pub fn person(&self, id: PersonId) -> LedgerResult<&Person> {
        self.people.get(id.0).ok_or(LedgerError::UnknownPerson)
    }

    pub fn bank(&self, id: BankId) -> LedgerResult<&Bank> {
        self.banks.get(id.0).ok_or(LedgerError::UnknownBank)
    }

    pub fn account(&self, id: AccountId) -> LedgerResult<&Account> {
        self.accounts.get(id.0).ok_or(LedgerError::UnknownAccount)
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.get(id.0)
    }

    /// Every account ever opened, closed ones included, in opening order.
    pub fn accounts(&self) -> impl Iterator<Item = (AccountId, &Account)> {
        self.accounts
            .iter()
            .enumerate()
            .map(|(index, account)| (AccountId(index), account))
    }

    pub fn banks(&self) -> impl Iterator<Item = (BankId, &Bank)> {
        self.banks
            .iter()
            .enumerate()
            .map(|(index, bank)| (BankId(index), bank))
    }

    pub fn set_age(&mut self, person: PersonId, age: i64) -> LedgerResult<()> {
        self.people
            .get_mut(person.0)
            .ok_or(LedgerError::UnknownPerson)?
            .set_age(age)
    }

    /**
     * Opens a zero-balance account for `person` at `bank`.
     *
     * Returns false, and opens nothing, when the person is already a
     * customer there.
     */
    pub fn add_customer(&mut self, bank: BankId, person: PersonId) -> LedgerResult<bool> {
        self.person(person)?;
        if self.bank(bank)?.is_customer(person) {
            return Ok(false);
        }

        let number = self.numbers.next_number();
        let account = AccountId(self.accounts.len());
        self.accounts
            .push(Account::open(number.clone(), person, bank));
        self.banks[bank.0].enroll(person, account);
        self.people[person.0].link_account(Some(account));

        debug!(bank = %self.banks[bank.0], person = %self.people[person.0], %number, "customer added");
        Ok(true)
    }

    /**
     * Removes `person` from the bank and closes their account there.
     *
     * History already recorded in the bank and the account stays. The
     * person's account link is only cleared when it points at this bank.
     */
    pub fn remove_customer(&mut self, bank: BankId, person: PersonId) -> LedgerResult<bool> {
        self.person(person)?;
        self.bank(bank)?;
        let account = match self.banks[bank.0].unenroll(person) {
            Some(account) => account,
            None => return Ok(false),
        };

        self.accounts[account.0].close();
        let owner = &mut self.people[person.0];
        if owner.account() == Some(account) {
            owner.link_account(None);
        }

        debug!(bank = %self.banks[bank.0], person = %self.people[person.0], "customer removed");
        Ok(true)
    }

    /// ATM deposit, recorded in the account's and its bank's history.
    pub fn deposit(&mut self, account: AccountId, amount: Money) -> LedgerResult<TransactionId> {
        let holder = self
            .accounts
            .get_mut(account.0)
            .ok_or(LedgerError::UnknownAccount)?;
        holder.credit(amount)?;

        let transaction = self.record_atm(account, amount);
        debug!(account = %self.accounts[account.0], %amount, "deposit");
        Ok(transaction)
    }

    /// ATM withdrawal, recorded with a negative amount.
    pub fn withdraw(&mut self, account: AccountId, amount: Money) -> LedgerResult<TransactionId> {
        let holder = self
            .accounts
            .get_mut(account.0)
            .ok_or(LedgerError::UnknownAccount)?;
        holder.debit(amount)?;

        let transaction = self.record_atm(account, -amount);
        debug!(account = %self.accounts[account.0], %amount, "withdrawal");
        Ok(transaction)
    }

    /// Fee the sender pays on top of the amount; only charged between banks.
    pub fn transfer_fee(&self, sender: AccountId, receiver: AccountId) -> LedgerResult<Money> {
        if self.account(sender)?.bank() == self.account(receiver)?.bank() {
            Ok(Money::ZERO)
        } else {
            Ok(self.config.cross_bank_fee)
        }
    }

    /**
     * Moves `amount` from `sender` to `receiver` as one transaction.
     *
     * Every check runs before any balance changes, so a rejected
     * transfer leaves both accounts and all histories untouched. The
     * fee leaves circulation; nobody is credited with it.
     */
    pub fn transfer(
        &mut self,
        sender: AccountId,
        receiver: AccountId,
        amount: Money,
    ) -> LedgerResult<TransactionId> {
        let from = self.account(sender)?;
        let to = self.account(receiver)?;

        if !amount.is_positive() {
            return Err(LedgerError::non_positive_amount(amount));
        }
        if sender == receiver {
            return Err(LedgerError::InvalidTransfer(format!(
                "{} cannot transfer to itself",
                from
            )));
        }
        if from.owner() == to.owner() {
            return Err(LedgerError::InvalidTransfer(format!(
                "{} and {} belong to the same person",
                from, to
            )));
        }

        from.ensure_open()?;
        to.ensure_open()?;

        let cross_bank = from.bank() != to.bank();
        let fee = self.transfer_fee(sender, receiver)?;
        let required = amount.checked_add(fee).ok_or_else(|| {
            LedgerError::InvalidAmount(format!("{} plus fee overflows", amount))
        })?;
        from.check_debit(required)?;
        to.check_credit(amount)?;
        let (sender_bank, receiver_bank) = (from.bank(), to.bank());

        self.accounts[sender.0].debit(required)?;
        self.accounts[receiver.0].credit(amount)?;

        let transaction = self.push_transaction(Transaction::transfer(
            sender,
            receiver,
            amount,
            self.business_date(),
        ));
        self.accounts[sender.0].record(transaction);
        self.accounts[receiver.0].record(transaction);
        self.banks[sender_bank.0].record(transaction);
        if cross_bank {
            self.banks[receiver_bank.0].record(transaction);
        }

        debug!(
            sender = %self.accounts[sender.0],
            receiver = %self.accounts[receiver.0],
            %amount,
            %fee,
            "transfer"
        );
        Ok(transaction)
    }

    /// Transactions of `account` dated within `[from_date, to_date]`, in recorded order.
    pub fn account_statement(
        &self,
        account: AccountId,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> LedgerResult<Vec<&Transaction>> {
        Ok(self
            .account(account)?
            .transactions()
            .iter()
            .map(|id| &self.transactions[id.0])
            .filter(|transaction| transaction.is_within(from_date, to_date))
            .collect())
    }

    /// Total income: ATM deposits and received transfers.
    pub fn get_debit_turnover(
        &self,
        account: AccountId,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> LedgerResult<Money> {
        total(
            self.account_statement(account, from_date, to_date)?
                .into_iter()
                .map(|transaction| transaction.incoming_for(account)),
        )
    }

    /// Total expenditure as a non-positive amount. Fees are not included.
    pub fn get_credit_turnover(
        &self,
        account: AccountId,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> LedgerResult<Money> {
        total(
            self.account_statement(account, from_date, to_date)?
                .into_iter()
                .map(|transaction| transaction.outgoing_for(account)),
        )
    }

    pub fn get_net_turnover(
        &self,
        account: AccountId,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> LedgerResult<Money> {
        total([
            self.get_debit_turnover(account, from_date, to_date)?,
            self.get_credit_turnover(account, from_date, to_date)?,
        ])
    }

    /// Display form of a recorded transaction: `(amount €) ATM` or
    /// `(amount €) <sender> -> <receiver>`, with the parties' names resolved.
    pub fn describe(&self, id: TransactionId) -> LedgerResult<TransactionDisplay<'_>> {
        let transaction = self.transaction(id).ok_or(LedgerError::UnknownTransaction)?;
        let sender = self.person(self.account(transaction.sender_account())?.owner())?;
        let receiver = self.person(self.account(transaction.receiver_account())?.owner())?;
        Ok(TransactionDisplay {
            transaction,
            sender,
            receiver,
        })
    }

    fn record_atm(&mut self, account: AccountId, amount: Money) -> TransactionId {
        let transaction =
            self.push_transaction(Transaction::atm(account, amount, self.business_date()));
        let bank = self.accounts[account.0].bank();
        self.accounts[account.0].record(transaction);
        self.banks[bank.0].record(transaction);
        transaction
    }

    fn push_transaction(&mut self, transaction: Transaction) -> TransactionId {
        self.transactions.push(transaction);
        TransactionId(self.transactions.len() - 1)
    }
}

fn total(amounts: impl IntoIterator<Item = Money>) -> LedgerResult<Money> {
    amounts
        .into_iter()
        .try_fold(Money::ZERO, |sum, amount| sum.checked_add(amount))
        .ok_or_else(|| LedgerError::InvalidAmount("turnover overflows".to_string()))
}

pub struct TransactionDisplay<'a> {
    transaction: &'a Transaction,
    sender: &'a Person,
    receiver: &'a Person,
}

impl Display for TransactionDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.transaction.is_from_atm() {
            write!(f, "({} €) ATM", self.transaction.amount())
        } else {
            write!(
                f,
                "({} €) {} -> {}",
                self.transaction.amount(),
                self.sender,
                self.receiver
            )
        }
    }
}
