use chrono::NaiveDate;

use crate::account::AccountId;
use crate::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransactionId(pub(crate) usize);

/**
 * A single movement of money, never changed after it is recorded.
 *
 * ATM deposits and withdrawals have the same sender and receiver and
 * carry the direction in the sign of the amount. Transfers always have
 * a positive amount and two distinct accounts.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    amount: Money,
    date: NaiveDate,
    sender: AccountId,
    receiver: AccountId,
    is_from_atm: bool,
}

impl Transaction {
    pub(crate) fn atm(account: AccountId, amount: Money, date: NaiveDate) -> Transaction {
        Transaction {
            amount,
            date,
            sender: account,
            receiver: account,
            is_from_atm: true,
        }
    }

    pub(crate) fn transfer(
        sender: AccountId,
        receiver: AccountId,
        amount: Money,
        date: NaiveDate,
    ) -> Transaction {
        Transaction {
            amount,
            date,
            sender,
            receiver,
            is_from_atm: false,
        }
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn sender_account(&self) -> AccountId {
        self.sender
    }

    pub fn receiver_account(&self) -> AccountId {
        self.receiver
    }

    pub fn is_from_atm(&self) -> bool {
        self.is_from_atm
    }

    pub fn is_within(&self, from_date: NaiveDate, to_date: NaiveDate) -> bool {
        from_date <= self.date && self.date <= to_date
    }

    /// Money that came into `account`: ATM deposits and received transfers.
    pub fn incoming_for(&self, account: AccountId) -> Money {
        if self.is_from_atm {
            if self.amount.is_positive() {
                return self.amount;
            }
        } else if self.receiver == account {
            return self.amount;
        }
        Money::ZERO
    }

    /// Money that left `account`, as a non-positive amount.
    pub fn outgoing_for(&self, account: AccountId) -> Money {
        if self.is_from_atm {
            if self.amount.is_negative() {
                return self.amount;
            }
        } else if self.sender == account {
            return -self.amount;
        }
        Money::ZERO
    }
}
