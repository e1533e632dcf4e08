use std::fmt::Display;

use chrono::NaiveDate;

use crate::error::LedgerResult;
use crate::ledger::Ledger;
use crate::money::Money;

/**
 * Balances and turnovers of every account within a date window, followed
 * by each bank's own transaction list.
 *
 * The account section is plain CSV so it can be piped elsewhere.
 */
pub struct Report<'a> {
    ledger: &'a Ledger,
    from_date: NaiveDate,
    to_date: NaiveDate,
}

impl<'a> Report<'a> {
    pub fn new(ledger: &'a Ledger, from_date: NaiveDate, to_date: NaiveDate) -> Report<'a> {
        Report {
            ledger,
            from_date,
            to_date,
        }
    }

    /// Covers every date the ledger can hold.
    pub fn unbounded(ledger: &'a Ledger) -> Report<'a> {
        Report::new(ledger, NaiveDate::MIN, NaiveDate::MAX)
    }
}

/// A turnover too large to represent is reported in place, not as a failed report.
fn turnover_cell(turnover: LedgerResult<Money>) -> String {
    match turnover {
        Ok(amount) => amount.to_string(),
        Err(_) => "overflow".to_string(),
    }
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ledger = self.ledger;
        let (from, to) = (self.from_date, self.to_date);

        writeln!(f, "bank,account,owner,balance,debit,credit,net,closed")?;
        for (id, account) in ledger.accounts() {
            let bank = ledger.bank(account.bank()).map_err(|_| std::fmt::Error)?;
            let owner = ledger.person(account.owner()).map_err(|_| std::fmt::Error)?;
            let debit = turnover_cell(ledger.get_debit_turnover(id, from, to));
            let credit = turnover_cell(ledger.get_credit_turnover(id, from, to));
            let net = turnover_cell(ledger.get_net_turnover(id, from, to));
            writeln!(
                f,
                "{},{},{},{},{},{},{},{}",
                bank,
                account,
                owner,
                account.balance(),
                debit,
                credit,
                net,
                account.is_closed()
            )?;
        }

        for (_, bank) in ledger.banks() {
            writeln!(f)?;
            writeln!(f, "[{}]", bank)?;
            for id in bank.transactions() {
                let transaction = ledger.transaction(*id).ok_or(std::fmt::Error)?;
                if !transaction.is_within(from, to) {
                    continue;
                }
                let description = ledger.describe(*id).map_err(|_| std::fmt::Error)?;
                writeln!(f, "{} {}", transaction.date(), description)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn ledger() -> Ledger {
        let mut ledger = Ledger::default();
        ledger.set_business_date(day(1));
        let lhv = ledger.add_bank("LHV");
        let seb = ledger.add_bank("SEB");
        let ann = ledger.add_person("Ann", "Lee", 30).unwrap();
        let bob = ledger.add_person("Bob", "Kask", 40).unwrap();
        ledger.add_customer(lhv, ann).unwrap();
        ledger.add_customer(seb, bob).unwrap();
        let ann_account = ledger.person(ann).unwrap().account().unwrap();
        let bob_account = ledger.person(bob).unwrap().account().unwrap();
        ledger.deposit(ann_account, Money::from_units(100)).unwrap();
        ledger.set_business_date(day(2));
        ledger
            .transfer(ann_account, bob_account, Money::from_units(50))
            .unwrap();
        ledger
    }

    #[test]
    fn unbounded_report() {
        let ledger = ledger();
        assert_eq!(
            Report::unbounded(&ledger).to_string(),
            "bank,account,owner,balance,debit,credit,net,closed\n\
             LHV,EE000000000000000001,Ann Lee,45,100,-50,50,false\n\
             SEB,EE000000000000000002,Bob Kask,50,50,0,50,false\n\
             \n\
             [LHV]\n\
             2024-03-01 (100 €) ATM\n\
             2024-03-02 (50 €) Ann Lee -> Bob Kask\n\
             \n\
             [SEB]\n\
             2024-03-02 (50 €) Ann Lee -> Bob Kask\n"
        );
    }

    #[test]
    fn overflowing_turnover_is_marked() {
        let mut ledger = Ledger::default();
        ledger.set_business_date(day(1));
        let bank = ledger.add_bank("LHV");
        let ann = ledger.add_person("Ann", "Lee", 30).unwrap();
        ledger.add_customer(bank, ann).unwrap();
        let account = ledger.person(ann).unwrap().account().unwrap();
        let half = Money::from_fixed_point(i64::MAX / 2 + 1);
        ledger.deposit(account, half).unwrap();
        ledger.withdraw(account, half).unwrap();
        ledger.deposit(account, half).unwrap();

        let report = Report::unbounded(&ledger).to_string();
        assert!(report.contains(&format!(
            "LHV,EE000000000000000001,Ann Lee,{},overflow,-{},overflow,false\n",
            half, half
        )));
    }

    #[test]
    fn window_limits_turnovers_and_transactions() {
        let ledger = ledger();
        let report = Report::new(&ledger, day(1), day(1)).to_string();
        assert!(report.contains("LHV,EE000000000000000001,Ann Lee,45,100,0,100,false\n"));
        assert!(report.contains("SEB,EE000000000000000002,Bob Kask,50,0,0,0,false\n"));
        assert!(!report.contains("->"));
    }
}
