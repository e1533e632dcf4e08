/**
 * Fixed point money with four digits past the point.
 *
 * Amounts are plain i64 counts of ten thousandths, so sums over a
 * statement are exact. Sums go through `checked_add` only. Parsing
 * accepts "12", "12.5" and "-0.0001"; anything more precise than four
 * fraction digits is rejected rather than rounded.
 */
use std::{
    fmt::Display,
    ops::{Neg, Sub},
    str::FromStr,
};

use thiserror::Error;

const FIXED_POINT_MAGNITUDE: i64 = 10000;
const EXPECTED_PRECISION: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("amount is empty")]
    Empty,
    #[error("amount contains more than one dot: {0}")]
    TooManyDots(String),
    #[error("amount exceeds four digits past the point: {0}")]
    TooPrecise(String),
    #[error("amount is not a number: {0}")]
    NotANumber(String),
    #[error("amount is out of range: {0}")]
    OutOfRange(String),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_units(units: i64) -> Money {
        Money(units * FIXED_POINT_MAGNITUDE)
    }

    pub fn from_fixed_point(ten_thousandths: i64) -> Money {
        Money(ten_thousandths)
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;
    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let string = string.trim();
        if string.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (negative, unsigned) = match string.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, string.strip_prefix('+').unwrap_or(string)),
        };

        let mut split_amount = unsigned.split('.');
        let integer_part = split_amount.next().unwrap_or_default();
        let fraction_part = split_amount.next().unwrap_or_default();
        if split_amount.next().is_some() {
            return Err(MoneyParseError::TooManyDots(string.to_owned()));
        }
        if integer_part.is_empty() && fraction_part.is_empty() {
            return Err(MoneyParseError::NotANumber(string.to_owned()));
        }
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(integer_part) || !all_digits(fraction_part) {
            return Err(MoneyParseError::NotANumber(string.to_owned()));
        }

        let digits = fraction_part.len();
        if digits > EXPECTED_PRECISION {
            return Err(MoneyParseError::TooPrecise(string.to_owned()));
        }

        let out_of_range = || MoneyParseError::OutOfRange(string.to_owned());
        let units: i64 = if integer_part.is_empty() {
            0
        } else {
            integer_part.parse().map_err(|_| out_of_range())?
        };
        let mut ten_thousandths: i64 = if fraction_part.is_empty() {
            0
        } else {
            fraction_part.parse().map_err(|_| out_of_range())?
        };
        ten_thousandths *= 10i64.pow((EXPECTED_PRECISION - digits) as u32);

        let magnitude = units
            .checked_mul(FIXED_POINT_MAGNITUDE)
            .and_then(|whole| whole.checked_add(ten_thousandths))
            .ok_or_else(out_of_range)?;

        Ok(Money(if negative { -magnitude } else { magnitude }))
    }
}

/**
 * Trailing zeros are trimmed, so whole amounts print without a point.
 */
impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let units = magnitude / FIXED_POINT_MAGNITUDE as u64;
        let ten_thousandths = magnitude % FIXED_POINT_MAGNITUDE as u64;
        if ten_thousandths == 0 {
            return write!(f, "{}{}", sign, units);
        }
        let fraction = format!("{:0>4}", ten_thousandths);
        write!(f, "{}{}.{}", sign, units, fraction.trim_end_matches('0'))
    }
}
