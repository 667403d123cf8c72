//! Account identifiers and money

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::{LedgerError, Result};

/// Minor units (cents) per whole unit of currency
pub const MINOR_PER_UNIT: u64 = 100;

/// Account number issued by the registry
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(pub u32);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(AccountId)
    }
}

/// Non-negative amount of money, stored as minor units.
///
/// Balances never go through binary floating point; text is parsed with
/// `rust_decimal` and must have at most two fractional digits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn from_minor(minor: u64) -> Self {
        Amount(minor)
    }

    /// Whole units, e.g. `Amount::from_units(40)` is `40.00`
    pub fn from_units(units: u64) -> Option<Self> {
        units.checked_mul(MINOR_PER_UNIT).map(Amount)
    }

    pub const fn minor(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }

    pub fn from_decimal(value: Decimal) -> Result<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }

        let minor = value
            .checked_mul(Decimal::from(MINOR_PER_UNIT))
            .ok_or(LedgerError::InvalidAmount)?;

        // Sub-cent precision is rejected rather than rounded
        if !minor.fract().is_zero() {
            return Err(LedgerError::InvalidAmount);
        }

        minor
            .to_u64()
            .map(Amount)
            .ok_or(LedgerError::InvalidAmount)
    }

}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / MINOR_PER_UNIT, self.0 % MINOR_PER_UNIT)
    }
}

impl FromStr for Amount {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        let value = Decimal::from_str(s.trim()).map_err(|_| LedgerError::InvalidAmount)?;
        Self::from_decimal(value)
    }
}
