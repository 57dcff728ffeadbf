// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Core value types: account numbers and account categories.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An 8-digit account number.
///
/// Stored as a `u32` below 10^8 and always rendered zero-padded, so
/// `AccountNumber(42)` displays as `00000042`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountNumber(pub(crate) u32);

impl AccountNumber {
    /// Number of digits in every account number.
    pub const DIGITS: usize = 8;

    /// Count of distinct account numbers (10^8).
    pub const SPACE: u32 = 100_000_000;

    const MASK: &'static str = "****";

    /// Wraps a raw value, returning `None` if it needs more than 8 digits.
    pub fn new(value: u32) -> Option<Self> {
        (value < Self::SPACE).then_some(Self(value))
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Display form with all but the trailing 4 digits masked.
    pub fn masked(&self) -> String {
        let digits = self.to_string();
        format!("{}{}", Self::MASK, &digits[Self::DIGITS - 4..])
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08}", self.0)
    }
}

/// Error returned when parsing a string that is not exactly 8 ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAccountNumberError(String);

impl fmt::Display for ParseAccountNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid account number '{}' (expected 8 digits)", self.0)
    }
}

impl std::error::Error for ParseAccountNumberError {}

impl FromStr for AccountNumber {
    type Err = ParseAccountNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != Self::DIGITS || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseAccountNumberError(s.to_string()));
        }
        s.parse::<u32>()
            .map(Self)
            .map_err(|_| ParseAccountNumberError(s.to_string()))
    }
}

impl TryFrom<String> for AccountNumber {
    type Error = ParseAccountNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccountNumber> for String {
    fn from(number: AccountNumber) -> Self {
        number.to_string()
    }
}

/// Account category. Fixed at creation and selects the interest rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountCategory {
    #[default]
    Checking,
    Savings,
}

impl AccountCategory {
    /// Multiplier applied to the balance on each monthly accrual.
    pub fn monthly_rate(&self) -> Decimal {
        match self {
            Self::Checking => dec!(0.00083),
            Self::Savings => dec!(0.001),
        }
    }
}

impl fmt::Display for AccountCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checking => write!(f, "checking"),
            Self::Savings => write!(f, "savings"),
        }
    }
}

impl FromStr for AccountCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "checking" => Ok(Self::Checking),
            "savings" => Ok(Self::Savings),
            other => Err(format!("unknown account category '{other}'")),
        }
    }
}
