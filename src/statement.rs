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

//! Human-readable records produced by account operations.
//!
//! Operations return these as plain values. Callers decide whether to log,
//! print or serialize them.

use crate::base::{AccountCategory, AccountNumber};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};
use std::fmt;

/// Decimal places shown for currency amounts.
pub const CURRENCY_PRECISION: u32 = 2;

/// Formats an amount as `$1234.50`, rounded to the cent.
pub fn format_currency(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(CURRENCY_PRECISION))
}

/// Kind of balance movement a [`Confirmation`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Movement {
    Deposit,
    Withdrawal,
    Interest,
}

/// Result of a successful deposit, withdrawal or interest accrual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub movement: Movement,
    /// Amount credited or debited, excluding any overdraft fee.
    pub amount: Decimal,
    /// Fee charged because the withdrawal exceeded the balance.
    pub overdraft_fee: Option<Decimal>,
    /// Balance after the operation.
    pub balance: Decimal,
}

impl Confirmation {
    pub fn overdrawn(&self) -> bool {
        self.overdraft_fee.is_some()
    }
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.movement {
            Movement::Deposit => "Amount deposited",
            Movement::Withdrawal => "Amount withdrawn",
            Movement::Interest => "Interest added",
        };
        write!(
            f,
            "{}: {}, New balance: {}",
            label,
            format_currency(self.amount),
            format_currency(self.balance)
        )
    }
}

/// Point-in-time account statement with the account number masked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    category: AccountCategory,
    holder_name: String,
    masked_number: String,
    balance: Decimal,
}

impl Statement {
    pub(crate) fn new(
        category: AccountCategory,
        holder_name: &str,
        number: &AccountNumber,
        balance: Decimal,
    ) -> Self {
        Self {
            category,
            holder_name: holder_name.to_string(),
            masked_number: number.masked(),
            balance,
        }
    }

    pub fn category(&self) -> AccountCategory {
        self.category
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    /// Account number with the first 4 digits replaced by `****`.
    pub fn masked_number(&self) -> &str {
        &self.masked_number
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Balance rendered as `$x.xx`.
    pub fn formatted_balance(&self) -> String {
        format_currency(self.balance)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Account type: {}", self.category)?;
        writeln!(f, "Account name: {}", self.holder_name)?;
        writeln!(f, "Account number: {}", self.masked_number)?;
        write!(f, "Account balance: {}", self.formatted_balance())
    }
}

impl Serialize for Statement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Statement", 4)?;
        state.serialize_field("category", &self.category)?;
        state.serialize_field("holder", &self.holder_name)?;
        state.serialize_field("account", &self.masked_number)?;
        state.serialize_field(
            "balance",
            &format!("{:.2}", self.balance.round_dp(CURRENCY_PRECISION)),
        )?;
        state.end()
    }
}
