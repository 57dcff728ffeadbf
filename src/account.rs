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

//! Bank account management.
//!
//! Withdrawals are never rejected for lack of funds. When the amount exceeds
//! the balance a flat overdraft fee is charged first and the withdrawal still
//! goes through:
//!
//! ```text
//! balance_new = balance_old - OVERDRAFT_FEE - amount
//! ```
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use bank_account_rs::{AccountCategory, AccountNumberRegistry, BankAccount};
//!
//! let registry = AccountNumberRegistry::new();
//! let account = BankAccount::open(&registry, "Tina Belcher", AccountCategory::Checking).unwrap();
//! assert_eq!(account.balance(), dec!(0.00));
//!
//! account.deposit(dec!(40.00)).unwrap();
//! account.withdraw(dec!(50.00)).unwrap();
//! assert_eq!(account.balance(), dec!(-20.00));
//! ```

use crate::AccountError;
use crate::base::{AccountCategory, AccountNumber};
use crate::registry::AccountNumberRegistry;
use crate::statement::{CURRENCY_PRECISION, Confirmation, Movement, Statement, format_currency};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{info, warn};

#[derive(Debug)]
struct AccountData {
    balance: Decimal,
}

impl AccountData {
    fn new() -> Self {
        Self {
            balance: Decimal::ZERO,
        }
    }

    /// Increases the balance.
    fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if amount < Decimal::ZERO {
            return Err(AccountError::InvalidAmount);
        }
        self.balance += amount;
        Ok(())
    }

    /// Decreases the balance, charging the overdraft fee first if the amount
    /// exceeds it. Returns the fee charged, if any.
    fn withdraw(&mut self, amount: Decimal) -> Result<Option<Decimal>, AccountError> {
        if amount < Decimal::ZERO {
            return Err(AccountError::InvalidAmount);
        }
        let fee = if amount > self.balance {
            self.balance -= BankAccount::OVERDRAFT_FEE;
            Some(BankAccount::OVERDRAFT_FEE)
        } else {
            None
        };
        self.balance -= amount;
        Ok(fee)
    }

    /// Credits one month of interest, rounded to the cent. Returns the
    /// interest credited.
    fn accrue_interest(&mut self, monthly_rate: Decimal) -> Decimal {
        let interest = (self.balance * monthly_rate).round_dp(CURRENCY_PRECISION);
        self.balance += interest;
        interest
    }
}

/// Bank account owned by a single holder.
///
/// The account number, holder name and category are fixed at creation. Only
/// the balance changes, and only through [`deposit`](Self::deposit),
/// [`withdraw`](Self::withdraw) and [`add_interest`](Self::add_interest).
#[derive(Debug)]
pub struct BankAccount {
    number: AccountNumber,
    holder_name: String,
    category: AccountCategory,
    inner: Mutex<AccountData>,
}

impl BankAccount {
    /// Flat fee charged when a withdrawal exceeds the balance.
    pub const OVERDRAFT_FEE: Decimal = dec!(10);

    /// Opens an account with a zero balance and a fresh number from `registry`.
    ///
    /// # Errors
    ///
    /// - [`AccountError::InvalidHolderName`] - Holder name is empty or blank.
    /// - [`AccountError::AllocationExhausted`] - Registry has no number left.
    pub fn open(
        registry: &AccountNumberRegistry,
        holder_name: impl Into<String>,
        category: AccountCategory,
    ) -> Result<Self, AccountError> {
        let holder_name = holder_name.into();
        if holder_name.trim().is_empty() {
            return Err(AccountError::InvalidHolderName);
        }

        let number = registry.allocate()?;
        info!(account = %number.masked(), %category, "account opened");

        Ok(Self {
            number,
            holder_name,
            category,
            inner: Mutex::new(AccountData::new()),
        })
    }

    /// Opens a checking account.
    pub fn open_checking(
        registry: &AccountNumberRegistry,
        holder_name: impl Into<String>,
    ) -> Result<Self, AccountError> {
        Self::open(registry, holder_name, AccountCategory::Checking)
    }

    /// Full, unmasked account number.
    pub fn account_number(&self) -> AccountNumber {
        self.number
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn category(&self) -> AccountCategory {
        self.category
    }

    pub fn balance(&self) -> Decimal {
        self.inner.lock().balance
    }

    /// Logs the formatted balance and returns it.
    pub fn report_balance(&self) -> Decimal {
        let balance = self.balance();
        info!(
            account = %self.number.masked(),
            "Account balance: {}",
            format_currency(balance)
        );
        balance
    }

    /// Deposits `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidAmount`] if `amount` is negative. The
    /// balance is left unchanged.
    pub fn deposit(&self, amount: Decimal) -> Result<Confirmation, AccountError> {
        let mut data = self.inner.lock();
        data.deposit(amount)?;

        let confirmation = Confirmation {
            movement: Movement::Deposit,
            amount,
            overdraft_fee: None,
            balance: data.balance,
        };
        info!(account = %self.number.masked(), "{confirmation}");
        Ok(confirmation)
    }

    /// Withdraws `amount`, charging [`Self::OVERDRAFT_FEE`] first if the
    /// amount exceeds the current balance.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidAmount`] if `amount` is negative. The
    /// balance is left unchanged.
    pub fn withdraw(&self, amount: Decimal) -> Result<Confirmation, AccountError> {
        let mut data = self.inner.lock();
        let overdraft_fee = data.withdraw(amount)?;

        if let Some(fee) = overdraft_fee {
            warn!(
                account = %self.number.masked(),
                fee = %format_currency(fee),
                "Insufficient funds"
            );
        }
        let confirmation = Confirmation {
            movement: Movement::Withdrawal,
            amount,
            overdraft_fee,
            balance: data.balance,
        };
        info!(account = %self.number.masked(), "{confirmation}");
        Ok(confirmation)
    }

    /// Credits one month of interest at the category's monthly rate.
    ///
    /// Each call is one month; repeated calls compound. A negative balance
    /// accrues negative interest.
    pub fn add_interest(&self) -> Confirmation {
        let mut data = self.inner.lock();
        let interest = data.accrue_interest(self.category.monthly_rate());

        let confirmation = Confirmation {
            movement: Movement::Interest,
            amount: interest,
            overdraft_fee: None,
            balance: data.balance,
        };
        info!(account = %self.number.masked(), "{confirmation}");
        confirmation
    }

    /// Statement with the account number masked.
    pub fn statement(&self) -> Statement {
        Statement::new(
            self.category,
            &self.holder_name,
            &self.number,
            self.balance(),
        )
    }
}
