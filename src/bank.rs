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

//! Collection of accounts sharing one number registry.
//!
//! The [`Bank`] opens accounts, looks them up by number and runs the monthly
//! interest cycle over all of them.
//!
//! # Thread Safety
//!
//! Accounts live in a [`DashMap`] and each account guards its own balance, so
//! operations on different accounts proceed in parallel.

use crate::account::BankAccount;
use crate::base::{AccountCategory, AccountNumber};
use crate::registry::AccountNumberRegistry;
use crate::statement::{Confirmation, Statement};
use crate::AccountError;
use dashmap::DashMap;
use rust_decimal::Decimal;
use tracing::info;

/// Accounts indexed by account number.
pub struct Bank {
    registry: AccountNumberRegistry,
    accounts: DashMap<AccountNumber, BankAccount>,
}

impl Bank {
    /// Creates a bank with no accounts and an entropy-seeded registry.
    pub fn new() -> Self {
        Self::with_registry(AccountNumberRegistry::new())
    }

    /// Creates a bank that allocates numbers from `registry`.
    pub fn with_registry(registry: AccountNumberRegistry) -> Self {
        Bank {
            registry,
            accounts: DashMap::new(),
        }
    }

    /// Opens a new account and returns its number.
    ///
    /// # Errors
    ///
    /// - [`AccountError::InvalidHolderName`] - Holder name is empty or blank.
    /// - [`AccountError::AllocationExhausted`] - No account number left.
    pub fn open_account(
        &self,
        holder_name: impl Into<String>,
        category: AccountCategory,
    ) -> Result<AccountNumber, AccountError> {
        let account = BankAccount::open(&self.registry, holder_name, category)?;
        let number = account.account_number();
        self.accounts.insert(number, account);
        Ok(number)
    }

    /// Deposits into the account with the given number.
    ///
    /// # Errors
    ///
    /// - [`AccountError::AccountNotFound`] - No such account.
    /// - [`AccountError::InvalidAmount`] - Amount is negative.
    pub fn deposit(
        &self,
        number: &AccountNumber,
        amount: Decimal,
    ) -> Result<Confirmation, AccountError> {
        self.account(number)?.deposit(amount)
    }

    /// Withdraws from the account with the given number.
    ///
    /// # Errors
    ///
    /// - [`AccountError::AccountNotFound`] - No such account.
    /// - [`AccountError::InvalidAmount`] - Amount is negative.
    pub fn withdraw(
        &self,
        number: &AccountNumber,
        amount: Decimal,
    ) -> Result<Confirmation, AccountError> {
        self.account(number)?.withdraw(amount)
    }

    /// Credits one month of interest to every account. Returns how many
    /// accounts were credited.
    pub fn apply_monthly_interest(&self) -> usize {
        let mut credited = 0;
        for account in self.accounts.iter() {
            account.add_interest();
            credited += 1;
        }
        info!(accounts = credited, "monthly interest applied");
        credited
    }

    /// Statements for every account, ordered by account number.
    pub fn statements(&self) -> Vec<Statement> {
        let mut accounts: Vec<_> = self
            .accounts
            .iter()
            .map(|account| (*account.key(), account.statement()))
            .collect();
        accounts.sort_by_key(|(number, _)| *number);
        accounts.into_iter().map(|(_, statement)| statement).collect()
    }

    /// Returns an iterator over all accounts.
    pub fn accounts(
        &self,
    ) -> impl Iterator<Item = dashmap::mapref::multiple::RefMulti<'_, AccountNumber, BankAccount>>
    {
        self.accounts.iter()
    }

    /// Retrieves an account by number.
    ///
    /// Returns `None` if this bank holds no account with that number.
    pub fn get_account(
        &self,
        number: &AccountNumber,
    ) -> Option<dashmap::mapref::one::Ref<'_, AccountNumber, BankAccount>> {
        self.accounts.get(number)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn account(
        &self,
        number: &AccountNumber,
    ) -> Result<dashmap::mapref::one::Ref<'_, AccountNumber, BankAccount>, AccountError> {
        self.get_account(number)
            .ok_or(AccountError::AccountNotFound(*number))
    }
}

impl Default for Bank {
    fn default() -> Self {
        Self::new()
    }
}
