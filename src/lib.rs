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

//! # Bank Account
//!
//! This library models a single-process bank account ledger: opening accounts
//! with unique 8-digit numbers, deposits, withdrawals with an overdraft fee,
//! monthly interest, and masked statements.
//!
//! ## Core Components
//!
//! - [`BankAccount`]: Account entity with deposit, withdraw, interest and statement operations
//! - [`AccountNumberRegistry`]: Issues unique account numbers
//! - [`Bank`]: Accounts indexed by number, with a monthly interest cycle
//! - [`AccountError`]: Error types for account operations
//!
//! ## Example
//!
//! ```
//! use bank_account_rs::{AccountCategory, AccountNumberRegistry, BankAccount};
//! use rust_decimal_macros::dec;
//!
//! let registry = AccountNumberRegistry::new();
//! let account = BankAccount::open(&registry, "Tina Belcher", AccountCategory::Checking).unwrap();
//!
//! account.deposit(dec!(100000.00)).unwrap();
//! account.add_interest();
//! account.withdraw(dec!(50.00)).unwrap();
//! assert_eq!(account.balance(), dec!(100033.00));
//!
//! let statement = account.statement();
//! assert!(statement.masked_number().starts_with("****"));
//! assert_eq!(statement.formatted_balance(), "$100033.00");
//! ```
//!
//! ## Logging
//!
//! Operations emit [`tracing`] events. Install a subscriber to see them; the
//! library never prints.

pub mod account;
mod bank;
mod base;
pub mod error;
mod registry;
pub mod statement;

pub use account::BankAccount;
pub use bank::Bank;
pub use base::{AccountCategory, AccountNumber, ParseAccountNumberError};
pub use error::AccountError;
pub use registry::AccountNumberRegistry;
pub use statement::{Confirmation, Movement, Statement, format_currency};
