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

//! BankAccount public API integration tests.

use bank_account_rs::{
    AccountCategory, AccountError, AccountNumberRegistry, BankAccount, Movement,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;

// === Helper Functions ===

fn checking(registry: &AccountNumberRegistry) -> BankAccount {
    BankAccount::open(registry, "Tina Belcher", AccountCategory::Checking).unwrap()
}

fn savings(registry: &AccountNumberRegistry) -> BankAccount {
    BankAccount::open(registry, "Louise Belcher", AccountCategory::Savings).unwrap()
}

fn funded(registry: &AccountNumberRegistry, amount: Decimal) -> BankAccount {
    let account = checking(registry);
    account.deposit(amount).unwrap();
    account
}

// === Opening Accounts ===

#[test]
fn new_account_has_zero_balance() {
    let registry = AccountNumberRegistry::new();
    let account = checking(&registry);
    assert_eq!(account.balance(), Decimal::ZERO);
    assert_eq!(account.holder_name(), "Tina Belcher");
    assert_eq!(account.category(), AccountCategory::Checking);
}

#[test]
fn open_checking_uses_checking_category() {
    let registry = AccountNumberRegistry::new();
    let account = BankAccount::open_checking(&registry, "Gene Belcher").unwrap();
    assert_eq!(account.category(), AccountCategory::Checking);
}

#[test]
fn account_number_is_eight_digits() {
    let registry = AccountNumberRegistry::new();
    let account = checking(&registry);
    let number = account.account_number().to_string();
    assert_eq!(number.len(), 8);
    assert!(number.chars().all(|c| c.is_ascii_digit()));
    assert!(registry.contains(&account.account_number()));
}

#[test]
fn accounts_with_same_holder_get_distinct_numbers() {
    let registry = AccountNumberRegistry::with_seed(11);
    let numbers: HashSet<_> = (0..1_000)
        .map(|_| checking(&registry).account_number())
        .collect();
    assert_eq!(numbers.len(), 1_000);
    assert_eq!(registry.len(), 1_000);
}

#[test]
fn empty_holder_name_is_rejected() {
    let registry = AccountNumberRegistry::new();
    let result = BankAccount::open(&registry, "", AccountCategory::Savings);
    assert_eq!(result.unwrap_err(), AccountError::InvalidHolderName);
}

// === Deposits ===

#[test]
fn deposit_on_zero_balance() {
    let registry = AccountNumberRegistry::new();
    let account = checking(&registry);
    let confirmation = account.deposit(dec!(100)).unwrap();

    assert_eq!(account.balance(), dec!(100.00));
    assert_eq!(confirmation.movement, Movement::Deposit);
    assert_eq!(confirmation.amount, dec!(100));
    assert_eq!(confirmation.balance, dec!(100.00));
    assert_eq!(
        confirmation.to_string(),
        "Amount deposited: $100.00, New balance: $100.00"
    );
}

#[test]
fn multiple_deposits_accumulate() {
    let registry = AccountNumberRegistry::new();
    let account = checking(&registry);
    account.deposit(dec!(100.00)).unwrap();
    account.deposit(dec!(50.00)).unwrap();
    account.deposit(dec!(25.50)).unwrap();
    assert_eq!(account.balance(), dec!(175.50));
}

#[test]
fn negative_deposit_returns_error() {
    let registry = AccountNumberRegistry::new();
    let account = funded(&registry, dec!(10));
    let result = account.deposit(dec!(-0.01));
    assert_eq!(result, Err(AccountError::InvalidAmount));
    assert_eq!(account.balance(), dec!(10));
}

#[test]
fn fractional_cents_are_kept_exactly() {
    let registry = AccountNumberRegistry::new();
    let account = checking(&registry);
    for _ in 0..10 {
        account.deposit(dec!(0.1)).unwrap();
    }
    assert_eq!(account.balance(), dec!(1.0));
}

// === Withdrawals ===

#[test]
fn withdrawal_with_sufficient_funds_has_no_fee() {
    let registry = AccountNumberRegistry::new();
    let account = funded(&registry, dec!(100000.00));
    let confirmation = account.withdraw(dec!(50)).unwrap();

    assert_eq!(account.balance(), dec!(99950.00));
    assert!(!confirmation.overdrawn());
    assert_eq!(confirmation.movement, Movement::Withdrawal);
}

#[test]
fn withdrawal_exceeding_balance_charges_fee() {
    let registry = AccountNumberRegistry::new();
    let account = funded(&registry, dec!(40.00));
    let confirmation = account.withdraw(dec!(50)).unwrap();

    assert_eq!(account.balance(), dec!(-20.00));
    assert_eq!(confirmation.overdraft_fee, Some(BankAccount::OVERDRAFT_FEE));
    assert_eq!(confirmation.amount, dec!(50));
    assert_eq!(
        confirmation.to_string(),
        "Amount withdrawn: $50.00, New balance: $-20.00"
    );
}

#[test]
fn withdrawal_of_exact_balance_has_no_fee() {
    let registry = AccountNumberRegistry::new();
    let account = funded(&registry, dec!(40.00));
    let confirmation = account.withdraw(dec!(40.00)).unwrap();
    assert_eq!(account.balance(), Decimal::ZERO);
    assert!(!confirmation.overdrawn());
}

#[test]
fn withdrawal_on_new_account_goes_negative() {
    let registry = AccountNumberRegistry::new();
    let account = checking(&registry);
    account.withdraw(dec!(5)).unwrap();
    assert_eq!(account.balance(), dec!(-15));
}

#[test]
fn negative_withdrawal_returns_error() {
    let registry = AccountNumberRegistry::new();
    let account = funded(&registry, dec!(10));
    let result = account.withdraw(dec!(-5));
    assert_eq!(result, Err(AccountError::InvalidAmount));
    assert_eq!(account.balance(), dec!(10));
}

#[test]
fn deposit_then_withdraw_restores_balance() {
    let registry = AccountNumberRegistry::new();
    let account = funded(&registry, dec!(123.45));
    account.deposit(dec!(67.891)).unwrap();
    account.withdraw(dec!(67.891)).unwrap();
    assert_eq!(account.balance(), dec!(123.45));
}

// === Interest ===

#[test]
fn checking_interest() {
    let registry = AccountNumberRegistry::new();
    let account = funded(&registry, dec!(100000.00));
    let confirmation = account.add_interest();

    assert_eq!(account.balance(), dec!(100083.00));
    assert_eq!(confirmation.movement, Movement::Interest);
    assert_eq!(confirmation.amount, dec!(83.00));
}

#[test]
fn savings_interest() {
    let registry = AccountNumberRegistry::new();
    let account = savings(&registry);
    account.deposit(dec!(600000.00)).unwrap();
    account.add_interest();
    assert_eq!(account.balance(), dec!(600600.00));
}

#[test]
fn repeated_interest_compounds() {
    let registry = AccountNumberRegistry::new();
    let account = savings(&registry);
    account.deposit(dec!(1000000)).unwrap();
    account.add_interest();
    account.add_interest();
    // 1000000 -> 1001000 -> 1002001
    assert_eq!(account.balance(), dec!(1002001.00));
}

#[test]
fn interest_on_overdrawn_account_is_negative() {
    let registry = AccountNumberRegistry::new();
    let account = savings(&registry);
    account.withdraw(dec!(990)).unwrap();
    assert_eq!(account.balance(), dec!(-1000));
    account.add_interest();
    assert_eq!(account.balance(), dec!(-1001));
}

#[test]
fn tina_example_sequence() {
    let registry = AccountNumberRegistry::new();
    let account = checking(&registry);
    account.deposit(dec!(100000)).unwrap();
    account.add_interest();
    account.withdraw(dec!(50)).unwrap();
    assert_eq!(account.statement().formatted_balance(), "$100033.00");
}

// === Statements ===

#[test]
fn statement_shows_masked_number() {
    let registry = AccountNumberRegistry::new();
    let account = savings(&registry);
    account.deposit(dec!(600000)).unwrap();
    let statement = account.statement();

    let full = account.account_number().to_string();
    assert_eq!(statement.masked_number(), format!("****{}", &full[4..]));
    assert_eq!(statement.category(), AccountCategory::Savings);
    assert_eq!(statement.holder_name(), "Louise Belcher");
    assert_eq!(statement.balance(), dec!(600000));
    assert_eq!(statement.formatted_balance(), "$600000.00");
}

#[test]
fn statement_does_not_change_balance() {
    let registry = AccountNumberRegistry::new();
    let account = funded(&registry, dec!(42));
    let _ = account.statement();
    assert_eq!(account.report_balance(), dec!(42));
    assert_eq!(account.balance(), dec!(42));
}
