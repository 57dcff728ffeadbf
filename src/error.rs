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

//! Error types for account operations.

use crate::base::AccountNumber;
use thiserror::Error;

/// Account operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// Amount is negative
    #[error("invalid amount (must not be negative)")]
    InvalidAmount,

    /// Holder name is empty or blank
    #[error("holder name must not be empty")]
    InvalidHolderName,

    /// Every 8-digit account number has been issued
    #[error("no unused account number remains")]
    AllocationExhausted,

    /// No account with this number is held by the bank
    #[error("account {} not found", .0.masked())]
    AccountNotFound(AccountNumber),
}
