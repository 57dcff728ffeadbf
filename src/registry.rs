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

//! Thread-safe account number registry.
//!
//! Issues random 8-digit account numbers and guarantees that no number is
//! handed out twice by the same registry. The registry only remembers issued
//! numbers; it holds no reference to the accounts that own them.

use crate::AccountError;
use crate::base::AccountNumber;
use dashmap::DashSet;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Registry of issued account numbers.
///
/// Uses a [`DashSet`] so the uniqueness check and the insert are a single
/// atomic operation, which keeps numbers unique when accounts are opened from
/// several threads.
#[derive(Debug)]
pub struct AccountNumberRegistry {
    /// Numbers handed out so far. Never shrinks.
    issued: DashSet<AccountNumber>,

    /// Source of candidate numbers.
    rng: Mutex<StdRng>,

    /// Candidates are drawn from `0..space`.
    space: u32,
}

impl AccountNumberRegistry {
    /// Random draws tried before falling back to a linear scan.
    const MAX_RANDOM_ATTEMPTS: u32 = 64;

    /// Creates an empty registry seeded from system entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy(), AccountNumber::SPACE)
    }

    /// Creates an empty registry that issues a reproducible sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed), AccountNumber::SPACE)
    }

    fn from_rng(rng: StdRng, space: u32) -> Self {
        Self {
            issued: DashSet::new(),
            rng: Mutex::new(rng),
            space,
        }
    }

    /// Issues a fresh account number.
    ///
    /// Draws uniformly random candidates and retries on collision. After
    /// [`Self::MAX_RANDOM_ATTEMPTS`] collisions in a row the registry is dense
    /// enough that it scans forward from a random start for a free number.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::AllocationExhausted`] when every number in the
    /// space has already been issued.
    pub fn allocate(&self) -> Result<AccountNumber, AccountError> {
        for attempt in 0..Self::MAX_RANDOM_ATTEMPTS {
            if self.is_full() {
                return Err(AccountError::AllocationExhausted);
            }
            let candidate = self.draw();
            // Insert-if-absent; `false` means someone already holds it.
            if self.issued.insert(candidate) {
                return Ok(candidate);
            }
            debug!(attempt, "account number collision, retrying");
        }

        let start = self.rng.lock().gen_range(0..self.space);
        for offset in 0..self.space {
            let candidate = AccountNumber((start + offset) % self.space);
            if self.issued.insert(candidate) {
                return Ok(candidate);
            }
        }
        Err(AccountError::AllocationExhausted)
    }

    /// Returns `true` if the number has been issued by this registry.
    pub fn contains(&self, number: &AccountNumber) -> bool {
        self.issued.contains(number)
    }

    /// Number of issued account numbers.
    pub fn len(&self) -> usize {
        self.issued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }

    fn is_full(&self) -> bool {
        self.issued.len() >= self.space as usize
    }

    // `space` never exceeds `AccountNumber::SPACE`, so every draw fits 8 digits.
    fn draw(&self) -> AccountNumber {
        AccountNumber(self.rng.lock().gen_range(0..self.space))
    }
}

impl Default for AccountNumberRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl AccountNumberRegistry {
    /// Registry restricted to the first `space` numbers, for exhaustion tests.
    pub(crate) fn with_space(space: u32, seed: u64) -> Self {
        assert!(space <= AccountNumber::SPACE);
        Self::from_rng(StdRng::seed_from_u64(seed), space)
    }
}
