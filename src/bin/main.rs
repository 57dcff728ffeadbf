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

use bank_account_rs::{AccountCategory, AccountError, AccountNumber, AccountNumberRegistry, Bank};
use clap::Parser;
use csv::{ReaderBuilder, Trim, Writer};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use std::process;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Bank Account - Run an account operations script
///
/// Reads operations from a CSV file, logs confirmations to stderr and writes
/// the final account statements to stdout.
#[derive(Parser, Debug)]
#[command(name = "bank-account-rs")]
#[command(about = "Runs account operation scripts and prints statements", long_about = None)]
struct Args {
    /// Path to CSV file with operations
    ///
    /// Expected format: type,holder,category,amount
    /// Example: cargo run -- operations.csv > statements.csv
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Seed for reproducible account numbers
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let file = match File::open(&args.input) {
        Ok(f) => f,
        Err(e) => {
            error!("Error opening file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    let registry = match args.seed {
        Some(seed) => AccountNumberRegistry::with_seed(seed),
        None => AccountNumberRegistry::new(),
    };

    let bank = match run_script(BufReader::new(file), Bank::with_registry(registry)) {
        Ok(bank) => bank,
        Err(e) => {
            error!("Error processing operations: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = write_statements(&bank, std::io::stdout()) {
        error!("Error writing output: {}", e);
        process::exit(1);
    }
}

/// Raw CSV record matching the input format.
///
/// Fields: `type, holder, category, amount`
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(rename = "type")]
    op: String,
    #[serde(default)]
    holder: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    amount: Option<Decimal>,
}

/// A single script step.
#[derive(Debug, PartialEq, Eq)]
enum Operation {
    Open {
        holder: String,
        category: AccountCategory,
    },
    Deposit {
        holder: String,
        amount: Decimal,
    },
    Withdraw {
        holder: String,
        amount: Decimal,
    },
    /// Interest for one holder, or for every account when `holder` is `None`.
    Interest {
        holder: Option<String>,
    },
    Statement {
        holder: String,
    },
}

impl CsvRecord {
    /// Converts a CSV record to an [`Operation`].
    ///
    /// Returns `None` for unknown operation types or missing required fields.
    fn into_operation(self) -> Option<Operation> {
        let holder = self.holder;

        match self.op.to_lowercase().as_str() {
            "open" => {
                let category = match self.category.as_deref() {
                    None | Some("") => AccountCategory::default(),
                    Some(raw) => raw.parse().ok()?,
                };
                Some(Operation::Open { holder, category })
            }
            "deposit" => Some(Operation::Deposit {
                holder,
                amount: self.amount?,
            }),
            "withdraw" | "withdrawal" => Some(Operation::Withdraw {
                holder,
                amount: self.amount?,
            }),
            "interest" => Some(Operation::Interest {
                holder: (!holder.is_empty()).then_some(holder),
            }),
            "statement" => Some(Operation::Statement { holder }),
            _ => None,
        }
    }
}

/// Reasons a script step is skipped.
#[derive(Debug, Error)]
enum ScriptError {
    #[error("no account opened for holder '{0}'")]
    UnknownHolder(String),

    #[error(transparent)]
    Account(#[from] AccountError),
}

fn lookup(
    accounts: &HashMap<String, AccountNumber>,
    holder: &str,
) -> Result<AccountNumber, ScriptError> {
    accounts
        .get(holder)
        .copied()
        .ok_or_else(|| ScriptError::UnknownHolder(holder.to_string()))
}

/// Applies one operation. Accounts are addressed by holder name within a
/// script; `accounts` maps each name to the number it was opened with.
fn apply(
    bank: &Bank,
    accounts: &mut HashMap<String, AccountNumber>,
    operation: Operation,
) -> Result<(), ScriptError> {
    match operation {
        Operation::Open { holder, category } => {
            if accounts.contains_key(&holder) {
                warn!(%holder, "holder already has an account in this script, skipping");
                return Ok(());
            }
            let number = bank.open_account(holder.clone(), category)?;
            accounts.insert(holder, number);
        }
        Operation::Deposit { holder, amount } => {
            bank.deposit(&lookup(accounts, &holder)?, amount)?;
        }
        Operation::Withdraw { holder, amount } => {
            bank.withdraw(&lookup(accounts, &holder)?, amount)?;
        }
        Operation::Interest { holder: None } => {
            bank.apply_monthly_interest();
        }
        Operation::Interest {
            holder: Some(holder),
        } => {
            let number = lookup(accounts, &holder)?;
            let account = bank
                .get_account(&number)
                .ok_or(AccountError::AccountNotFound(number))?;
            account.add_interest();
        }
        Operation::Statement { holder } => {
            let number = lookup(accounts, &holder)?;
            let account = bank
                .get_account(&number)
                .ok_or(AccountError::AccountNotFound(number))?;
            info!("--- {}'s statement ---\n{}", holder, account.statement());
        }
    }
    Ok(())
}

/// Run an operations script from a CSV reader.
///
/// Rows are streamed one at a time. Malformed rows and failed operations are
/// logged and skipped.
///
/// # CSV Format
///
/// Expected columns: `type, holder, category, amount`
/// - `type`: Operation (open, deposit, withdraw, interest, statement)
/// - `holder`: Account holder name; addresses the account within the script
/// - `category`: `checking` or `savings` (open only, defaults to checking)
/// - `amount`: Decimal amount (deposit and withdraw only)
///
/// An `interest` row with an empty holder credits interest to every account.
///
/// # Example
///
/// ```csv
/// type,holder,category,amount
/// open,Tina Belcher,checking,
/// deposit,Tina Belcher,,100000
/// interest,,,
/// withdraw,Tina Belcher,,50
/// ```
///
/// # Errors
///
/// Returns a CSV error if the reader fails or the CSV structure is invalid.
pub fn run_script<R: Read>(reader: R, bank: Bank) -> Result<Bank, csv::Error> {
    let mut accounts = HashMap::new();

    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    for result in rdr.deserialize::<CsvRecord>() {
        match result {
            Ok(record) => {
                let Some(operation) = record.into_operation() else {
                    debug!("Skipping invalid operation record");
                    continue;
                };

                if let Err(e) = apply(&bank, &mut accounts, operation) {
                    warn!("Skipping operation: {}", e);
                }
            }
            Err(e) => {
                debug!("Skipping malformed row: {}", e);
                continue;
            }
        }
    }

    Ok(bank)
}

/// Write account statements to a CSV writer, ordered by account number.
///
/// # CSV Format
///
/// Columns: `category, holder, account, balance`
///
/// ```csv
/// category,holder,account,balance
/// checking,Tina Belcher,****5678,100033.00
/// ```
///
/// # Errors
///
/// Returns a CSV error if writing fails.
pub fn write_statements<W: Write>(bank: &Bank, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);

    for statement in bank.statements() {
        wtr.serialize(&statement)?;
    }

    wtr.flush()?;
    Ok(())
}
