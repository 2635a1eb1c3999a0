//! Loading of initial account balances.
//!
//! Two file formats are accepted, chosen by extension:
//! - `.json`: an array of `{"name": ..., "balance": ...}` objects
//! - `.csv`: a `name,balance` header followed by one account per row
//!
//! Seeds are validated before they reach the store: names must be
//! non-empty and unique, and no balance may start out negative.

use rust_decimal::Decimal;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

use crate::csv_utils::read_csv;
use crate::Account;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("unsupported seed file format: {0}")]
    UnsupportedFormat(String),
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed JSON seed file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed CSV seed file: {0}")]
    Csv(#[from] csv::Error),
    #[error("account name must not be empty")]
    EmptyName,
    #[error("duplicate account: {name}")]
    DuplicateAccount { name: String },
    #[error("initial balance of {name} is negative")]
    NegativeBalance { name: String },
}

/// Reads and validates initial balances from `path`.
pub fn load_accounts(path: impl AsRef<Path>) -> Result<Vec<Account>, SeedError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let accounts: Vec<Account> = match extension.as_deref() {
        Some("json") => {
            let reader = BufReader::new(File::open(path)?);
            serde_json::from_reader(reader)?
        }
        Some("csv") => read_csv::<Account, _>(path)?.collect::<Result<Vec<_>, _>>()?,
        _ => return Err(SeedError::UnsupportedFormat(path.display().to_string())),
    };

    validate(&accounts)?;
    Ok(accounts)
}

/// Checks a seed list for empty names, duplicates and negative balances.
pub fn validate(accounts: &[Account]) -> Result<(), SeedError> {
    let mut seen = HashSet::with_capacity(accounts.len());
    for account in accounts {
        if account.name.is_empty() {
            return Err(SeedError::EmptyName);
        }
        if account.balance < Decimal::ZERO {
            return Err(SeedError::NegativeBalance {
                name: account.name.clone(),
            });
        }
        if !seen.insert(account.name.as_str()) {
            return Err(SeedError::DuplicateAccount {
                name: account.name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_load_json() {
        let accounts = load_accounts("data/initial_balances.json").unwrap();
        assert_eq!(
            accounts,
            vec![Account::new("Mark", dec!(100)), Account::new("Jane", dec!(50))]
        );
    }

    #[test]
    fn test_load_csv() {
        let accounts = load_accounts("data/example_balances.csv").unwrap();
        assert_eq!(accounts.len(), 3);
        assert_eq!(accounts[2], Account::new("Anna", dec!(0)));
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(matches!(
            load_accounts("data/initial_balances.yaml"),
            Err(SeedError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_accounts("data/does_not_exist.json"),
            Err(SeedError::Io(_))
        ));
    }

    #[test]
    fn test_validate_rejects_negative_balance() {
        let accounts = [Account::new("Mark", dec!(-1))];
        assert!(matches!(
            validate(&accounts),
            Err(SeedError::NegativeBalance { name }) if name == "Mark"
        ));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let accounts = [Account::new("Mark", dec!(1)), Account::new("Mark", dec!(2))];
        assert!(matches!(
            validate(&accounts),
            Err(SeedError::DuplicateAccount { name }) if name == "Mark"
        ));
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let accounts = [Account::new("", dec!(1))];
        assert!(matches!(validate(&accounts), Err(SeedError::EmptyName)));
    }

    #[test]
    fn test_validate_accepts_zero_balance() {
        let accounts = [Account::new("Anna", dec!(0))];
        assert!(validate(&accounts).is_ok());
    }
}
