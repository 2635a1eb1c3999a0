//! Domain-specific errors for the ledger.
//!
//! Every variant is a terminal outcome of a single transfer:
//! - Account lookup failures (sender or receiver unknown)
//! - Request validation failures (self-transfer, non-positive amount)
//! - Balance rule violations (insufficient funds, overflow)
//!
//! Retrying the identical request against an unchanged ledger yields the
//! identical error, so none of these is treated as transient.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("account not found: {account}")]
    AccountNotFound { account: String },
    #[error("cannot transfer to the same account")]
    SelfTransfer,
    #[error("amount must be positive")]
    NonPositiveAmount,
    #[error("insufficient funds")]
    InsufficientFunds,
    #[error("receiver balance would overflow")]
    BalanceOverflow,
}

impl Error {
    pub(crate) fn account_not_found(account: &str) -> Self {
        Error::AccountNotFound {
            account: account.to_owned(),
        }
    }

    /// Stable machine-readable code for this error kind.
    pub const fn code(&self) -> &'static str {
        match self {
            Error::AccountNotFound { .. } => "ACCOUNT_NOT_FOUND",
            Error::SelfTransfer => "SELF_TRANSFER",
            Error::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Error::InsufficientFunds => "INSUFFICIENT_FUNDS",
            Error::BalanceOverflow => "BALANCE_OVERFLOW",
        }
    }
}
