use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Error;

/// A named holder of a balance. Also the CSV row shape (`name,balance`)
/// for seed files and balance dumps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub name: String,
    pub balance: Decimal,
}

impl Account {
    pub fn new(name: impl Into<String>, balance: Decimal) -> Self {
        Self {
            name: name.into(),
            balance,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferRequest {
    pub from: String,
    pub to: String,
    pub amount: Decimal,
}

impl TransferRequest {
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: Decimal) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}

/// JSON body of a transfer outcome. Balances go out as JSON numbers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferResponse {
    pub success: bool,
    pub message: String,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub from_balance: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub to_balance: Option<Decimal>,
}

impl TransferResponse {
    pub fn completed(
        request: &TransferRequest,
        from_balance: Decimal,
        to_balance: Decimal,
    ) -> Self {
        Self {
            success: true,
            message: format!(
                "Successfully transferred {} from {} to {}",
                request.amount.normalize(),
                request.from,
                request.to
            ),
            from_balance: Some(from_balance),
            to_balance: Some(to_balance),
        }
    }

    pub fn rejected(error: &Error) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            from_balance: None,
            to_balance: None,
        }
    }
}
