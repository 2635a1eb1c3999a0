use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::stores::LedgerStore;
use crate::{Account, Error, TransferRequest, TransferResponse};

/// Turns transfer requests into store calls and structured responses.
///
/// Holds no business rules of its own: request values are forwarded to the
/// [`LedgerStore`] as-is and every rejection comes from the store.
#[derive(Debug, Clone)]
pub struct TransferEngine {
    store: Arc<LedgerStore>,
}

impl TransferEngine {
    pub fn new(store: Arc<LedgerStore>) -> Self {
        Self { store }
    }

    /// Executes a transfer. On rejection the error carries the kind, and
    /// [`TransferResponse::rejected`] renders the matching failure body.
    pub fn execute_transfer(
        &self,
        request: &TransferRequest,
    ) -> Result<TransferResponse, Error> {
        info!(
            from = %request.from,
            to = %request.to,
            amount = %request.amount,
            "executing transfer request"
        );

        match self
            .store
            .transfer(&request.from, &request.to, request.amount)
        {
            Ok((from_balance, to_balance)) => Ok(TransferResponse::completed(
                request,
                from_balance,
                to_balance,
            )),
            Err(err) => {
                warn!(code = err.code(), error = %err, "transfer failed");
                Err(err)
            }
        }
    }

    pub fn get_all_accounts(&self) -> BTreeMap<String, Account> {
        self.store.get_all_accounts()
    }

    pub fn get_account(&self, name: &str) -> Option<Account> {
        self.store.get_account(name)
    }
}
