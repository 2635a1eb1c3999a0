//! Prometheus counters for the HTTP surface, rendered in the text
//! exposition format at `GET /metrics`.

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

use crate::Error;

/// Label value used for `code` when a transfer completes.
const NO_ERROR: &str = "none";

#[derive(Clone)]
pub struct TransferMetrics {
    registry: Registry,
    transfers: IntCounterVec,
    invalid_requests: IntCounterVec,
}

impl TransferMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let transfers = IntCounterVec::new(
            Opts::new("remit_transfers_total", "Transfers by outcome and error code"),
            &["outcome", "code"],
        )?;
        let invalid_requests = IntCounterVec::new(
            Opts::new(
                "remit_invalid_requests_total",
                "Transfer requests rejected before reaching the ledger",
            ),
            &["route"],
        )?;
        registry.register(Box::new(transfers.clone()))?;
        registry.register(Box::new(invalid_requests.clone()))?;

        Ok(Self {
            registry,
            transfers,
            invalid_requests,
        })
    }

    pub fn record_transfer(&self, outcome: Result<(), &Error>) {
        let labels = match outcome {
            Ok(()) => ["completed", NO_ERROR],
            Err(err) => ["rejected", err.code()],
        };
        self.transfers.with_label_values(&labels).inc();
    }

    pub fn record_invalid_request(&self, route: &str) {
        self.invalid_requests.with_label_values(&[route]).inc();
    }

    /// Current values in the Prometheus text format.
    pub fn render(&self) -> prometheus::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|err| prometheus::Error::Msg(err.to_string()))
    }
}
