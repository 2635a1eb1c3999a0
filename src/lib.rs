pub mod api;
mod csv_utils;
mod dto;
mod engine;
mod error;
pub mod metrics;
mod runner;
pub mod seed;
pub mod settings;
pub mod stores;

pub use dto::{Account, TransferRequest, TransferResponse};
pub use engine::TransferEngine;
pub use error::Error;
pub use runner::{run, run_async};
pub use stores::LedgerStore;
