//! Storage layer for the ledger. Provides the in-memory balance store
//! ([`LedgerStore`]), the only place balances are ever mutated.
//!
//! Current implementation keeps everything in process memory; nothing
//! survives a restart.

mod accounts;

pub use accounts::LedgerStore;
