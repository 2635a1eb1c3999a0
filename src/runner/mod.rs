//! The runner replays a CSV file of transfers against a seeded engine and
//! writes the resulting balances, ordered by account name, to a writer.
//!
//! This module provides both a synchronous and an asynchronous runner implementations.
//!
mod async_runner;
mod sync_runner;

pub use async_runner::run as run_async;
pub use sync_runner::run;
