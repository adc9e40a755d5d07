//! `nginwho-migrate` library crate.
//!
//! Re-exports the migration driver for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod config;
pub mod error;
pub mod migration;
pub mod report;
