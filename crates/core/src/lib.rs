//! Pure domain logic for the nginwho v1 -> v2 migration.
//!
//! No database access, no async, no I/O.

pub mod attribute;
pub mod date;
pub mod dimension;
pub mod error;
pub mod log_record;
pub mod progress;
pub mod types;
pub mod validation;
