//! Row structs for the v1 source table and the v2 star schema.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching the
//! columns its repository selects.

pub mod dimension;
pub mod fact;
pub mod source_log;
