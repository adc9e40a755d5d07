//! Repository layer: one zero-sized struct per table family with async
//! query methods.

pub mod dimension_repo;
pub mod fact_repo;
pub mod source_log_repo;

pub use dimension_repo::DimensionRepo;
pub use fact_repo::FactRepo;
pub use source_log_repo::SourceLogRepo;
