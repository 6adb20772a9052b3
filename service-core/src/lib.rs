//! service-core: shared infrastructure for the eventos services.
pub mod config;
pub mod error;
pub mod observability;
