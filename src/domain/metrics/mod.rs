//! Promotion performance metrics.

pub mod aggregator;
mod errors;
pub mod records;
mod repository;
pub mod service;
pub mod simulator;

pub use errors::MetricsServiceError;
pub use repository::*;
pub use service::*;
