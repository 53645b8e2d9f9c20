//! Metrics service errors.

use thiserror::Error;

use crate::{domain::catalog::records::ProductUuid, store::StoreError};

#[derive(Debug, Error)]
pub enum MetricsServiceError {
    #[error("promotion not found")]
    PromotionNotFound,

    #[error("promotion has no products to track")]
    NoProducts,

    #[error("metrics are already initialised for this promotion")]
    AlreadyInitialized,

    #[error("metrics have not been initialised for this promotion")]
    NotInitialized,

    #[error("unknown product {0}")]
    UnknownProduct(ProductUuid),

    #[error("cannot sell {requested} units with {available} remaining")]
    InsufficientInventory { requested: u64, available: u64 },

    #[error("storage error")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for MetricsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::AlreadyExists => Self::AlreadyInitialized,
            error => Self::Storage(error),
        }
    }
}
