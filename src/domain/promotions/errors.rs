//! Promotions service errors.

use jiff::civil::Date;
use thiserror::Error;

use crate::{domain::catalog::records::ProductUuid, store::StoreError};

/// Malformed promotion input. Raised before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must be at least {min} characters")]
    NameTooShort { min: usize },

    #[error("description must be at least {min} characters")]
    DescriptionTooShort { min: usize },

    #[error("discount percentage {0} is outside 1..=100")]
    DiscountOutOfRange(u8),

    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: Date, end: Date },

    #[error("start date {start} is before today ({today})")]
    StartInPast { start: Date, today: Date },

    #[error("a promotion needs at least one product")]
    NoProducts,

    #[error("product {0} is listed more than once")]
    DuplicateProduct(ProductUuid),
}

/// A lifecycle transition attempted from a state that forbids it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("promotion is already in the trash")]
    AlreadyDeleted,

    #[error("promotion is not in the trash")]
    NotDeleted,

    #[error("live promotions cannot be purged; delete it first")]
    PurgeWhileLive,
}

#[derive(Debug, Error)]
pub enum PromotionsServiceError {
    #[error("promotion already exists")]
    AlreadyExists,

    #[error("promotion not found")]
    NotFound,

    #[error("invalid promotion")]
    Validation(#[from] ValidationError),

    #[error("invalid promotion state")]
    InvalidState(#[from] LifecycleError),

    #[error("storage error")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for PromotionsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            StoreError::AlreadyExists => Self::AlreadyExists,
            error => Self::Storage(error),
        }
    }
}
