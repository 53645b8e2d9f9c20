//! Promotions

pub mod data;
mod errors;
pub mod lifecycle;
pub mod records;
mod repository;
pub mod service;
pub mod status;
pub mod validation;

pub use errors::{LifecycleError, PromotionsServiceError, ValidationError};
pub use repository::*;
pub use service::*;
