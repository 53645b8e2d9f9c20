//! Campaign Domain Concerns

pub mod catalog;
pub mod metrics;
pub mod promotions;
pub mod users;
