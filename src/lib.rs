//! Promotion lifecycle and performance metrics.
//!
//! Promotions discount a set of catalog products over a date range. Their
//! display status is derived on demand, deletion goes through a recoverable
//! trash with a retention window, and per-product inventory samples feed a
//! performance report driven by a simulated sales feed.

pub mod clock;
pub mod config;
pub mod context;
pub mod database;
pub mod domain;
pub mod locks;
pub mod observability;
pub mod store;
pub mod uuids;

#[cfg(test)]
mod test;
