//! Repository implementations.

mod errors;
mod memory;
mod postgres;

pub use errors::StoreError;
pub use memory::MemoryStore;
pub use postgres::PgStore;
