//! Storage layer: store traits, a PostgreSQL backend and an in-memory backend.

mod memory;
mod pool;
mod repositories;
mod store;

pub use memory::MemoryStore;
pub use pool::{create_pool, DbPool};
pub use repositories::PgStore;
pub use store::{AccountStore, MovieStore};
