//! Storage implementations.

pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::MemoryJobStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteJobStore;
