//! Persistence adapters. Implement the storage ports.

pub mod sqlite_storage;

pub use sqlite_storage::SqliteStorage;
