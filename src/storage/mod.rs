//! Key-value storage media the movie store persists into.
//!
//! A medium maps string keys to string values and knows nothing about movies.
//! [`DieselStorage`] keeps entries in a SQLite table; [`MemoryStorage`] keeps
//! them in process memory and serves as the fake for tests.

use thiserror::Error;

pub mod memory;
pub mod sqlite;

pub use self::memory::MemoryStorage;
pub use self::sqlite::DieselStorage;

/// Failures raised by a storage medium.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("storage query error: {0}")]
    Query(#[from] diesel::result::Error),
    #[error("storage migration failed: {0}")]
    Migration(String),
    #[error("storage lock poisoned")]
    Poisoned,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Synchronous string key-value medium.
pub trait KeyValueStorage {
    /// Read the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
}
