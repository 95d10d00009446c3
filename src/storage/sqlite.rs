use diesel::prelude::*;

use crate::db::{DbConnection, DbPool};
use crate::models::kv_entry::{KvEntry, NewKvEntry};
use crate::storage::{KeyValueStorage, StorageResult};

/// Storage medium backed by the `kv_store` SQLite table.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the medium to be
/// passed around freely between handlers.
#[derive(Clone)]
pub struct DieselStorage {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselStorage {
    /// Create a new medium from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> StorageResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

impl KeyValueStorage for DieselStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        use crate::schema::kv_store;

        let mut conn = self.conn()?;

        let entry = kv_store::table
            .find(key)
            .select(KvEntry::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(entry.map(|entry| entry.value))
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        use crate::schema::kv_store;

        let mut conn = self.conn()?;
        let entry = NewKvEntry { key, value };

        diesel::insert_into(kv_store::table)
            .values(&entry)
            .on_conflict(kv_store::key)
            .do_update()
            .set(kv_store::value.eq(value))
            .execute(&mut conn)?;

        Ok(())
    }
}
