use diesel::prelude::*;

/// Diesel model representing the `kv_store` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::kv_store)]
pub struct KvEntry {
    pub key: String,
    pub value: String,
}

/// Insertable/patchable form of [`KvEntry`].
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::kv_store)]
pub struct NewKvEntry<'a> {
    pub key: &'a str,
    pub value: &'a str,
}
