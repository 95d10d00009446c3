#[cfg(feature = "server")]
pub mod config;
pub mod kv_entry;
