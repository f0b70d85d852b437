//! Backing store: query contract, SQLite adapter, trusted identifiers

pub mod backing_store_trait;
pub mod sqlite_store;
pub mod trusted_table;

/// One returned row; keys keep the store's column order.
pub type RowRecord = serde_json::Map<String, serde_json::Value>;
