//! SQLite backing store
//!
//! Thread-safe via internal Mutex (SQLite Connection is not Sync).
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE Backup (
//!     ID INTEGER PRIMARY KEY,
//!     Name TEXT NOT NULL,
//!     Description TEXT,
//!     Tags TEXT NOT NULL DEFAULT '',
//!     TargetURL TEXT,
//!     DBPath TEXT
//! );
//! CREATE TABLE ErrorLog (
//!     BackupID INTEGER,
//!     Message TEXT NOT NULL,
//!     Exception TEXT,
//!     Timestamp INTEGER NOT NULL
//! );
//! ```
//!
//! `Backup.Tags` holds a comma-separated list. `ErrorLog.Timestamp` is Unix seconds.

use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Context, Result};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection};
use serde_json::Value;
use tracing::debug;

use crate::config::split_list;

use super::backing_store_trait::{BackingStore, DumpQuery};
use super::RowRecord;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (creating if needed) a file-based database
    pub fn new(path: &str) -> Result<Self> {
        if path == ":memory:" {
            return Self::new_in_memory();
        }

        if let Some(dir) = Path::new(path).parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create database directory {}", dir.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open SQLite database at {}", path))?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().context("Failed to create in-memory SQLite database")?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.lock()?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS Backup (
                ID INTEGER PRIMARY KEY,
                Name TEXT NOT NULL,
                Description TEXT,
                Tags TEXT NOT NULL DEFAULT '',
                TargetURL TEXT,
                DBPath TEXT
            );
            CREATE TABLE IF NOT EXISTS ErrorLog (
                BackupID INTEGER,
                Message TEXT NOT NULL,
                Exception TEXT,
                Timestamp INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_errorlog_timestamp ON ErrorLog(Timestamp);",
        )
        .context("Failed to initialize schema")?;

        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("SQLite connection mutex poisoned"))
    }

    /// Stores a backup definition, returns its ID
    pub fn insert_backup(&self, name: &str, tags: &[&str]) -> Result<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO Backup (Name, Tags) VALUES (?1, ?2)",
            params![name, tags.join(",")],
        )
        .context("Failed to insert backup")?;

        Ok(conn.last_insert_rowid())
    }
}

impl BackingStore for SqliteStore {
    fn execute(&self, query: &DumpQuery) -> Result<Vec<RowRecord>> {
        let sql = build_dump_sql(query);
        debug!(%sql, offset = ?query.offset, "Dumping table");

        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&sql)
            .with_context(|| format!("Failed to prepare dump of {}", query.target.table()))?;

        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = match query.offset_filter() {
            Some((_, offset)) => stmt.query(params![offset]),
            None => stmt.query([]),
        }
        .with_context(|| format!("Failed to dump {}", query.target.table()))?;

        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = RowRecord::new();
            for (i, name) in names.iter().enumerate() {
                record.insert(name.clone(), to_json(row.get_ref(i)?));
            }
            result.push(record);
        }

        Ok(result)
    }

    fn backup_tags(&self) -> Result<Vec<Vec<String>>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT Tags FROM Backup")?;

        let tags = stmt
            .query_map([], |row| row.get::<_, Option<String>>(0))?
            .map(|r| r.map(|t| t.as_deref().map(split_list).unwrap_or_default()))
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read backup tags")?;

        Ok(tags)
    }

    fn insert_error_log(
        &self,
        backup_id: Option<i64>,
        message: &str,
        exception: Option<&str>,
        timestamp: i64,
    ) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO ErrorLog (BackupID, Message, Exception, Timestamp) VALUES (?1, ?2, ?3, ?4)",
            params![backup_id, message, exception, timestamp],
        )
        .context("Failed to insert error log entry")?;

        Ok(())
    }
}

/// Identifiers come from a resolved `DumpTarget`; only the offset is bound.
fn build_dump_sql(query: &DumpQuery) -> String {
    let mut sql = format!("SELECT * FROM \"{}\"", query.target.table());

    if let Some((field, _)) = query.offset_filter() {
        sql.push_str(&format!(" WHERE \"{}\" < ?1", field));
    }

    if let Some(field) = query.target.ordering_field() {
        sql.push_str(&format!(" ORDER BY \"{}\" DESC", field));
    }

    sql.push_str(&format!(" LIMIT {}", query.limit));
    sql
}

fn to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::from(b.to_vec()),
    }
}
