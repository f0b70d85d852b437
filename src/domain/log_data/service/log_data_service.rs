use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::core::persistence::database::backing_store_trait::BackingStore;
use crate::core::persistence::database::trusted_table::{ERROR_LOG_TABLE, ERROR_LOG_TIMESTAMP};
use crate::core::persistence::database::RowRecord;
use crate::core::persistence::dump::paginated_dump::dump_table;
use crate::core::state::log_buffer::log_buffer_trait::LogBuffer;
use crate::core::state::log_buffer::log_entry::LogEntry;
use crate::domain::log_data::dto::log_poll_request::LogPollRequest;
use crate::errors::{internal_error, AppError};

/// Selected by the `/logdata/{key}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDataMode {
    /// Tail the in-memory log buffer by ID cursor.
    Poll,
    /// Page backwards through the persisted error log.
    List,
}

impl LogDataMode {
    /// Only `poll` (any case) selects polling; any other key lists history.
    pub fn from_key(key: Option<&str>) -> Self {
        match key {
            Some(k) if k.eq_ignore_ascii_case("poll") => LogDataMode::Poll,
            _ => LogDataMode::List,
        }
    }
}

pub struct LogDataService<S: BackingStore, B: LogBuffer> {
    store: Arc<S>,
    buffer: Arc<B>,
}

impl<S: BackingStore, B: LogBuffer> LogDataService<S, B> {
    pub fn new(store: Arc<S>, buffer: Arc<B>) -> Self {
        Self { store, buffer }
    }

    /// Entries after the cursor; never touches the backing store.
    pub async fn poll(&self, req: LogPollRequest) -> Result<Vec<LogEntry>, AppError> {
        debug!(since_id = req.since_id, min_level = ?req.min_level, page_size = req.page_size, "Polling log buffer");

        self.buffer
            .entries_after(req.since_id, req.min_level, req.page_size as usize)
            .map_err(internal_error)
    }

    /// One page of the persisted error log, newest first.
    pub async fn list(
        &self,
        offset: Option<&str>,
        page_size: Option<&str>,
    ) -> Result<Vec<RowRecord>, AppError> {
        dump_table(
            self.store.as_ref(),
            ERROR_LOG_TABLE,
            Some(ERROR_LOG_TIMESTAMP),
            offset,
            page_size,
        )
    }

    /// Persists a failed request into the error log. Best effort.
    pub fn record_failure(&self, endpoint: &str, err: &AppError) {
        let message = format!("Request to {endpoint} failed");
        let exception = err.to_string();

        if let Err(e) = self
            .store
            .insert_error_log(None, &message, Some(&exception), Utc::now().timestamp())
        {
            warn!(error = %format!("{e:#}"), endpoint, "Could not persist request failure");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::persistence::database::backing_store_trait::DumpQuery;
    use crate::core::persistence::database::sqlite_store::SqliteStore;
    use crate::core::state::log_buffer::log_entry::Severity;
    use crate::core::state::log_buffer::memory_log_buffer::MemoryLogBuffer;
    use anyhow::{anyhow, Result};
    use std::sync::Mutex;

    /// Store that fails every read and remembers every write.
    #[derive(Default)]
    struct BrokenStore {
        recorded: Mutex<Vec<(String, Option<String>)>>,
    }

    impl BackingStore for BrokenStore {
        fn execute(&self, _query: &DumpQuery) -> Result<Vec<RowRecord>> {
            Err(anyhow!("database is locked"))
        }

        fn backup_tags(&self) -> Result<Vec<Vec<String>>> {
            Err(anyhow!("database is locked"))
        }

        fn insert_error_log(
            &self,
            _backup_id: Option<i64>,
            message: &str,
            exception: Option<&str>,
            _timestamp: i64,
        ) -> Result<()> {
            self.recorded
                .lock()
                .unwrap()
                .push((message.to_string(), exception.map(String::from)));
            Ok(())
        }
    }

    fn buffer_with(count: usize) -> Arc<MemoryLogBuffer> {
        let buffer = Arc::new(MemoryLogBuffer::new(1000));
        for i in 0..count {
            let level = if i % 2 == 0 { Severity::Information } else { Severity::Error };
            buffer.push(level, "test", format!("entry {i}"), None);
        }
        buffer
    }

    #[test]
    fn only_poll_selects_polling() {
        assert_eq!(LogDataMode::from_key(Some("poll")), LogDataMode::Poll);
        assert_eq!(LogDataMode::from_key(Some("POLL")), LogDataMode::Poll);
        assert_eq!(LogDataMode::from_key(Some("polling")), LogDataMode::List);
        assert_eq!(LogDataMode::from_key(Some("anything")), LogDataMode::List);
        assert_eq!(LogDataMode::from_key(None), LogDataMode::List);
    }

    #[tokio::test]
    async fn poll_with_garbage_page_size_returns_first_hundred() {
        let service = LogDataService::new(Arc::new(BrokenStore::default()), buffer_with(150));

        let req = LogPollRequest::from_raw(Some(""), Some("0"), Some("abc"));
        let entries = service.poll(req).await.unwrap();

        assert_eq!(entries.len(), 100);
        assert_eq!(entries.first().map(|e| e.id), Some(1));
        assert_eq!(entries.last().map(|e| e.id), Some(100));
    }

    #[tokio::test]
    async fn poll_filters_by_level() {
        let service = LogDataService::new(Arc::new(BrokenStore::default()), buffer_with(10));

        let req = LogPollRequest::from_raw(Some("error"), Some("2"), None);
        let entries = service.poll(req).await.unwrap();

        assert!(entries.iter().all(|e| e.level == Severity::Error && e.id > 2));
        assert_eq!(entries.len(), 4);
    }

    #[tokio::test]
    async fn list_pages_the_error_log() {
        let store = Arc::new(SqliteStore::new_in_memory().unwrap());
        for ts in 1..=15 {
            store.insert_error_log(Some(3), "failed", None, ts).unwrap();
        }
        let service = LogDataService::new(store, buffer_with(0));

        let rows = service.list(Some("not-a-number"), Some("2")).await.unwrap();
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0]["Timestamp"].as_i64(), Some(15));

        let rows = service.list(Some("6"), None).await.unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0]["Timestamp"].as_i64(), Some(5));
    }

    #[tokio::test]
    async fn store_failure_is_fatal_and_recorded() {
        let store = Arc::new(BrokenStore::default());
        let service = LogDataService::new(store.clone(), buffer_with(0));

        let err = service.list(None, None).await.unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(_)));

        service.record_failure("/api/v1/logdata", &err);
        let recorded = store.recorded.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].0, "Request to /api/v1/logdata failed");
        assert!(recorded[0].1.as_deref().unwrap().contains("database is locked"));
    }
}
