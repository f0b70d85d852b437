use anyhow::Result;

use super::log_entry::{LogEntry, Severity};

/// Read side of the log collector.
///
/// Implementations own ordering and thread-safety; callers only read.
pub trait LogBuffer {
    /// Entries with `ID > id` and `Type >= min_level`, ascending by ID, at most `max_count`.
    fn entries_after(&self, id: i64, min_level: Severity, max_count: usize) -> Result<Vec<LogEntry>>;
}
