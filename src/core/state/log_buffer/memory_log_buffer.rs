use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use chrono::Utc;

use super::log_buffer_trait::LogBuffer;
use super::log_entry::{LogEntry, Severity};

/// Bounded ring of recent log entries.
///
/// IDs start at 1 and only grow, so a poller using `0` sees the whole ring and
/// a poller reusing the last returned ID never sees an entry twice.
pub struct MemoryLogBuffer {
    capacity: usize,
    ring: Mutex<Ring>,
}

struct Ring {
    next_id: i64,
    entries: VecDeque<LogEntry>,
}

impl MemoryLogBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            ring: Mutex::new(Ring {
                next_id: 1,
                entries: VecDeque::with_capacity(capacity),
            }),
        }
    }

    /// Appends an entry, evicting the oldest at capacity. Returns the new ID.
    ///
    /// Must not emit tracing events: it runs inside the subscriber.
    pub fn push(
        &self,
        level: Severity,
        tag: impl Into<String>,
        message: impl Into<String>,
        exception: Option<String>,
    ) -> Option<i64> {
        let mut ring = self.ring.lock().ok()?;

        let id = ring.next_id;
        ring.next_id += 1;

        if ring.entries.len() == self.capacity {
            ring.entries.pop_front();
        }

        ring.entries.push_back(LogEntry {
            id,
            when: Utc::now(),
            message: message.into(),
            tag: tag.into(),
            level,
            exception,
        });

        Some(id)
    }

    pub fn len(&self) -> usize {
        self.ring.lock().map(|r| r.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogBuffer for MemoryLogBuffer {
    fn entries_after(&self, id: i64, min_level: Severity, max_count: usize) -> Result<Vec<LogEntry>> {
        let ring = self
            .ring
            .lock()
            .map_err(|_| anyhow!("Log buffer mutex poisoned"))?;

        let start = ring.entries.partition_point(|e| e.id <= id);

        Ok(ring
            .entries
            .iter()
            .skip(start)
            .filter(|e| e.level >= min_level)
            .take(max_count)
            .cloned()
            .collect())
    }
}
