use crate::core::state::log_buffer::log_entry::Severity;
use crate::core::util::paging::{parse_i64, POLL_PAGE_BOUNDS};

/// Incremental log poll: entries newer than `since_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogPollRequest {
    pub since_id: i64,
    pub min_level: Severity,
    pub page_size: i64,
}

impl LogPollRequest {
    /// Never fails: bad `id` reads as 0, bad `level` as the lowest tier,
    /// bad `pagesize` (including anything outside `i32`) as 100, then
    /// clamped to `[1, 500]`.
    pub fn from_raw(level: Option<&str>, id: Option<&str>, page_size: Option<&str>) -> Self {
        Self {
            since_id: parse_i64(id).unwrap_or(0),
            min_level: Severity::parse_lenient(level),
            page_size: POLL_PAGE_BOUNDS.page_size_i32(page_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_poll_uses_defaults() {
        let req = LogPollRequest::from_raw(Some(""), Some("0"), Some("abc"));
        assert_eq!(
            req,
            LogPollRequest {
                since_id: 0,
                min_level: Severity::Profiling,
                page_size: 100,
            }
        );

        let req = LogPollRequest::from_raw(None, Some("last"), None);
        assert_eq!(req.since_id, 0);
        assert_eq!(req.page_size, 100);
    }

    #[test]
    fn parses_well_formed_values() {
        let req = LogPollRequest::from_raw(Some("warning"), Some("42"), Some("900"));
        assert_eq!(req.since_id, 42);
        assert_eq!(req.min_level, Severity::Warning);
        assert_eq!(req.page_size, 500);
    }

    #[test]
    fn page_size_overflowing_int_falls_back_to_default() {
        let req = LogPollRequest::from_raw(None, None, Some("3000000000"));
        assert_eq!(req.page_size, 100);

        // the cursor is 64-bit and keeps large values
        let req = LogPollRequest::from_raw(None, Some("3000000000"), None);
        assert_eq!(req.since_id, 3_000_000_000);
    }
}
