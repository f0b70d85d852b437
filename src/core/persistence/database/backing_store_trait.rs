use anyhow::Result;

use super::trusted_table::DumpTarget;
use super::RowRecord;

/// `SELECT * FROM table [WHERE field < offset] [ORDER BY field DESC] LIMIT n`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpQuery {
    pub target: DumpTarget,
    pub offset: Option<i64>,
    pub limit: i64,
}

impl DumpQuery {
    /// The `field < offset` filter; applies only when the target is ordered.
    pub fn offset_filter(&self) -> Option<(&'static str, i64)> {
        match (self.target.ordering_field(), self.offset) {
            (Some(field), Some(offset)) => Some((field, offset)),
            _ => None,
        }
    }
}

/// Server database as seen by the web API.
pub trait BackingStore {
    /// Runs a table dump; rows come back in store iteration order.
    fn execute(&self, query: &DumpQuery) -> Result<Vec<RowRecord>>;

    /// Tag lists of every stored backup.
    fn backup_tags(&self) -> Result<Vec<Vec<String>>>;

    /// Appends to the persisted error log.
    fn insert_error_log(
        &self,
        backup_id: Option<i64>,
        message: &str,
        exception: Option<&str>,
        timestamp: i64,
    ) -> Result<()>;
}
