//! Generic paginated table dump.
//!
//! Pages walk backwards: rows strictly older than the offset, newest first.
//! Rows inserted at the head after a page was fetched never shift later pages.

use crate::core::persistence::database::backing_store_trait::{BackingStore, DumpQuery};
use crate::core::persistence::database::trusted_table::DumpTarget;
use crate::core::persistence::database::RowRecord;
use crate::core::util::paging::{PageRequest, DUMP_PAGE_BOUNDS};
use crate::errors::{database_error, AppError};

/// Dumps one page of `table`.
///
/// `table` and `ordering_field` are checked against the trusted table list;
/// `offset` and `page_size` are raw query strings and never fail.
pub fn dump_table<S: BackingStore + ?Sized>(
    store: &S,
    table: &str,
    ordering_field: Option<&str>,
    offset: Option<&str>,
    page_size: Option<&str>,
) -> Result<Vec<RowRecord>, AppError> {
    let target = DumpTarget::resolve(table, ordering_field)?;
    let page = PageRequest::parse(offset, page_size, DUMP_PAGE_BOUNDS);

    let query = DumpQuery {
        target,
        offset: page.offset,
        limit: page.page_size,
    };

    store.execute(&query).map_err(database_error)
}
