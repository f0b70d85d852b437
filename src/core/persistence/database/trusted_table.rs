use tracing::warn;

use crate::errors::AppError;

pub const ERROR_LOG_TABLE: &str = "ErrorLog";
pub const ERROR_LOG_TIMESTAMP: &str = "Timestamp";

/// A table that may be dumped, with the columns it may be paged by.
#[derive(Debug)]
pub struct TrustedTable {
    pub name: &'static str,
    pub ordering_fields: &'static [&'static str],
}

/// Every identifier that reaches dump SQL must come from here.
pub const TRUSTED_TABLES: &[TrustedTable] = &[TrustedTable {
    name: ERROR_LOG_TABLE,
    ordering_fields: &[ERROR_LOG_TIMESTAMP],
}];

/// Table and optional ordering column, both checked against [`TRUSTED_TABLES`].
///
/// Only [`DumpTarget::resolve`] builds one, so holding a `DumpTarget` means the
/// identifiers are safe to splice into SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpTarget {
    table: &'static str,
    ordering_field: Option<&'static str>,
}

impl DumpTarget {
    pub fn resolve(table: &str, ordering_field: Option<&str>) -> Result<Self, AppError> {
        let Some(trusted) = TRUSTED_TABLES.iter().find(|t| t.name == table) else {
            warn!(table, "Rejected dump of untrusted table");
            return Err(AppError::UntrustedIdentifier(format!("table {table}")));
        };

        let ordering_field = match ordering_field.filter(|f| !f.is_empty()) {
            None => None,
            Some(field) => match trusted.ordering_fields.iter().find(|f| **f == field) {
                Some(f) => Some(*f),
                None => {
                    warn!(table, field, "Rejected dump ordered by untrusted column");
                    return Err(AppError::UntrustedIdentifier(format!(
                        "column {field} of table {table}"
                    )));
                }
            },
        };

        Ok(Self {
            table: trusted.name,
            ordering_field,
        })
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn ordering_field(&self) -> Option<&'static str> {
        self.ordering_field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_error_log_by_timestamp() {
        let target = DumpTarget::resolve("ErrorLog", Some("Timestamp")).unwrap();
        assert_eq!(target.table(), "ErrorLog");
        assert_eq!(target.ordering_field(), Some("Timestamp"));
    }

    #[test]
    fn empty_ordering_field_means_unordered() {
        let target = DumpTarget::resolve("ErrorLog", Some("")).unwrap();
        assert_eq!(target.ordering_field(), None);
    }

    #[test]
    fn rejects_unknown_identifiers() {
        assert!(matches!(
            DumpTarget::resolve("Backup\"; DROP TABLE Backup; --", None),
            Err(AppError::UntrustedIdentifier(_))
        ));
        assert!(matches!(
            DumpTarget::resolve("ErrorLog", Some("Message")),
            Err(AppError::UntrustedIdentifier(_))
        ));
    }
}
