use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ordered severity tiers, lowest first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Severity {
    #[default]
    Profiling,
    Verbose,
    Information,
    Warning,
    Error,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Profiling,
        Severity::Verbose,
        Severity::Information,
        Severity::Warning,
        Severity::Error,
    ];

    pub fn as_code(&self) -> &'static str {
        match self {
            Severity::Profiling => "Profiling",
            Severity::Verbose => "Verbose",
            Severity::Information => "Information",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }

    /// Case-insensitive tier name, or the tier's numeric index.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        if let Ok(index) = code.parse::<usize>() {
            return Self::ALL.get(index).copied();
        }

        Self::ALL
            .iter()
            .find(|s| s.as_code().eq_ignore_ascii_case(code))
            .copied()
    }

    /// Anything unrecognised means "no filtering" (the lowest tier).
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        raw.and_then(Self::from_code).unwrap_or_default()
    }
}

impl From<&tracing::Level> for Severity {
    fn from(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::ERROR => Severity::Error,
            tracing::Level::WARN => Severity::Warning,
            tracing::Level::INFO => Severity::Information,
            tracing::Level::DEBUG => Severity::Verbose,
            _ => Severity::Profiling,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogEntry {
    #[serde(rename = "ID")]
    pub id: i64,
    pub when: DateTime<Utc>,
    pub message: String,
    pub tag: String,
    #[serde(rename = "Type")]
    pub level: Severity,
    pub exception: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!(Severity::from_code("warning"), Some(Severity::Warning));
        assert_eq!(Severity::from_code("ERROR"), Some(Severity::Error));
        assert_eq!(Severity::from_code("Information"), Some(Severity::Information));
    }

    #[test]
    fn parses_numeric_tier_index() {
        assert_eq!(Severity::from_code("3"), Some(Severity::Warning));
        assert_eq!(Severity::from_code("9"), None);
    }

    #[test]
    fn lenient_parse_falls_back_to_lowest_tier() {
        assert_eq!(Severity::parse_lenient(None), Severity::Profiling);
        assert_eq!(Severity::parse_lenient(Some("")), Severity::Profiling);
        assert_eq!(Severity::parse_lenient(Some("loud")), Severity::Profiling);
        assert_eq!(Severity::parse_lenient(Some("-1")), Severity::Profiling);
    }

    #[test]
    fn tiers_are_ordered() {
        assert!(Severity::Profiling < Severity::Verbose);
        assert!(Severity::Information < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn entry_serializes_with_wire_names() {
        let entry = LogEntry {
            id: 7,
            when: DateTime::from_timestamp(0, 0).unwrap(),
            message: "started".into(),
            tag: "server".into(),
            level: Severity::Information,
            exception: None,
        };

        let v = serde_json::to_value(&entry).unwrap();
        assert_eq!(v["ID"], 7);
        assert_eq!(v["Type"], "Information");
        assert_eq!(v["When"], "1970-01-01T00:00:00Z");
        assert!(v["Exception"].is_null());
    }
}
