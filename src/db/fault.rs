//! Fetch faults and their classification.
//!
//! Data-access code should say what went wrong through [`FaultKind`]. Only
//! faults that arrive as [`FaultKind::Unknown`] fall back to matching marker
//! substrings in the driver's message, which is best-effort: it depends on
//! wording the driver never promised to keep.

use thiserror::Error;

use crate::db::types::ErrorCategory;

/// What the data-access layer knows about a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    Timeout,
    Connection,
    Structure,
    /// No structured signal; classify by message.
    Unknown,
}

/// A fault raised while fetching rows. The message is operator-only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct QueryFault {
    kind: FaultKind,
    message: String,
}

impl QueryFault {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Timeout, message)
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Connection, message)
    }

    pub fn structure(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Structure, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Unknown, message)
    }

    pub fn kind(&self) -> FaultKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Structured kind wins; `Unknown` falls back to [`classify_message`].
    pub fn category(&self) -> ErrorCategory {
        match self.kind {
            FaultKind::Timeout => ErrorCategory::Timeout,
            FaultKind::Connection => ErrorCategory::Connection,
            FaultKind::Structure => ErrorCategory::Structure,
            FaultKind::Unknown => classify_message(&self.message),
        }
    }
}

/// Marker table, checked in order. First match wins.
const MARKERS: &[(&[&str], ErrorCategory)] = &[
    (&["timeout", "ETIMEDOUT"], ErrorCategory::Timeout),
    (&["connection", "ECONNREFUSED"], ErrorCategory::Connection),
    (&["column", "schema"], ErrorCategory::Structure),
];

/// Classify a raw fault description by marker substrings (case-sensitive).
pub fn classify_message(description: &str) -> ErrorCategory {
    MARKERS
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| description.contains(n)))
        .map(|(_, category)| *category)
        .unwrap_or(ErrorCategory::Query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_classification() {
        assert_eq!(classify_message("connect ETIMEDOUT 10.0.0.1:443"), ErrorCategory::Timeout);
        assert_eq!(classify_message("statement timeout"), ErrorCategory::Timeout);
        assert_eq!(classify_message("connect ECONNREFUSED 127.0.0.1:8080"), ErrorCategory::Connection);
        assert_eq!(classify_message("lost connection to server"), ErrorCategory::Connection);
        assert_eq!(classify_message("no such column: created_at"), ErrorCategory::Structure);
        assert_eq!(classify_message("schema has changed"), ErrorCategory::Structure);
        assert_eq!(classify_message("SQLite error: no such table: test_table"), ErrorCategory::Query);
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(classify_message("timeout while reading schema"), ErrorCategory::Timeout);
        assert_eq!(classify_message("connection reset: bad column"), ErrorCategory::Connection);
        assert_eq!(classify_message("ECONNREFUSED after timeout"), ErrorCategory::Timeout);
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        assert_eq!(classify_message("Connection refused"), ErrorCategory::Query);
        assert_eq!(classify_message("TIMEOUT"), ErrorCategory::Query);
    }

    #[test]
    fn test_structured_kind_overrides_message() {
        let fault = QueryFault::connection("timeout reading column");
        assert_eq!(fault.category(), ErrorCategory::Connection);

        let fault = QueryFault::structure("anything at all");
        assert_eq!(fault.category(), ErrorCategory::Structure);

        let fault = QueryFault::unknown("timeout reading column");
        assert_eq!(fault.category(), ErrorCategory::Timeout);
    }

    #[test]
    fn test_display_is_raw_message() {
        let fault = QueryFault::unknown("HTTP 500: boom");
        assert_eq!(fault.to_string(), "HTTP 500: boom");
        assert_eq!(fault.kind(), FaultKind::Unknown);
    }
}
