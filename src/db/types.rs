//! Row, configuration and outcome types for the database status page.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::config::{DatabaseSettings, SecretSource};

/// Shown when credentials are missing.
pub const MSG_CONFIGURATION: &str = "Database configuration error. Please contact support.";
/// Shown for transport faults and for anything unclassified.
pub const MSG_CONNECTION: &str = "Unable to connect to database. Please try again later.";
/// Shown when the fetch ran out of time.
pub const MSG_TIMEOUT: &str = "Request timed out. Please try again.";
/// Shown when the result no longer has the expected shape.
pub const MSG_STRUCTURE: &str = "Unable to display data. The table structure may have changed.";
/// Informational text for a successful, zero-row result.
pub const MSG_EMPTY: &str = "The table is empty.";

/// One row of the status table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub id: i64,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Remote database location and credentials.
///
/// Built once at startup and shared read-only. Both fields are required;
/// a missing one means there is no config at all.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub token: String,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
        }
    }

    /// Look both secrets up. `None` if either is absent or blank.
    pub fn from_secrets(settings: &DatabaseSettings, secrets: &dyn SecretSource) -> Option<Self> {
        let url = secrets.get_secret(&settings.url_secret)?;
        let token = secrets.get_secret(&settings.token_secret)?;
        Some(Self { url, token })
    }
}

// Keeps the token out of logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Failure categories. Names are a stable contract with presentation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Credentials,
    Connection,
    Timeout,
    Structure,
    Query,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Credentials => "credentials",
            Self::Connection => "connection",
            Self::Timeout => "timeout",
            Self::Structure => "structure",
            Self::Query => "query",
        }
    }

    /// The fixed, non-technical sentence for this category.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::Credentials => MSG_CONFIGURATION,
            Self::Timeout => MSG_TIMEOUT,
            Self::Structure => MSG_STRUCTURE,
            Self::Connection | Self::Query => MSG_CONNECTION,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire-level `errorType`: the failure categories plus the informational `empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorType {
    Credentials,
    Connection,
    Timeout,
    Structure,
    Query,
    Empty,
}

impl From<ErrorCategory> for ErrorType {
    fn from(category: ErrorCategory) -> Self {
        match category {
            ErrorCategory::Credentials => Self::Credentials,
            ErrorCategory::Connection => Self::Connection,
            ErrorCategory::Timeout => Self::Timeout,
            ErrorCategory::Structure => Self::Structure,
            ErrorCategory::Query => Self::Query,
        }
    }
}

/// Result of one guarded fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Success { rows: Vec<Row>, empty: bool },
    Failure {
        category: ErrorCategory,
        message: &'static str,
    },
}

impl QueryOutcome {
    pub fn success(rows: Vec<Row>) -> Self {
        let empty = rows.is_empty();
        Self::Success { rows, empty }
    }

    pub fn failure(category: ErrorCategory) -> Self {
        Self::Failure {
            category,
            message: category.user_message(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// User-facing text: the failure sentence, or the empty-table note.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Success { empty: true, .. } => Some(MSG_EMPTY),
            Self::Success { .. } => None,
            Self::Failure { message, .. } => Some(message),
        }
    }

    pub fn error_type(&self) -> Option<ErrorType> {
        match self {
            Self::Success { empty: true, .. } => Some(ErrorType::Empty),
            Self::Success { .. } => None,
            Self::Failure { category, .. } => Some((*category).into()),
        }
    }

    /// Label used for the outcome metric.
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Success { empty: true, .. } => "empty",
            Self::Success { .. } => "ok",
            Self::Failure { category, .. } => category.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticSecrets;
    use time::macros::datetime;

    #[test]
    fn test_from_secrets_requires_both() {
        let settings = DatabaseSettings::default();

        let both = StaticSecrets::new()
            .with("DATABASE_URL", "libsql://db.example.io")
            .with("DATABASE_TOKEN", "tok");
        assert_eq!(
            DatabaseConfig::from_secrets(&settings, &both),
            Some(DatabaseConfig::new("libsql://db.example.io", "tok"))
        );

        let url_only = StaticSecrets::new().with("DATABASE_URL", "libsql://db.example.io");
        assert_eq!(DatabaseConfig::from_secrets(&settings, &url_only), None);

        let blank_token = StaticSecrets::new()
            .with("DATABASE_URL", "libsql://db.example.io")
            .with("DATABASE_TOKEN", "");
        assert_eq!(DatabaseConfig::from_secrets(&settings, &blank_token), None);
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = DatabaseConfig::new("https://db", "super-secret");
        let debug = format!("{config:?}");
        assert!(debug.contains("https://db"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_query_and_connection_share_wording() {
        assert_eq!(ErrorCategory::Query.user_message(), MSG_CONNECTION);
        assert_eq!(ErrorCategory::Connection.user_message(), MSG_CONNECTION);
    }

    #[test]
    fn test_empty_success_is_not_a_failure() {
        let outcome = QueryOutcome::success(vec![]);
        assert!(outcome.is_success());
        assert_eq!(outcome.message(), Some(MSG_EMPTY));
        assert_eq!(outcome.error_type(), Some(ErrorType::Empty));
    }

    #[test]
    fn test_non_empty_success_has_no_message() {
        let outcome = QueryOutcome::success(vec![Row {
            id: 1,
            name: "a".into(),
            created_at: datetime!(2026-01-10 10:00:00 UTC),
        }]);
        assert_eq!(outcome.message(), None);
        assert_eq!(outcome.error_type(), None);
        assert_eq!(outcome.label(), "ok");
    }

    #[test]
    fn test_error_type_names_are_stable() {
        let names: Vec<String> = [
            ErrorType::Credentials,
            ErrorType::Connection,
            ErrorType::Timeout,
            ErrorType::Structure,
            ErrorType::Query,
            ErrorType::Empty,
        ]
        .iter()
        .map(|t| serde_json::to_string(t).unwrap())
        .collect();
        assert_eq!(
            names,
            vec![
                "\"credentials\"",
                "\"connection\"",
                "\"timeout\"",
                "\"structure\"",
                "\"query\"",
                "\"empty\""
            ]
        );
    }
}
