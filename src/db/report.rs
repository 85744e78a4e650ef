//! JSON shape of a query outcome, as consumed by presentation code.

use serde::Serialize;

use crate::db::types::{ErrorType, QueryOutcome, Row};

/// `{ success, data?, error?, errorType? }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Row>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorType>,
}

impl From<QueryOutcome> for QueryReport {
    fn from(outcome: QueryOutcome) -> Self {
        let error = outcome.message();
        let error_type = outcome.error_type();
        match outcome {
            QueryOutcome::Success { rows, .. } => Self {
                success: true,
                data: Some(rows),
                error,
                error_type,
            },
            QueryOutcome::Failure { .. } => Self {
                success: false,
                data: None,
                error,
                error_type,
            },
        }
    }
}
