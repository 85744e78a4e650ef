//! Remote libSQL (Turso) row source over the HTTP pipeline API.
//!
//! # Responsibilities
//! - Turn the configured database URL into a pipeline endpoint
//! - Run one `SELECT id, name, created_at` per call
//! - Report transport faults with a structured [`FaultKind`]
//! - Report rows of the wrong shape as structure faults
//!
//! Server-side SQL errors carry no structured kind; their message is passed
//! through as [`FaultKind::Unknown`] and classified by marker.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::db::fault::{FaultKind, QueryFault};
use crate::db::source::RowSource;
use crate::db::types::{DatabaseConfig, Row};

/// HTTP client for a libSQL server.
#[derive(Debug, Clone)]
pub struct RemoteRowSource {
    client: reqwest::Client,
    table: String,
}

impl RemoteRowSource {
    /// `table` must already be a validated identifier.
    pub fn new(table: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), table)
    }

    pub fn with_client(client: reqwest::Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    fn statement(&self) -> String {
        format!("SELECT id, name, created_at FROM {}", self.table)
    }
}

#[async_trait]
impl RowSource for RemoteRowSource {
    async fn fetch_rows(&self, config: &DatabaseConfig) -> Result<Vec<Row>, QueryFault> {
        let endpoint = pipeline_endpoint(&config.url)?;
        let body = json!({
            "requests": [
                { "type": "execute", "stmt": { "sql": self.statement() } },
                { "type": "close" }
            ]
        });

        tracing::debug!(endpoint = %endpoint, table = %self.table, "Querying remote database");

        let response = self
            .client
            .post(endpoint)
            .bearer_auth(&config.token)
            .json(&body)
            .send()
            .await
            .map_err(transport_fault)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(QueryFault::unknown(format!("HTTP {status}: {text}")));
        }

        let payload: PipelineResponse = response
            .json()
            .await
            .map_err(|e| QueryFault::unknown(format!("invalid pipeline response: {e}")))?;

        rows_from_pipeline(payload)
    }
}

/// `libsql://` and `ws(s)://` URLs are served over HTTP(S) at `/v2/pipeline`.
pub(crate) fn pipeline_endpoint(raw: &str) -> Result<url::Url, QueryFault> {
    let raw = raw.trim().trim_end_matches('/');
    let normalized = if let Some(rest) = raw.strip_prefix("libsql://") {
        format!("https://{rest}")
    } else if let Some(rest) = raw.strip_prefix("wss://") {
        format!("https://{rest}")
    } else if let Some(rest) = raw.strip_prefix("ws://") {
        format!("http://{rest}")
    } else {
        raw.to_string()
    };

    let url = url::Url::parse(&format!("{normalized}/v2/pipeline"))
        .map_err(|e| QueryFault::connection(format!("invalid database url: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(QueryFault::connection(format!(
            "unsupported database url scheme '{other}'"
        ))),
    }
}

fn transport_fault(err: reqwest::Error) -> QueryFault {
    let kind = if err.is_timeout() {
        FaultKind::Timeout
    } else if err.is_connect() {
        FaultKind::Connection
    } else {
        FaultKind::Unknown
    };
    QueryFault::new(kind, err.to_string())
}

#[derive(Debug, Deserialize)]
struct PipelineResponse {
    results: Vec<PipelineResult>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum PipelineResult {
    Ok { response: StreamResponse },
    Error { error: StreamError },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum StreamResponse {
    Execute { result: StatementResult },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct StreamError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct StatementResult {
    cols: Vec<Column>,
    rows: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct Column {
    name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Value {
    Null,
    Integer { value: String },
    Float { value: f64 },
    Text { value: String },
    Blob {},
}

fn rows_from_pipeline(payload: PipelineResponse) -> Result<Vec<Row>, QueryFault> {
    let result = match payload.results.into_iter().next() {
        Some(PipelineResult::Ok {
            response: StreamResponse::Execute { result },
        }) => result,
        Some(PipelineResult::Error { error }) => return Err(QueryFault::unknown(error.message)),
        Some(PipelineResult::Ok { .. }) | None => {
            return Err(QueryFault::unknown("pipeline returned no execute result"))
        }
    };

    let id_at = column_index(&result.cols, "id")?;
    let name_at = column_index(&result.cols, "name")?;
    let created_at = column_index(&result.cols, "created_at")?;

    result
        .rows
        .into_iter()
        .map(|values| {
            Ok(Row {
                id: integer_cell(&values, id_at, "id")?,
                name: text_cell(&values, name_at, "name")?,
                created_at: timestamp_cell(&values, created_at, "created_at")?,
            })
        })
        .collect()
}

fn column_index(cols: &[Column], name: &str) -> Result<usize, QueryFault> {
    cols.iter()
        .position(|c| c.name.as_deref() == Some(name))
        .ok_or_else(|| QueryFault::structure(format!("no such column: {name}")))
}

fn cell<'v>(values: &'v [Value], at: usize, name: &str) -> Result<&'v Value, QueryFault> {
    values
        .get(at)
        .ok_or_else(|| QueryFault::structure(format!("row is missing column {name}")))
}

fn unexpected(name: &str, value: &Value) -> QueryFault {
    QueryFault::structure(format!("column {name} has unexpected value {value:?}"))
}

fn integer_cell(values: &[Value], at: usize, name: &str) -> Result<i64, QueryFault> {
    match cell(values, at, name)? {
        Value::Integer { value } => value.parse().map_err(|_| {
            QueryFault::structure(format!("column {name} is not a 64-bit integer"))
        }),
        other => Err(unexpected(name, other)),
    }
}

fn text_cell(values: &[Value], at: usize, name: &str) -> Result<String, QueryFault> {
    match cell(values, at, name)? {
        Value::Text { value } => Ok(value.clone()),
        other => Err(unexpected(name, other)),
    }
}

fn timestamp_cell(values: &[Value], at: usize, name: &str) -> Result<OffsetDateTime, QueryFault> {
    let value = cell(values, at, name)?;
    let parsed = match value {
        Value::Text { value } => parse_timestamp(value),
        Value::Integer { value } => value
            .parse::<i64>()
            .ok()
            .and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok()),
        Value::Float { value } if value.is_finite() => {
            OffsetDateTime::from_unix_timestamp(value.trunc() as i64).ok()
        }
        _ => None,
    };
    parsed.ok_or_else(|| unexpected(name, value))
}

/// RFC 3339, or SQLite's `YYYY-MM-DD HH:MM:SS` read as UTC.
fn parse_timestamp(text: &str) -> Option<OffsetDateTime> {
    if let Ok(ts) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(ts);
    }
    let sqlite = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    PrimitiveDateTime::parse(text, &sqlite)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn decode(body: serde_json::Value) -> Result<Vec<Row>, QueryFault> {
        rows_from_pipeline(serde_json::from_value(body).unwrap())
    }

    fn execute(cols: &[&str], rows: serde_json::Value) -> serde_json::Value {
        let cols: Vec<_> = cols.iter().map(|c| json!({ "name": c, "decltype": null })).collect();
        json!({
            "baton": null,
            "base_url": null,
            "results": [
                { "type": "ok", "response": { "type": "execute", "result": {
                    "cols": cols, "rows": rows, "affected_row_count": 0,
                    "last_insert_rowid": null
                } } },
                { "type": "ok", "response": { "type": "close" } }
            ]
        })
    }

    #[test]
    fn test_endpoint_rewrites_libsql_scheme() {
        let url = pipeline_endpoint("libsql://demo-org.turso.io").unwrap();
        assert_eq!(url.as_str(), "https://demo-org.turso.io/v2/pipeline");

        let url = pipeline_endpoint("http://127.0.0.1:8080/").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/v2/pipeline");

        let url = pipeline_endpoint("ws://localhost:9000").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/v2/pipeline");
    }

    #[test]
    fn test_endpoint_rejects_unusable_urls() {
        assert_eq!(pipeline_endpoint("not a url").unwrap_err().kind(), FaultKind::Connection);
        assert_eq!(
            pipeline_endpoint("ftp://files.example.com").unwrap_err().kind(),
            FaultKind::Connection
        );
    }

    #[test]
    fn test_decodes_rows_in_order() {
        let rows = decode(execute(
            &["id", "name", "created_at"],
            json!([
                [
                    { "type": "integer", "value": "2" },
                    { "type": "text", "value": "second" },
                    { "type": "text", "value": "2026-01-10T10:00:00Z" }
                ],
                [
                    { "type": "integer", "value": "1" },
                    { "type": "text", "value": "first" },
                    { "type": "text", "value": "2026-01-09 08:30:00" }
                ]
            ]),
        ))
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 2);
        assert_eq!(rows[0].created_at, datetime!(2026-01-10 10:00:00 UTC));
        assert_eq!(rows[1].name, "first");
        assert_eq!(rows[1].created_at, datetime!(2026-01-09 08:30:00 UTC));
    }

    #[test]
    fn test_integer_timestamps() {
        let rows = decode(execute(
            &["created_at", "name", "id"],
            json!([[
                { "type": "integer", "value": "0" },
                { "type": "text", "value": "epoch" },
                { "type": "integer", "value": "9" }
            ]]),
        ))
        .unwrap();
        assert_eq!(rows[0].id, 9);
        assert_eq!(rows[0].created_at, OffsetDateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_empty_table() {
        let rows = decode(execute(&["id", "name", "created_at"], json!([]))).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_missing_column_is_structure_fault() {
        let err = decode(execute(&["id", "name"], json!([]))).unwrap_err();
        assert_eq!(err.kind(), FaultKind::Structure);
        assert_eq!(err.message(), "no such column: created_at");
    }

    #[test]
    fn test_wrong_cell_type_is_structure_fault() {
        let err = decode(execute(
            &["id", "name", "created_at"],
            json!([[
                { "type": "text", "value": "one" },
                { "type": "text", "value": "a" },
                { "type": "null" }
            ]]),
        ))
        .unwrap_err();
        assert_eq!(err.kind(), FaultKind::Structure);
    }

    #[test]
    fn test_server_error_passes_message_through() {
        let err = decode(json!({
            "baton": null,
            "base_url": null,
            "results": [
                { "type": "error", "error": {
                    "message": "SQLite error: no such table: test_table",
                    "code": "SQLITE_UNKNOWN"
                } },
                { "type": "error", "error": { "message": "previous failed" } }
            ]
        }))
        .unwrap_err();
        assert_eq!(err.kind(), FaultKind::Unknown);
        assert_eq!(err.message(), "SQLite error: no such table: test_table");
    }

    #[test]
    fn test_statement_names_table() {
        let source = RemoteRowSource::new("visitors");
        assert_eq!(source.statement(), "SELECT id, name, created_at FROM visitors");
    }
}
