//! The guarded fetch.
//!
//! # Steps
//! ```text
//! config missing?  → Failure(credentials), executor never called
//! execute once     → under an explicit deadline
//! fault?           → classify (structured kind, then markers) → Failure
//! zero rows?       → Success(empty = true)
//! otherwise        → Success(rows in executor order)
//! ```
//!
//! Raw fault text goes to the log at `error` level and nowhere else.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::db::fault::QueryFault;
use crate::db::source::RowSource;
use crate::db::types::{DatabaseConfig, ErrorCategory, QueryOutcome, Row};
use crate::observability::metrics;
use crate::resilience::with_deadline;

/// Run `executor` once against `config` and classify what comes back.
pub async fn fetch_rows<'a, F, Fut>(
    config: Option<&'a DatabaseConfig>,
    deadline: Duration,
    executor: F,
) -> QueryOutcome
where
    F: FnOnce(&'a DatabaseConfig) -> Fut,
    Fut: Future<Output = Result<Vec<Row>, QueryFault>>,
{
    let Some(config) = config else {
        tracing::warn!("Database credentials missing; skipping query");
        return QueryOutcome::failure(ErrorCategory::Credentials);
    };

    let result = match with_deadline(deadline, executor(config)).await {
        Ok(result) => result,
        Err(elapsed) => Err(QueryFault::timeout(elapsed.to_string())),
    };

    match result {
        Ok(rows) => {
            if rows.is_empty() {
                tracing::info!("Database query returned no rows");
            } else {
                tracing::debug!(rows = rows.len(), "Database query succeeded");
            }
            QueryOutcome::success(rows)
        }
        Err(fault) => {
            let category = fault.category();
            tracing::error!(
                kind = ?fault.kind(),
                category = %category,
                error = %fault,
                "Database error"
            );
            QueryOutcome::failure(category)
        }
    }
}

/// The query layer as the server holds it: injected config, source and deadline.
#[derive(Clone)]
pub struct QueryService {
    config: Option<Arc<DatabaseConfig>>,
    source: Arc<dyn RowSource>,
    deadline: Duration,
}

impl QueryService {
    pub fn new(
        config: Option<DatabaseConfig>,
        source: Arc<dyn RowSource>,
        deadline: Duration,
    ) -> Self {
        Self {
            config: config.map(Arc::new),
            source,
            deadline,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    /// Fetch and classify, recording the outcome metric.
    pub async fn run(&self) -> QueryOutcome {
        let start_time = Instant::now();
        let source = &self.source;
        let outcome = fetch_rows(self.config.as_deref(), self.deadline, |config| {
            source.fetch_rows(config)
        })
        .await;
        metrics::record_query(outcome.label(), start_time);
        outcome
    }
}
