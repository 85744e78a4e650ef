//! Row executors.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::db::fault::QueryFault;
use crate::db::types::{DatabaseConfig, Row};

/// The raw query capability: one call, ordered rows or a fault.
#[async_trait]
pub trait RowSource: Send + Sync {
    async fn fetch_rows(&self, config: &DatabaseConfig) -> Result<Vec<Row>, QueryFault>;
}

/// Answers every call with the same rows or the same fault.
#[derive(Debug)]
pub struct StaticRowSource {
    result: Result<Vec<Row>, QueryFault>,
    calls: AtomicUsize,
}

impl StaticRowSource {
    pub fn rows(rows: Vec<Row>) -> Self {
        Self {
            result: Ok(rows),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn fault(fault: QueryFault) -> Self {
        Self {
            result: Err(fault),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times the source has been asked for rows.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RowSource for StaticRowSource {
    async fn fetch_rows(&self, _config: &DatabaseConfig) -> Result<Vec<Row>, QueryFault> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}
