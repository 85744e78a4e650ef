//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gatehouse_auth_decisions_total` (counter): by `decision` (redirect, pass)
//! - `gatehouse_db_queries_total` (counter): by `outcome` (ok, empty, or failure category)
//! - `gatehouse_db_query_duration_seconds` (histogram): fetch latency
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_auth_decision(redirected: bool) {
    let decision = if redirected { "redirect" } else { "pass" };
    metrics::counter!("gatehouse_auth_decisions_total", "decision" => decision).increment(1);
}

pub fn record_query(outcome: &'static str, start_time: Instant) {
    metrics::counter!("gatehouse_db_queries_total", "outcome" => outcome).increment(1);
    metrics::histogram!("gatehouse_db_query_duration_seconds")
        .record(start_time.elapsed().as_secs_f64());
}
