//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Log output is pretty for terminals, JSON for collectors
//! - Interceptor and handler events carry `request_id`
//! - Raw database errors are logged, never returned

pub mod logging;
pub mod metrics;
