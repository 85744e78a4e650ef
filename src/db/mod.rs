//! Database status query subsystem.
//!
//! # Data Flow
//! ```text
//! startup: secrets → DatabaseConfig (or None)
//!
//! per request:
//!     QueryService::run
//!     → query.rs (credentials check, single attempt under deadline)
//!     → source.rs / remote.rs (raw rows or QueryFault)
//!     → fault.rs (FaultKind, then marker fallback → ErrorCategory)
//!     → QueryOutcome
//!     → report.rs (JSON for presentation code)
//! ```
//!
//! # Design Decisions
//! - Callers never see a raw fault; only a category and a fixed sentence
//! - An empty table is a success, flagged `empty`
//! - No retry: one attempt per request

pub mod fault;
pub mod query;
pub mod remote;
pub mod report;
pub mod source;
pub mod types;

pub use fault::{classify_message, FaultKind, QueryFault};
pub use query::{fetch_rows, QueryService};
pub use remote::RemoteRowSource;
pub use report::QueryReport;
pub use source::{RowSource, StaticRowSource};
pub use types::{DatabaseConfig, ErrorCategory, ErrorType, QueryOutcome, Row};
