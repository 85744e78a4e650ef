//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to the remote database:
//!     → timeouts.rs (enforce an explicit deadline on the single attempt)
//!     → On failure: the caller classifies the fault; nothing retries
//! ```
//!
//! # Design Decisions
//! - The database call always runs under a deadline
//! - One attempt only: the status page reports what it saw
//! - An elapsed deadline surfaces as its own error type

pub mod timeouts;

pub use timeouts::{with_deadline, DeadlineElapsed};
