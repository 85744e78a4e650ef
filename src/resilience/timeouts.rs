//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap external calls with a deadline
//! - Report an elapsed deadline as its own error, never as a hang
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - The inner future is dropped on expiry, cancelling it

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// The deadline passed before the wrapped future finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation timeout after {}ms", .0.as_millis())]
pub struct DeadlineElapsed(pub Duration);

/// Run `fut` to completion or until `deadline` elapses.
pub async fn with_deadline<F, T>(deadline: Duration, fut: F) -> Result<T, DeadlineElapsed>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(deadline, fut)
        .await
        .map_err(|_| DeadlineElapsed(deadline))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_within_deadline() {
        let value = with_deadline(Duration::from_millis(100), async { 7 }).await;
        assert_eq!(value, Ok(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_elapsed_deadline() {
        let result = with_deadline(
            Duration::from_millis(50),
            tokio::time::sleep(Duration::from_secs(10)),
        )
        .await;
        let err = result.unwrap_err();
        assert_eq!(err, DeadlineElapsed(Duration::from_millis(50)));
        assert_eq!(err.to_string(), "operation timeout after 50ms");
    }
}
