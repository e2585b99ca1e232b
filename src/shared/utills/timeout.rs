//! Bounded waits for storage calls
//!
//! Every credential lookup and ledger read/write goes through
//! [`with_timeout`] so a stuck database surfaces as a retryable
//! [`DomainError::Timeout`] instead of a hanging request.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::shared::errors::{DomainError, DomainResult};

/// Default bound for a single storage round-trip.
pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Run `operation`, failing with `Timeout(operation_name)` once `limit` elapses.
pub async fn with_timeout<T, Fut>(
    limit: Duration,
    operation_name: &'static str,
    operation: Fut,
) -> DomainResult<T>
where
    Fut: Future<Output = DomainResult<T>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => {
            warn!(
                operation = operation_name,
                limit_ms = limit.as_millis() as u64,
                "Storage call timed out"
            );
            Err(DomainError::Timeout(operation_name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passes_through_fast_results() {
        let result = with_timeout(Duration::from_millis(50), "fast", async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn passes_through_errors_unchanged() {
        let result: DomainResult<()> = with_timeout(Duration::from_millis(50), "fails", async {
            Err(DomainError::Validation("bad".into()))
        })
        .await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_operation_becomes_timeout() {
        let result: DomainResult<()> = with_timeout(Duration::from_millis(10), "slow", async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(DomainError::Timeout("slow"))));
    }
}
