//! Per-branch failure isolation for fan-out fetches.
//!
//! One failing branch (a classroom whose project list errors, a project
//! whose deliverables time out) must not abort sibling branches or the
//! whole aggregation. Every non-root fetch runs through [`settle`], which
//! collapses rejection and timeout into an empty result, logged but never
//! surfaced to the user.

use std::time::Duration;

use amep_api::ApiError;

/// Await one branch fetch, degrading failure or timeout to empty.
pub async fn settle<T>(
    branch: &str,
    limit: Duration,
    fut: impl Future<Output = Result<Vec<T>, ApiError>>,
) -> Vec<T> {
    match tokio::time::timeout(limit, fut).await {
        Ok(Ok(items)) => items,
        Ok(Err(error)) => {
            tracing::warn!(branch, %error, "branch fetch failed; treating as empty");
            Vec::new()
        }
        Err(_) => {
            tracing::warn!(
                branch,
                timeout_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                "branch fetch timed out; treating as empty"
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn settle_passes_items_through() {
        let items = settle("ok", LIMIT, async { Ok(vec![1, 2, 3]) }).await;
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn settle_degrades_error_to_empty() {
        let items: Vec<u32> = settle("err", LIMIT, async {
            Err(ApiError::Api {
                status: 500,
                message: "boom".into(),
            })
        })
        .await;
        assert!(items.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn settle_degrades_timeout_to_empty() {
        let items: Vec<u32> = settle("slow", LIMIT, std::future::pending()).await;
        assert!(items.is_empty());
    }
}
