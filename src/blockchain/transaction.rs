//! Inclusion monitoring for submitted remarks.
//!
//! Each submission gets its own [`InclusionWatch`]: a task that drains the
//! status subscription, reports intermediate statuses, and resolves with the
//! inclusion block hash. The subscription is released when the task ends,
//! whether it resolved or was cancelled.

use std::time::Duration;

use futures_util::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use crate::blockchain::types::{BlockHash, ChainError, ChainResult, StatusStream};

/// Handle to a running inclusion watch.
///
/// Dropping the handle cancels the watch and unsubscribes.
#[derive(Debug)]
pub struct InclusionWatch {
    index: usize,
    handle: Option<JoinHandle<ChainResult<BlockHash>>>,
}

impl InclusionWatch {
    /// Start watching transaction `index` (1-based, used in log lines).
    pub fn spawn(index: usize, statuses: StatusStream, explorer_url: &str) -> Self {
        let explorer_url = explorer_url.trim_end_matches('/').to_string();
        let handle = tokio::spawn(watch_statuses(index, statuses, explorer_url));
        Self {
            index,
            handle: Some(handle),
        }
    }

    /// Wait for inclusion, giving up after `limit`.
    ///
    /// On timeout the watch is cancelled and its subscription released.
    pub async fn wait(mut self, limit: Duration) -> ChainResult<BlockHash> {
        let Some(handle) = self.handle.as_mut() else {
            return Err(ChainError::Cancelled(format!(
                "watch for transaction {} already consumed",
                self.index
            )));
        };

        let outcome = timeout(limit, handle).await;
        match outcome {
            Ok(Ok(result)) => {
                self.handle = None;
                result
            }
            Ok(Err(join_error)) => {
                self.handle = None;
                Err(ChainError::Cancelled(format!(
                    "watch for transaction {} stopped: {}",
                    self.index, join_error
                )))
            }
            Err(_) => Err(ChainError::Inclusion {
                index: self.index,
                reason: format!("not included within {} seconds", limit.as_secs()),
            }),
        }
    }
}

impl Drop for InclusionWatch {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!(index = self.index, "Inclusion watch cancelled");
        }
    }
}

/// Explorer link for a block.
pub fn explorer_block_url(explorer_url: &str, hash: &BlockHash) -> String {
    format!("{}/block/{}", explorer_url.trim_end_matches('/'), hash)
}

async fn watch_statuses(
    index: usize,
    mut statuses: StatusStream,
    explorer_url: String,
) -> ChainResult<BlockHash> {
    while let Some(status) = statuses.next().await {
        let status = status?;

        if let Some(hash) = status.inclusion() {
            tracing::info!("Transaction {} included at blockHash {}", index, hash);
            tracing::info!(
                "View Transaction {} on Subscan: {}",
                index,
                explorer_block_url(&explorer_url, &hash)
            );
            return Ok(hash);
        }

        tracing::info!("Current status for remark {}: {}", index, status);

        if status.failure().is_some() {
            return Err(ChainError::Inclusion {
                index,
                reason: status.to_string(),
            });
        }
    }

    Err(ChainError::Inclusion {
        index,
        reason: "status subscription ended".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::types::TxStatusUpdate;
    use futures_util::stream;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn statuses(updates: Vec<TxStatusUpdate>) -> StatusStream {
        stream::iter(updates.into_iter().map(Ok)).boxed()
    }

    #[test]
    fn test_explorer_url() {
        let hash = BlockHash([0x11; 32]);
        let url = explorer_block_url("https://westend.subscan.io/", &hash);
        assert_eq!(url, format!("https://westend.subscan.io/block/0x{}", "11".repeat(32)));
    }

    #[tokio::test]
    async fn test_resolves_on_in_block() {
        let hash = BlockHash([3; 32]);
        let watch = InclusionWatch::spawn(
            1,
            statuses(vec![
                TxStatusUpdate::Validated,
                TxStatusUpdate::Broadcasted,
                TxStatusUpdate::InBlock(hash),
                TxStatusUpdate::Finalized(BlockHash([4; 32])),
            ]),
            "https://westend.subscan.io",
        );

        assert_eq!(watch.wait(Duration::from_secs(5)).await.unwrap(), hash);
    }

    #[tokio::test]
    async fn test_finalized_counts_as_inclusion() {
        let hash = BlockHash([9; 32]);
        let watch = InclusionWatch::spawn(
            2,
            statuses(vec![TxStatusUpdate::Finalized(hash)]),
            "https://westend.subscan.io",
        );
        assert_eq!(watch.wait(Duration::from_secs(5)).await.unwrap(), hash);
    }

    #[tokio::test]
    async fn test_dropped_is_inclusion_error() {
        let watch = InclusionWatch::spawn(
            2,
            statuses(vec![
                TxStatusUpdate::Validated,
                TxStatusUpdate::Dropped("pool limit".into()),
            ]),
            "https://westend.subscan.io",
        );

        match watch.wait(Duration::from_secs(5)).await {
            Err(ChainError::Inclusion { index, reason }) => {
                assert_eq!(index, 2);
                assert_eq!(reason, "Dropped(pool limit)");
            }
            other => panic!("expected inclusion error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_stream_end_without_inclusion() {
        let watch = InclusionWatch::spawn(
            1,
            statuses(vec![TxStatusUpdate::Validated]),
            "https://westend.subscan.io",
        );
        let err = watch.wait(Duration::from_secs(5)).await.unwrap_err();
        assert!(err.to_string().contains("status subscription ended"));
    }

    #[tokio::test]
    async fn test_stream_error_propagates() {
        let stream: StatusStream = stream::iter(vec![
            Ok(TxStatusUpdate::Validated),
            Err(ChainError::Rpc("connection reset".into())),
        ])
        .boxed();
        let watch = InclusionWatch::spawn(1, stream, "https://westend.subscan.io");

        let err = watch.wait(Duration::from_secs(5)).await.unwrap_err();
        assert!(matches!(err, ChainError::Rpc(_)));
    }

    /// Marks a flag when dropped, standing in for an unsubscribe.
    struct Unsubscribe(Arc<AtomicBool>);

    impl Drop for Unsubscribe {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_cancels_and_unsubscribes() {
        let released = Arc::new(AtomicBool::new(false));
        let guard = Unsubscribe(released.clone());
        let pending: StatusStream = stream::pending()
            .map(move |status| {
                let _keep = &guard;
                status
            })
            .boxed();

        let watch = InclusionWatch::spawn(1, pending, "https://westend.subscan.io");
        let err = watch.wait(Duration::from_secs(10)).await.unwrap_err();
        assert!(matches!(err, ChainError::Inclusion { index: 1, .. }));

        // Let the aborted task be torn down.
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        assert!(released.load(Ordering::SeqCst));
    }
}
