//! Timeout enforcement.
//!
//! Every network round trip goes through [`with_timeout`] so a stalled node
//! surfaces as a distinct `ChainError::Timeout` instead of a hang.

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

use crate::blockchain::types::{ChainError, ChainResult};

/// Run `fut` under `limit`, naming the operation in the timeout error.
pub async fn with_timeout<T, F>(limit: Duration, operation: &'static str, fut: F) -> ChainResult<T>
where
    F: Future<Output = ChainResult<T>>,
{
    match timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(operation, timeout_secs = limit.as_secs(), "RPC timeout");
            Err(ChainError::Timeout {
                operation,
                secs: limit.as_secs(),
            })
        }
    }
}
