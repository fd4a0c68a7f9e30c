//! Chain-specific types and error definitions.

use std::fmt;

use futures_util::stream::BoxStream;
use thiserror::Error;

/// Hash of a block, rendered as `0x`-prefixed lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockHash(pub [u8; 32]);

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Errors that can occur during chain operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// An RPC round trip did not complete in time.
    #[error("{operation} timed out after {secs} seconds")]
    Timeout { operation: &'static str, secs: u64 },

    /// Invalid secret URI or key derivation error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Signing or submitting an extrinsic failed.
    #[error("Submission error: {0}")]
    Submission(String),

    /// The transaction left the pool without being included.
    #[error("Transaction {index} not included: {reason}")]
    Inclusion { index: usize, reason: String },

    /// The run was interrupted before it finished.
    #[error("Cancelled: {0}")]
    Cancelled(String),
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Lifecycle of a submitted extrinsic as reported by the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxStatusUpdate {
    /// Accepted into the transaction pool.
    Validated,
    /// Gossiped to peers.
    Broadcasted,
    /// Included in a best block.
    InBlock(BlockHash),
    /// Included in a finalized block.
    Finalized(BlockHash),
    /// The best block holding it was retracted.
    Retracted,
    /// Dropped from the pool.
    Dropped(String),
    /// Rejected as invalid.
    Invalid(String),
    /// The node reported an error while watching.
    Error(String),
}

impl TxStatusUpdate {
    /// Block hash the transaction was included in, if this is an inclusion.
    pub fn inclusion(&self) -> Option<BlockHash> {
        match self {
            TxStatusUpdate::InBlock(hash) | TxStatusUpdate::Finalized(hash) => Some(*hash),
            _ => None,
        }
    }

    /// Reason the transaction can no longer be included, if any.
    pub fn failure(&self) -> Option<&str> {
        match self {
            TxStatusUpdate::Dropped(reason)
            | TxStatusUpdate::Invalid(reason)
            | TxStatusUpdate::Error(reason) => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for TxStatusUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxStatusUpdate::Validated => write!(f, "Ready"),
            TxStatusUpdate::Broadcasted => write!(f, "Broadcast"),
            TxStatusUpdate::InBlock(hash) => write!(f, "InBlock({})", hash),
            TxStatusUpdate::Finalized(hash) => write!(f, "Finalized({})", hash),
            TxStatusUpdate::Retracted => write!(f, "Retracted"),
            TxStatusUpdate::Dropped(reason) => write!(f, "Dropped({})", reason),
            TxStatusUpdate::Invalid(reason) => write!(f, "Invalid({})", reason),
            TxStatusUpdate::Error(reason) => write!(f, "Error({})", reason),
        }
    }
}

/// Status subscription for one submitted extrinsic.
///
/// Dropping the stream unsubscribes.
pub type StatusStream = BoxStream<'static, ChainResult<TxStatusUpdate>>;
