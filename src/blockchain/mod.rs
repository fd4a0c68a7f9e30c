//! Chain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variable (secret URI)
//!     → wallet.rs (sr25519 key derivation, SS58 address)
//!     → client.rs (websocket RPC connection with timeouts, signing, submission)
//!     → transaction.rs (status subscription → inclusion block hash)
//! ```
//!
//! # Security Constraints
//! - Secret URIs ONLY from environment variables
//! - Never log secrets
//! - All RPC round trips have configurable timeouts

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::{RemarkChain, SubstrateClient};
pub use transaction::InclusionWatch;
pub use types::{BlockHash, ChainError, ChainResult, StatusStream, TxStatusUpdate};
pub use wallet::Wallet;
