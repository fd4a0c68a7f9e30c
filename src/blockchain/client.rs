//! Substrate node client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to a websocket JSON-RPC endpoint
//! - Query chain metadata and the best header
//! - Sign, submit and watch `System.remark` extrinsics

use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use subxt::backend::legacy::LegacyRpcMethods;
use subxt::backend::rpc::RpcClient;
use subxt::dynamic::Value;
use subxt::tx::TxStatus;
use subxt::{OnlineClient, PolkadotConfig};

use crate::blockchain::types::{
    BlockHash, ChainError, ChainResult, StatusStream, TxStatusUpdate,
};
use crate::blockchain::wallet::Wallet;
use crate::config::ChainConfig;
use crate::resilience::with_timeout;

/// Operations a remark run needs from a chain connection.
///
/// The connection is closed exactly once, by [`RemarkChain::disconnect`],
/// which consumes it.
#[async_trait]
pub trait RemarkChain: Send + Sync {
    /// Human-readable chain name (`system_chain`).
    async fn chain_name(&self) -> ChainResult<String>;

    /// Names of the pallets that expose storage queries.
    fn query_modules(&self) -> Vec<String>;

    /// Number of the current best header.
    async fn head_number(&self) -> ChainResult<u64>;

    /// Sign and submit `System.remark(remark)`, returning its status stream.
    async fn submit_remark(&self, wallet: &Wallet, remark: &[u8]) -> ChainResult<StatusStream>;

    /// Close the connection.
    async fn disconnect(self)
    where
        Self: Sized;
}

/// Websocket client for a Substrate node.
pub struct SubstrateClient {
    api: OnlineClient<PolkadotConfig>,
    rpc: LegacyRpcMethods<PolkadotConfig>,
    config: ChainConfig,
    request_timeout: Duration,
}

impl SubstrateClient {
    /// Open a connection and fetch runtime metadata.
    ///
    /// `wss://` endpoints use the secure client; `ws://` (local dev nodes)
    /// is accepted explicitly as insecure.
    pub async fn connect(config: ChainConfig) -> ChainResult<Self> {
        let connect_timeout = Duration::from_secs(config.connect_timeout_secs);
        let endpoint = config.endpoint.clone();

        let rpc_client = with_timeout(connect_timeout, "connect", async {
            let client = if endpoint.starts_with("ws://") {
                RpcClient::from_insecure_url(&endpoint).await
            } else {
                RpcClient::from_url(&endpoint).await
            };
            client.map_err(|e| {
                ChainError::Rpc(format!("Failed to connect to '{}': {}", endpoint, e))
            })
        })
        .await?;

        let api = with_timeout(connect_timeout, "metadata", async {
            OnlineClient::<PolkadotConfig>::from_rpc_client(rpc_client.clone())
                .await
                .map_err(|e| ChainError::Rpc(format!("Failed to initialize client: {}", e)))
        })
        .await?;

        tracing::info!(endpoint = %config.endpoint, "Chain client connected");

        Ok(Self {
            api,
            rpc: LegacyRpcMethods::new(rpc_client),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            config,
        })
    }
}

#[async_trait]
impl RemarkChain for SubstrateClient {
    async fn chain_name(&self) -> ChainResult<String> {
        with_timeout(self.request_timeout, "system_chain", async {
            self.rpc
                .system_chain()
                .await
                .map_err(|e| ChainError::Rpc(e.to_string()))
        })
        .await
    }

    fn query_modules(&self) -> Vec<String> {
        let metadata = self.api.metadata();
        metadata
            .pallets()
            .filter(|pallet| pallet.storage().is_some())
            .map(|pallet| to_query_name(pallet.name()))
            .collect()
    }

    async fn head_number(&self) -> ChainResult<u64> {
        let header = with_timeout(self.request_timeout, "chain_getHeader", async {
            self.rpc
                .chain_get_header(None)
                .await
                .map_err(|e| ChainError::Rpc(e.to_string()))
        })
        .await?;

        header
            .map(|header| u64::from(header.number))
            .ok_or_else(|| ChainError::Rpc("Node returned no best header".to_string()))
    }

    async fn submit_remark(&self, wallet: &Wallet, remark: &[u8]) -> ChainResult<StatusStream> {
        let payload = subxt::dynamic::tx("System", "remark", vec![Value::from_bytes(remark)]);

        let progress = with_timeout(self.request_timeout, "author_submitAndWatchExtrinsic", async {
            self.api
                .tx()
                .sign_and_submit_then_watch_default(&payload, wallet.keypair())
                .await
                .map_err(|e| ChainError::Submission(e.to_string()))
        })
        .await?;

        tracing::debug!(
            extrinsic_hash = ?progress.extrinsic_hash(),
            bytes = remark.len(),
            "Remark submitted"
        );

        Ok(progress
            .map(|status| match status {
                Ok(status) => Ok(convert_status(status)),
                Err(e) => Err(ChainError::Rpc(e.to_string())),
            })
            .boxed())
    }

    async fn disconnect(self) {
        let endpoint = self.config.endpoint.clone();
        drop(self);
        tracing::info!(endpoint = %endpoint, "Disconnected");
    }
}

/// Name a pallet the way polkadot.js keys `api.query`: lower camel case.
pub fn to_query_name(pallet: &str) -> String {
    let mut chars = pallet.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn convert_status(status: TxStatus<PolkadotConfig, OnlineClient<PolkadotConfig>>) -> TxStatusUpdate {
    match status {
        TxStatus::Validated { .. } => TxStatusUpdate::Validated,
        TxStatus::Broadcasted { .. } => TxStatusUpdate::Broadcasted,
        TxStatus::NoLongerInBestBlock { .. } => TxStatusUpdate::Retracted,
        TxStatus::InBestBlock(in_block) => {
            TxStatusUpdate::InBlock(BlockHash(in_block.block_hash().0))
        }
        TxStatus::InFinalizedBlock(in_block) => {
            TxStatusUpdate::Finalized(BlockHash(in_block.block_hash().0))
        }
        TxStatus::Error { message } => TxStatusUpdate::Error(message),
        TxStatus::Invalid { message } => TxStatusUpdate::Invalid(message),
        TxStatus::Dropped { message } => TxStatusUpdate::Dropped(message),
    }
}

impl std::fmt::Debug for SubstrateClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubstrateClient")
            .field("endpoint", &self.config.endpoint)
            .field("request_timeout_secs", &self.config.request_timeout_secs)
            .finish()
    }
}
