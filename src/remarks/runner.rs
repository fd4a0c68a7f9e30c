//! The remark run.
//!
//! # Flow
//! ```text
//! chain name → query modules → best header
//!     → remark 1 submitted, watch 1 spawned
//!     → fixed delay
//!     → remark 2 submitted, watch 2 spawned
//!     → both watches resolve (or time out)
//!     → disconnect
//! ```
//!
//! Any failure in that sequence is logged once with a fixed prefix; the
//! connection is closed afterwards in every case.

use std::future::Future;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::sleep;

use crate::blockchain::{BlockHash, ChainError, ChainResult, InclusionWatch, RemarkChain, Wallet};
use crate::config::RemarkConfig;
use crate::lifecycle::Shutdown;
use crate::remarks::payload::{block_number_remark, multicall_remark, next_token_id};

/// Prefix of the single log line emitted when a run fails.
pub const RUN_ERROR_PREFIX: &str = "Error querying data or creating transaction";

/// Timing and presentation settings for a run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub submission_delay: Duration,
    pub inclusion_timeout: Duration,
    pub explorer_url: String,
}

impl From<&RemarkConfig> for RunSettings {
    fn from(config: &RemarkConfig) -> Self {
        Self {
            submission_delay: Duration::from_millis(config.submission_delay_ms),
            inclusion_timeout: Duration::from_secs(config.inclusion_timeout_secs),
            explorer_url: config.explorer_url.clone(),
        }
    }
}

/// What happened to one submitted remark.
#[derive(Debug)]
pub struct TxOutcome {
    /// 1-based submission number.
    pub index: usize,
    pub remark: String,
    pub inclusion: ChainResult<BlockHash>,
}

/// Summary of a completed run.
#[derive(Debug)]
pub struct RunReport {
    pub chain: String,
    pub modules: Vec<String>,
    pub block_number: u64,
    pub transactions: Vec<TxOutcome>,
}

impl RunReport {
    /// True when every submitted remark was observed in a block.
    pub fn all_included(&self) -> bool {
        self.transactions.iter().all(|tx| tx.inclusion.is_ok())
    }
}

/// Drives one remark run over a chain connection it owns.
pub struct RemarkRunner<C: RemarkChain> {
    chain: C,
    wallet: Wallet,
    settings: RunSettings,
    shutdown: Shutdown,
}

impl<C: RemarkChain> RemarkRunner<C> {
    pub fn new(chain: C, wallet: Wallet, settings: RunSettings, shutdown: Shutdown) -> Self {
        Self {
            chain,
            wallet,
            settings,
            shutdown,
        }
    }

    /// Run the session, then disconnect.
    ///
    /// The error, if any, has already been logged when this returns.
    pub async fn run(self) -> ChainResult<RunReport> {
        let Self {
            chain,
            wallet,
            settings,
            shutdown,
        } = self;
        let mut interrupt = shutdown.subscribe();

        let result = session(&chain, &wallet, &settings, &mut interrupt).await;
        if let Err(e) = &result {
            tracing::error!("{}: {}", RUN_ERROR_PREFIX, e);
        }

        chain.disconnect().await;
        result
    }
}

async fn session<C: RemarkChain>(
    chain: &C,
    wallet: &Wallet,
    settings: &RunSettings,
    interrupt: &mut broadcast::Receiver<()>,
) -> ChainResult<RunReport> {
    let chain_name = chain.chain_name().await?;
    tracing::info!("Connected to {}", chain_name);

    let modules = chain.query_modules();
    tracing::info!("Available modules: {:?}", modules);

    let block_number = chain.head_number().await?;
    let remarks = [
        block_number_remark(block_number, next_token_id()),
        multicall_remark(wallet.address()),
    ];
    tracing::info!("Creating remarks: {} and {}", remarks[0], remarks[1]);

    let statuses = chain.submit_remark(wallet, remarks[0].as_bytes()).await?;
    let first = InclusionWatch::spawn(1, statuses, &settings.explorer_url);

    interruptible(
        interrupt,
        "waiting to submit transaction 2",
        sleep(settings.submission_delay),
    )
    .await?;

    let statuses = chain.submit_remark(wallet, remarks[1].as_bytes()).await?;
    let second = InclusionWatch::spawn(2, statuses, &settings.explorer_url);

    let limit = settings.inclusion_timeout;
    let (first, second) = interruptible(interrupt, "waiting for inclusion", async {
        tokio::join!(first.wait(limit), second.wait(limit))
    })
    .await?;

    let transactions: Vec<TxOutcome> = remarks
        .into_iter()
        .zip([first, second])
        .enumerate()
        .map(|(i, (remark, inclusion))| TxOutcome {
            index: i + 1,
            remark,
            inclusion,
        })
        .collect();

    for tx in &transactions {
        if let Err(e) = &tx.inclusion {
            tracing::warn!(index = tx.index, error = %e, "No inclusion observed");
        }
    }

    Ok(RunReport {
        chain: chain_name,
        modules,
        block_number,
        transactions,
    })
}

async fn interruptible<F: Future>(
    interrupt: &mut broadcast::Receiver<()>,
    stage: &str,
    fut: F,
) -> ChainResult<F::Output> {
    tokio::select! {
        output = fut => Ok(output),
        _ = interrupt.recv() => Err(ChainError::Cancelled(format!("interrupted while {}", stage))),
    }
}
