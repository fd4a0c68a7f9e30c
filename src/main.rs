//! Westend remark runner.
//!
//! Connects to a Westend node, signs two `System.remark` extrinsics with the
//! account derived from `PRIVATE_KEY`, and logs where each was included.
//!
//! ```text
//! .env / environment ──▶ wallet
//! --config (optional) ──▶ config ──▶ client ──▶ runner ──▶ disconnect
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use westend_remarks::blockchain::{SubstrateClient, Wallet};
use westend_remarks::config::resolve_config;
use westend_remarks::lifecycle::{listen_for_ctrl_c, Shutdown};
use westend_remarks::observability::init_logging;
use westend_remarks::remarks::{RemarkRunner, RunSettings};

#[derive(Parser)]
#[command(name = "westend-remarks")]
#[command(about = "Submit two test remarks to Westend and report their inclusion", long_about = None)]
struct Cli {
    /// TOML config file; built-in Westend defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Variables already set in the environment take precedence.
    dotenv::dotenv().ok();

    let config = match resolve_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.observability);

    tracing::info!(
        endpoint = %config.chain.endpoint,
        submission_delay_ms = config.remarks.submission_delay_ms,
        inclusion_timeout_secs = config.remarks.inclusion_timeout_secs,
        "Configuration loaded"
    );

    let wallet = match Wallet::from_env() {
        Ok(wallet) => wallet,
        Err(e) => {
            tracing::error!(error = %e, "Cannot derive signer");
            return ExitCode::FAILURE;
        }
    };

    let client = match SubstrateClient::connect(config.chain.clone()).await {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Connection failed");
            return ExitCode::FAILURE;
        }
    };

    let shutdown = Shutdown::new();
    let signals = listen_for_ctrl_c(shutdown.clone());

    let runner = RemarkRunner::new(
        client,
        wallet,
        RunSettings::from(&config.remarks),
        shutdown,
    );
    let result = runner.run().await;
    signals.abort();

    match result {
        Ok(report) if report.all_included() => ExitCode::SUCCESS,
        Ok(_) => {
            tracing::warn!("Finished without observing every inclusion");
            ExitCode::SUCCESS
        }
        // Already logged by the runner.
        Err(_) => ExitCode::FAILURE,
    }
}
