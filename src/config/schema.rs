//! Configuration schema definitions.
//!
//! Every field defaults to the value the remark run uses when no config file
//! is given, so an empty file (or none at all) yields a working setup.

use serde::Deserialize;

/// Root configuration for a remark run.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RunnerConfig {
    /// Node connection settings.
    pub chain: ChainConfig,

    /// Remark submission settings.
    pub remarks: RemarkConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Node connection configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Websocket JSON-RPC endpoint (`ws://` or `wss://`).
    pub endpoint: String,

    /// Connection handshake timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Timeout for read-only RPC queries in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            endpoint: "wss://westend-rpc.polkadot.io".to_string(),
            connect_timeout_secs: 30,
            request_timeout_secs: 30,
        }
    }
}

/// Remark submission configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RemarkConfig {
    /// Delay between the first and second submission in milliseconds.
    pub submission_delay_ms: u64,

    /// How long to wait for both transactions to be included, in seconds.
    pub inclusion_timeout_secs: u64,

    /// Block explorer base URL used for the "view on" links.
    pub explorer_url: String,
}

impl Default for RemarkConfig {
    fn default() -> Self {
        Self {
            submission_delay_ms: 3000,
            inclusion_timeout_secs: 120,
            explorer_url: "https://westend.subscan.io".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of compact text.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
