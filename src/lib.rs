//! Westend remark runner library.

pub mod blockchain;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod remarks;
pub mod resilience;

pub use blockchain::{RemarkChain, SubstrateClient, Wallet};
pub use config::RunnerConfig;
pub use lifecycle::Shutdown;
pub use remarks::RemarkRunner;
