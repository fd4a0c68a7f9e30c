//! Remark run: payload formats and the submission sequence.

pub mod payload;
pub mod runner;

pub use runner::{RemarkRunner, RunReport, RunSettings, TxOutcome, RUN_ERROR_PREFIX};
