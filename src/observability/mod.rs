//! Observability subsystem.
//!
//! Console output of a run is its log: chain name, query modules, remark
//! contents and per-transaction inclusion all go through `tracing`.

pub mod logging;

pub use logging::init_logging;
