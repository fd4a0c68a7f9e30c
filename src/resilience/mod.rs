//! Resilience helpers.
//!
//! Only timeouts: a remark run does not retry, so a failed round trip goes
//! straight to the run's single error handler.

pub mod timeouts;

pub use timeouts::with_timeout;
