//! Configuration validation.
//!
//! Serde handles the syntax; this module checks values: URL schemes,
//! non-zero timeouts, known log levels. All violations are collected, not
//! just the first one.

use std::fmt;

use url::Url;

use crate::config::schema::RunnerConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `chain.endpoint`.
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validate a parsed configuration.
pub fn validate_config(config: &RunnerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url(
        &mut errors,
        "chain.endpoint",
        &config.chain.endpoint,
        &["ws", "wss"],
    );
    check_url(
        &mut errors,
        "remarks.explorer_url",
        &config.remarks.explorer_url,
        &["http", "https"],
    );

    if config.chain.connect_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "chain.connect_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }
    if config.chain.request_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "chain.request_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }
    if config.remarks.inclusion_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "remarks.inclusion_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError {
            field: "observability.log_level",
            message: format!(
                "unknown level '{}', expected one of {}",
                config.observability.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(
    errors: &mut Vec<ValidationError>,
    field: &'static str,
    value: &str,
    schemes: &[&str],
) {
    match Url::parse(value) {
        Ok(url) if schemes.contains(&url.scheme()) => {}
        Ok(url) => errors.push(ValidationError {
            field,
            message: format!(
                "scheme '{}' not allowed, expected {}",
                url.scheme(),
                schemes.join(" or ")
            ),
        }),
        Err(e) => errors.push(ValidationError {
            field,
            message: format!("invalid URL '{}': {}", value, e),
        }),
    }
}
