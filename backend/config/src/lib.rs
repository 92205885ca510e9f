//! `celestia-config` — runtime configuration for the Celestia bot.
//!
//! Provides:
//! - Typed config (token, prefix, slash-command guild, listener, logging)
//! - Environment loading with defaults
//! - Validation with warnings
//! - Redaction for safe logging/display

pub mod defaults;
pub mod env;
pub mod redact;
pub mod schema;
pub mod validation;

pub use env::{from_env, from_vars, ConfigError};
pub use redact::{mask_secret, redact};
pub use schema::BotConfig;
pub use validation::{validate, ConfigValidationError, ValidationReport};

use serde_json::Value;

/// Validate a loaded config and log every finding.
///
/// Call this once logging is up so warnings reach the log. The first error
/// is returned, which the binary treats as fatal.
pub fn check(config: &BotConfig) -> Result<(), ConfigError> {
    let report = validate(config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    match report.errors.first() {
        Some(first) => Err(ConfigError::Invalid(first.to_string())),
        None => Ok(()),
    }
}

/// The config as JSON with the token masked.
pub fn summary(config: &BotConfig) -> Value {
    match serde_json::to_value(config) {
        Ok(v) => redact(&v),
        Err(_) => Value::Null,
    }
}
