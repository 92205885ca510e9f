//! Config validation with user-friendly messages.

use crate::schema::BotConfig;
use thiserror::Error;

/// A config validation problem with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// All problems found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &BotConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_prefix(config, &mut report);
    validate_listener(config, &mut report);
    if config.guild_id.is_none() {
        report.warn(
            "guild_id",
            "GUILD_ID not set; slash commands are registered globally and may take a while to appear",
        );
    }
    report
}

fn validate_prefix(config: &BotConfig, report: &mut ValidationReport) {
    if config.prefix.is_empty() {
        report.error("prefix", "Command prefix cannot be empty");
    } else if config.prefix.chars().any(char::is_whitespace) {
        report.error("prefix", "Command prefix cannot contain whitespace");
    } else if config.prefix.chars().count() > 5 {
        report.warn("prefix", "Command prefix is unusually long");
    }
}

fn validate_listener(config: &BotConfig, report: &mut ValidationReport) {
    if config.port == 0 {
        report.error("port", "Port 0 would bind a random port; hosting health checks would miss it");
    }
    if config.listen_addr().is_err() {
        report.error("bind_address", format!("`{}` is not a valid IP address", config.bind_address));
    }
}
