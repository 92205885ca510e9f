//! Reads the bot configuration from environment variables.
//!
//! | Variable         | Required | Default   |
//! |------------------|----------|-----------|
//! | `DISCORD_TOKEN`  | yes      |           |
//! | `PREFIX`         | no       | `!`       |
//! | `GUILD_ID`       | no       | global    |
//! | `BIND_ADDRESS`   | no       | `0.0.0.0` |
//! | `PORT`           | no       | `3000`    |
//! | `LOG_LEVEL`      | no       | `info`    |
//! | `LOG_DIR`        | no       | console   |
//!
//! `COMMAND_PREFIX` is accepted as an alias; `PREFIX` wins when both are set.

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::schema::BotConfig;

pub const TOKEN_VAR: &str = "DISCORD_TOKEN";
pub const PREFIX_VAR: &str = "PREFIX";
pub const PREFIX_ALIAS_VAR: &str = "COMMAND_PREFIX";
pub const GUILD_VAR: &str = "GUILD_ID";
pub const BIND_VAR: &str = "BIND_ADDRESS";
pub const PORT_VAR: &str = "PORT";
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "LOG_DIR";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var \"{0}\"")]
    MissingVar(&'static str),

    #[error("invalid value for env var \"{var}\": {message}")]
    InvalidVar { var: &'static str, message: String },

    #[error("config validation failed: {0}")]
    Invalid(String),
}

/// Load the configuration from the process environment.
pub fn from_env() -> Result<BotConfig, ConfigError> {
    from_vars(&std::env::vars().collect())
}

/// Load the configuration from a provided map (useful for testing).
pub fn from_vars(env: &HashMap<String, String>) -> Result<BotConfig, ConfigError> {
    let get = |key: &str| env.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

    let token = get(TOKEN_VAR).ok_or(ConfigError::MissingVar(TOKEN_VAR))?;
    let mut config = BotConfig::with_token(token);

    let prefix = [PREFIX_VAR, PREFIX_ALIAS_VAR]
        .iter()
        .find_map(|key| env.get(*key).filter(|v| !v.is_empty()));
    if let Some(prefix) = prefix {
        config.prefix = prefix.clone();
    }

    // `GUILD_ID=0` means global registration, as does leaving it unset.
    if let Some(raw) = get(GUILD_VAR) {
        let id: u64 = raw.parse().map_err(|_| ConfigError::InvalidVar {
            var: GUILD_VAR,
            message: format!("expected a numeric id, got `{raw}`"),
        })?;
        config.guild_id = (id != 0).then_some(id);
    }

    if let Some(bind) = get(BIND_VAR) {
        config.bind_address = bind.to_string();
    }

    if let Some(raw) = get(PORT_VAR) {
        config.port = raw.parse().map_err(|_| ConfigError::InvalidVar {
            var: PORT_VAR,
            message: format!("expected a port number, got `{raw}`"),
        })?;
    }

    if let Some(level) = get(LOG_LEVEL_VAR) {
        config.log_level = level.to_string();
    }

    config.log_dir = get(LOG_DIR_VAR).map(PathBuf::from);

    Ok(config)
}
