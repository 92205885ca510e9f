//! Typed runtime configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::defaults::{DEFAULT_BIND_ADDRESS, DEFAULT_LOG_LEVEL, DEFAULT_PORT, DEFAULT_PREFIX};

/// Everything the bot reads from its environment at startup.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Platform bot token. Secret.
    pub token: String,
    /// Prefix for text commands, e.g. `!`.
    pub prefix: String,
    /// Guild to publish slash commands to. `None` publishes them globally.
    pub guild_id: Option<u64>,
    pub bind_address: String,
    pub port: u16,
    pub log_level: String,
    /// Directory for rolling JSON logs. Console only when unset.
    pub log_dir: Option<PathBuf>,
}

impl BotConfig {
    /// A config with defaults for everything except the token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            prefix: DEFAULT_PREFIX.to_string(),
            guild_id: None,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_dir: None,
        }
    }

    /// Socket address for the liveness endpoint.
    pub fn listen_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.bind_address, self.port).parse()
    }
}

// The token must never end up in logs through `{:?}`.
impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &crate::redact::mask_secret(&self.token))
            .field("prefix", &self.prefix)
            .field("guild_id", &self.guild_id)
            .field("bind_address", &self.bind_address)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("log_dir", &self.log_dir)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = BotConfig::with_token("abc");
        assert_eq!(cfg.prefix, "!");
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.listen_addr().unwrap().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_debug_hides_token() {
        let cfg = BotConfig::with_token("MTAyNDU2.secret-part");
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("secret-part"));
        assert!(dbg.contains("MTAy***"));
    }
}
