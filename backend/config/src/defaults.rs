//! Config defaults for values the environment may leave unset.

/// Default text-command prefix.
pub const DEFAULT_PREFIX: &str = "!";

/// Default liveness endpoint port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default liveness endpoint bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

/// Default tracing filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_LEVEL: &str = "info";
