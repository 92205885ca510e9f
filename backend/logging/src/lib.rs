//! Structured logging for Celestia.
//!
//! Handles log redaction, JSON file output with rotation, and per-command audit events.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{CommandAuditLog, CommandEvent, CommandEventEntry};
pub use logger::{LogGuard, init_logger};
pub use redact::redact_sensitive_data;
