use serde::Serialize;
use thiserror::Error;

/// Every way a single command invocation can fail.
///
/// All variants are recoverable: the dispatcher turns them into a
/// `DispatchResult::Rejected` and the surface adapter relays the message to
/// the caller. `DuplicateCommand` is only produced while building the command
/// table at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum CommandError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("missing argument: {0}")]
    MissingArgument(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("insufficient permission")]
    InsufficientPermission,

    #[error("this command can only be used in a server")]
    GuildOnly,

    #[error("user not found: {0}")]
    TargetNotFound(String),

    #[error("cannot act on {0}: they outrank me or are protected")]
    TargetNotActionable(String),

    #[error("remote call failed: {0}")]
    RemoteCallFailed(String),

    #[error("duplicate command name: {0}")]
    DuplicateCommand(String),
}

impl CommandError {
    /// Short machine-readable label, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            CommandError::UnknownCommand(_) => "unknown_command",
            CommandError::MissingArgument(_) => "missing_argument",
            CommandError::InvalidArgument(_) => "invalid_argument",
            CommandError::InsufficientPermission => "insufficient_permission",
            CommandError::GuildOnly => "guild_only",
            CommandError::TargetNotFound(_) => "target_not_found",
            CommandError::TargetNotActionable(_) => "target_not_actionable",
            CommandError::RemoteCallFailed(_) => "remote_call_failed",
            CommandError::DuplicateCommand(_) => "duplicate_command",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_reply_wording() {
        assert_eq!(
            CommandError::MissingArgument("text".into()).to_string(),
            "missing argument: text"
        );
        assert_eq!(
            CommandError::InvalidArgument("duration".into()).to_string(),
            "invalid argument: duration"
        );
        assert_eq!(CommandError::InsufficientPermission.to_string(), "insufficient permission");
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(CommandError::GuildOnly.kind(), "guild_only");
        assert_eq!(CommandError::RemoteCallFailed("503".into()).kind(), "remote_call_failed");
    }
}
