use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::error::CommandError;
use crate::types::UserProfile;

/// Longest timeout the platform accepts (28 days).
pub const MAX_TIMEOUT_SECS: i64 = 28 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationAction {
    Kick,
    Ban,
    Timeout,
}

impl fmt::Display for ModerationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModerationAction::Kick => f.write_str("kick"),
            ModerationAction::Ban => f.write_str("ban"),
            ModerationAction::Timeout => f.write_str("timeout"),
        }
    }
}

/// A request for the platform client to change something remotely.
///
/// Handlers only describe the mutation; executing it belongs to the surface
/// adapter's moderation client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mutation {
    pub target: UserProfile,
    pub action: ModerationAction,
    /// Only set for `Timeout`.
    pub duration: Option<Duration>,
}

impl Mutation {
    pub fn kick(target: UserProfile) -> Self {
        Self { target, action: ModerationAction::Kick, duration: None }
    }

    pub fn ban(target: UserProfile) -> Self {
        Self { target, action: ModerationAction::Ban, duration: None }
    }

    pub fn timeout(target: UserProfile, duration: Duration) -> Self {
        Self { target, action: ModerationAction::Timeout, duration: Some(duration) }
    }
}

/// The single outcome of dispatching one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    Reply(String),
    Mutation(Mutation),
    Rejected(CommandError),
    Unknown(String),
}

impl DispatchResult {
    pub fn rejected(error: CommandError) -> Self {
        DispatchResult::Rejected(error)
    }

    /// Label used in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchResult::Reply(_) => "reply",
            DispatchResult::Mutation(_) => "mutation",
            DispatchResult::Rejected(_) => "rejected",
            DispatchResult::Unknown(_) => "unknown",
        }
    }

    /// The rejection reason, if any, as shown to the caller.
    pub fn rejection_reason(&self) -> Option<String> {
        match self {
            DispatchResult::Rejected(err) => Some(err.to_string()),
            _ => None,
        }
    }
}
