//! Command Audit Log
//!
//! One structured event per dispatched command, emitted on the
//! `command_events` tracing target so the JSON file layer captures it.

use celestia_core::{DispatchResult, Invocation, Surface, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandEvent {
    Reply { text: String },
    Mutation { action: String, target: UserId },
    Rejected { kind: String, reason: String },
    Unknown,
}

impl From<&DispatchResult> for CommandEvent {
    fn from(result: &DispatchResult) -> Self {
        match result {
            DispatchResult::Reply(text) => CommandEvent::Reply {
                text: redact_sensitive_data(text),
            },
            DispatchResult::Mutation(m) => CommandEvent::Mutation {
                action: m.action.to_string(),
                target: m.target.id,
            },
            DispatchResult::Rejected(err) => CommandEvent::Rejected {
                kind: err.kind().to_string(),
                reason: err.to_string(),
            },
            DispatchResult::Unknown(_) => CommandEvent::Unknown,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommandEventEntry {
    pub command: String,
    pub surface: Surface,
    pub caller: UserId,
    pub timestamp: DateTime<Utc>,
    pub event: CommandEvent,
}

impl CommandEventEntry {
    pub fn new(inv: &Invocation, result: &DispatchResult) -> Self {
        Self {
            command: inv.command.clone(),
            surface: inv.context.surface,
            caller: inv.context.caller.id,
            timestamp: Utc::now(),
            event: CommandEvent::from(result),
        }
    }
}

pub struct CommandAuditLog;

impl CommandAuditLog {
    /// Record a dispatch outcome. Reply text is redacted before it is logged.
    pub fn record(inv: &Invocation, result: &DispatchResult) {
        let entry = CommandEventEntry::new(inv, result);
        match serde_json::to_string(&entry) {
            Ok(json) => info!(target: "command_events", entry = %json, "Command event"),
            Err(e) => info!(target: "command_events", error = %e, "Command event (unserializable)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use celestia_core::{CallerContext, CommandError, Mutation, UserProfile};

    #[test]
    fn test_entry_serialization() {
        let ctx = CallerContext::new(UserProfile::new(5, "eve", ""), Surface::Structured);
        let inv = Invocation::new("kick", vec![], ctx);
        let result = DispatchResult::Mutation(Mutation::kick(UserProfile::new(6, "mal", "")));
        let json = serde_json::to_value(CommandEventEntry::new(&inv, &result)).unwrap();
        assert_eq!(json["command"], "kick");
        assert_eq!(json["surface"], "structured");
        assert_eq!(json["caller"], 5);
        assert_eq!(json["event"]["outcome"], "mutation");
        assert_eq!(json["event"]["action"], "kick");
        assert_eq!(json["event"]["target"], 6);
    }

    #[test]
    fn test_rejection_event() {
        let ev = CommandEvent::from(&DispatchResult::Rejected(CommandError::InsufficientPermission));
        assert_eq!(
            ev,
            CommandEvent::Rejected {
                kind: "insufficient_permission".into(),
                reason: "insufficient permission".into(),
            }
        );
    }
}
