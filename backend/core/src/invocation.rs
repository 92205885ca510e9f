use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::types::{CapabilitySet, GuildSnapshot, UserId, UserProfile};

/// Which entry point an invocation arrived through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// A chat message starting with the configured prefix (e.g. `!ping`).
    TextPrefix,
    /// A platform-native slash command interaction.
    Structured,
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Surface::TextPrefix => f.write_str("text"),
            Surface::Structured => f.write_str("slash"),
        }
    }
}

/// Everything the platform layer knows about the caller of one event.
#[derive(Debug, Clone)]
pub struct CallerContext {
    pub caller: UserProfile,
    pub capabilities: CapabilitySet,
    pub surface: Surface,
    /// `None` in direct messages.
    pub guild: Option<GuildSnapshot>,
    /// Gateway heartbeat latency, when the shard has measured one.
    pub latency: Option<Duration>,
    /// Users the platform already resolved for this event.
    pub resolved_users: HashMap<UserId, UserProfile>,
}

impl CallerContext {
    pub fn new(caller: UserProfile, surface: Surface) -> Self {
        Self {
            caller,
            capabilities: CapabilitySet::empty(),
            surface,
            guild: None,
            latency: None,
            resolved_users: HashMap::new(),
        }
    }

    pub fn with_capabilities(mut self, capabilities: CapabilitySet) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_guild(mut self, guild: GuildSnapshot) -> Self {
        self.guild = Some(guild);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn with_resolved(mut self, user: UserProfile) -> Self {
        self.resolved_users.insert(user.id, user);
        self
    }

    /// Look up a user the platform resolved for this event. The caller is
    /// always resolvable.
    pub fn resolve_user(&self, id: UserId) -> Option<&UserProfile> {
        if id == self.caller.id {
            return Some(&self.caller);
        }
        self.resolved_users.get(&id)
    }
}

/// A fully coerced argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Text(String),
    User(UserProfile),
    Integer(i64),
}

/// One positional argument as delivered by a surface, before coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgInput {
    /// Raw whitespace-separated token from the text surface.
    Token(String),
    /// Typed option value from the structured surface.
    Value(ArgValue),
    /// Structured option that was not supplied.
    Missing,
}

/// A single normalized request to execute one command.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Lower-cased command name.
    pub command: String,
    pub args: Vec<ArgInput>,
    pub context: CallerContext,
}

impl Invocation {
    pub fn new(command: impl Into<String>, args: Vec<ArgInput>, context: CallerContext) -> Self {
        Self {
            command: command.into().to_lowercase(),
            args,
            context,
        }
    }
}
