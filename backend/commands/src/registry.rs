/// Command table: the built-in commands and name lookup.
use std::collections::HashMap;
use std::sync::Arc;

use celestia_core::{Capability, CommandError, ModerationAction};

use crate::handlers::{
    AvatarHandler, EightBallHandler, HelpHandler, ModerationHandler, PingHandler, SayHandler,
    ServerHandler,
};
use crate::types::{CommandDescriptor, ParamKind, ParamSpec};

fn param(name: &str, description: &str, kind: ParamKind, required: bool, capture: bool) -> ParamSpec {
    ParamSpec {
        name: name.to_string(),
        description: description.to_string(),
        kind,
        required,
        capture_remaining: capture,
    }
}

fn remaining_text(name: &str, description: &str) -> ParamSpec {
    param(name, description, ParamKind::Text, true, true)
}

fn required_user(name: &str, description: &str) -> ParamSpec {
    param(name, description, ParamKind::User, true, false)
}

fn optional_user(name: &str, description: &str) -> ParamSpec {
    param(name, description, ParamKind::User, false, false)
}

fn required_integer(name: &str, description: &str) -> ParamSpec {
    param(name, description, ParamKind::Integer, true, false)
}

/// The built-in commands, in help order.
pub fn builtin_commands() -> Vec<CommandDescriptor> {
    vec![
        CommandDescriptor::new("ping", "Check bot latency", Arc::new(PingHandler)),
        CommandDescriptor::new("say", "Make the bot say something", Arc::new(SayHandler))
            .param(remaining_text("text", "Text to say")),
        CommandDescriptor::new("help", "Show available commands", Arc::new(HelpHandler)),
        CommandDescriptor::new("8ball", "Ask the magic 8ball", Arc::new(EightBallHandler))
            .param(remaining_text("question", "Your question")),
        CommandDescriptor::new("avatar", "Show user's avatar", Arc::new(AvatarHandler))
            .param(optional_user("user", "User to show")),
        CommandDescriptor::new("server", "Show server info", Arc::new(ServerHandler)).guild_only(),
        CommandDescriptor::new(
            "kick",
            "Kick a member",
            Arc::new(ModerationHandler { action: ModerationAction::Kick }),
        )
        .param(required_user("user", "User to kick"))
        .requires(Capability::Kick)
        .guild_only(),
        CommandDescriptor::new(
            "ban",
            "Ban a member",
            Arc::new(ModerationHandler { action: ModerationAction::Ban }),
        )
        .param(required_user("user", "User to ban"))
        .requires(Capability::Ban)
        .guild_only(),
        CommandDescriptor::new(
            "timeout",
            "Timeout a member",
            Arc::new(ModerationHandler { action: ModerationAction::Timeout }),
        )
        .param(required_user("user", "User to timeout"))
        .param(required_integer("duration", "Duration in seconds"))
        .requires(Capability::Moderate)
        .guild_only(),
    ]
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Name → descriptor mapping. Built once at startup and shared read-only.
#[derive(Debug, Default)]
pub struct CommandTable {
    commands: Vec<CommandDescriptor>,
    index: HashMap<String, usize>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding every built-in command.
    pub fn builtin() -> Result<Self, CommandError> {
        let mut table = Self::new();
        for def in builtin_commands() {
            table.register(def)?;
        }
        Ok(table)
    }

    /// Register a command. Names are case-insensitive and must be unique.
    pub fn register(&mut self, def: CommandDescriptor) -> Result<(), CommandError> {
        let key = def.name.to_lowercase();
        if self.index.contains_key(&key) {
            return Err(CommandError::DuplicateCommand(key));
        }
        self.index.insert(key, self.commands.len());
        self.commands.push(def);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&CommandDescriptor> {
        self.index
            .get(&name.to_lowercase())
            .map(|&i| &self.commands[i])
    }

    /// Every command in registration order.
    pub fn all(&self) -> &[CommandDescriptor] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
