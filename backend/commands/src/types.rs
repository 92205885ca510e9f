/// Command descriptor types.
use std::fmt;
use std::sync::Arc;

use celestia_core::Capability;
use serde::Serialize;

use crate::dispatch::CommandHandler;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Text,
    User,
    Integer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    pub name: String,
    pub description: String,
    pub kind: ParamKind,
    pub required: bool,
    /// If true, consumes all remaining tokens on the text surface.
    pub capture_remaining: bool,
}

impl ParamSpec {
    /// `<name>` for required parameters, `[name]` for optional ones.
    pub fn usage(&self) -> String {
        if self.required {
            format!("<{}>", self.name)
        } else {
            format!("[{}]", self.name)
        }
    }
}

// ---------------------------------------------------------------------------
// Command descriptor
// ---------------------------------------------------------------------------

/// A registered command. Immutable once it is in the table.
#[derive(Clone)]
pub struct CommandDescriptor {
    /// Lower-cased unique key (e.g. "ping", "8ball").
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
    pub capability: Option<Capability>,
    /// Rejected outside a guild (direct messages).
    pub guild_only: bool,
    pub handler: Arc<dyn CommandHandler>,
}

impl CommandDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: Arc<dyn CommandHandler>,
    ) -> Self {
        Self {
            name: name.into().to_lowercase(),
            description: description.into(),
            params: Vec::new(),
            capability: None,
            guild_only: false,
            handler,
        }
    }

    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    pub fn requires(mut self, capability: Capability) -> Self {
        self.capability = Some(capability);
        self
    }

    pub fn guild_only(mut self) -> Self {
        self.guild_only = true;
        self
    }

    /// Usage line for the text surface, e.g. `!timeout <user> <duration>`.
    pub fn usage(&self, prefix: &str) -> String {
        let mut usage = format!("{prefix}{}", self.name);
        for p in &self.params {
            usage.push(' ');
            usage.push_str(&p.usage());
        }
        usage
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("capability", &self.capability)
            .field("guild_only", &self.guild_only)
            .finish_non_exhaustive()
    }
}

/// Serializable view of a descriptor, without the handler.
#[derive(Debug, Clone, Serialize)]
pub struct CommandSummary<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub params: &'a [ParamSpec],
    pub capability: Option<Capability>,
    pub guild_only: bool,
}

impl<'a> From<&'a CommandDescriptor> for CommandSummary<'a> {
    fn from(d: &'a CommandDescriptor) -> Self {
        Self {
            name: &d.name,
            description: &d.description,
            params: &d.params,
            capability: d.capability,
            guild_only: d.guild_only,
        }
    }
}
