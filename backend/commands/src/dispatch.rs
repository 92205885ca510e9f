/// Command dispatch — validate, authorize and route invocations to handlers.
use std::sync::Arc;

use celestia_core::{
    ArgInput, ArgValue, CallerContext, CommandError, DispatchResult, Invocation, Mutation, UserId,
    UserProfile,
};
use tracing::debug;

use crate::permission::authorize;
use crate::registry::CommandTable;
use crate::types::{CommandDescriptor, ParamKind, ParamSpec};

// ---------------------------------------------------------------------------
// Handler trait
// ---------------------------------------------------------------------------

/// Context passed to every command handler.
#[derive(Debug, Clone, Copy)]
pub struct CommandContext<'a> {
    pub caller: &'a CallerContext,
    pub table: &'a CommandTable,
    pub prefix: &'a str,
}

/// What a handler decided to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Reply(String),
    Mutation(Mutation),
}

impl Outcome {
    pub fn reply(text: impl Into<String>) -> Self {
        Outcome::Reply(text.into())
    }
}

/// Handlers compute what to say or what to change; they never touch the network.
pub trait CommandHandler: Send + Sync {
    fn handle(&self, ctx: &CommandContext<'_>, args: &Args) -> Result<Outcome, CommandError>;
}

// ---------------------------------------------------------------------------
// Validated arguments
// ---------------------------------------------------------------------------

/// Arguments after coercion, addressed by parameter name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    values: Vec<(String, Option<ArgValue>)>,
}

impl Args {
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_ref())
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(ArgValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn user(&self, name: &str) -> Option<&UserProfile> {
        match self.get(name) {
            Some(ArgValue::User(u)) => Some(u),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.get(name) {
            Some(ArgValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    /// Like `text`, but a missing value is a `MissingArgument` error.
    pub fn require_text(&self, name: &str) -> Result<&str, CommandError> {
        self.text(name)
            .ok_or_else(|| CommandError::MissingArgument(name.to_string()))
    }

    pub fn require_user(&self, name: &str) -> Result<&UserProfile, CommandError> {
        self.user(name)
            .ok_or_else(|| CommandError::MissingArgument(name.to_string()))
    }

    pub fn require_integer(&self, name: &str) -> Result<i64, CommandError> {
        self.integer(name)
            .ok_or_else(|| CommandError::MissingArgument(name.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Coercion
// ---------------------------------------------------------------------------

/// Parse `<@id>`, `<@!id>` or a bare numeric id.
pub fn parse_user_mention(token: &str) -> Option<UserId> {
    let inner = token
        .strip_prefix("<@")
        .and_then(|rest| rest.strip_suffix('>'))
        .map(|rest| rest.strip_prefix('!').unwrap_or(rest))
        .unwrap_or(token);
    inner.parse::<u64>().ok().map(UserId)
}

fn coerce_token(spec: &ParamSpec, token: &str, ctx: &CallerContext) -> Result<ArgValue, CommandError> {
    match spec.kind {
        ParamKind::Text => Ok(ArgValue::Text(token.to_string())),
        ParamKind::Integer => token
            .parse::<i64>()
            .map(ArgValue::Integer)
            .map_err(|_| CommandError::InvalidArgument(spec.name.clone())),
        ParamKind::User => {
            let id = parse_user_mention(token)
                .ok_or_else(|| CommandError::InvalidArgument(spec.name.clone()))?;
            ctx.resolve_user(id)
                .cloned()
                .map(ArgValue::User)
                .ok_or_else(|| CommandError::TargetNotFound(token.to_string()))
        }
    }
}

fn coerce_value(spec: &ParamSpec, value: &ArgValue, ctx: &CallerContext) -> Result<ArgValue, CommandError> {
    match (spec.kind, value) {
        (ParamKind::Text, ArgValue::Text(_))
        | (ParamKind::User, ArgValue::User(_))
        | (ParamKind::Integer, ArgValue::Integer(_)) => Ok(value.clone()),
        (ParamKind::Text, ArgValue::Integer(n)) => Ok(ArgValue::Text(n.to_string())),
        (_, ArgValue::Text(s)) => coerce_token(spec, s, ctx),
        _ => Err(CommandError::InvalidArgument(spec.name.clone())),
    }
}

/// Join every remaining raw token for a trailing free-text parameter.
fn remaining_tokens(inputs: &[ArgInput]) -> Option<String> {
    let tokens: Vec<&str> = inputs
        .iter()
        .filter_map(|a| match a {
            ArgInput::Token(t) => Some(t.as_str()),
            _ => None,
        })
        .collect();
    if tokens.is_empty() { None } else { Some(tokens.join(" ")) }
}

fn is_blank(value: &ArgValue) -> bool {
    matches!(value, ArgValue::Text(s) if s.trim().is_empty())
}

/// Coerce raw inputs into typed arguments per the descriptor's parameters.
pub fn coerce_args(
    def: &CommandDescriptor,
    inputs: &[ArgInput],
    ctx: &CallerContext,
) -> Result<Args, CommandError> {
    let mut values = Vec::with_capacity(def.params.len());

    for (i, spec) in def.params.iter().enumerate() {
        let input = inputs.get(i);
        let value = match input {
            None | Some(ArgInput::Missing) => None,
            Some(ArgInput::Token(_)) if spec.capture_remaining => {
                remaining_tokens(&inputs[i..]).map(ArgValue::Text)
            }
            Some(ArgInput::Token(t)) => Some(coerce_token(spec, t, ctx)?),
            Some(ArgInput::Value(v)) => Some(coerce_value(spec, v, ctx)?),
        };
        let value = value.filter(|v| !is_blank(v));

        if value.is_none() && spec.required {
            return Err(CommandError::MissingArgument(spec.name.clone()));
        }
        values.push((spec.name.clone(), value));
    }

    Ok(Args { values })
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

pub struct CommandDispatcher {
    table: Arc<CommandTable>,
    prefix: String,
}

impl CommandDispatcher {
    pub fn new(table: Arc<CommandTable>, prefix: impl Into<String>) -> Self {
        Self { table, prefix: prefix.into() }
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Run one invocation to exactly one outcome. Never panics on bad input.
    pub fn dispatch(&self, inv: &Invocation) -> DispatchResult {
        let result = self.dispatch_inner(inv);
        debug!(
            command = %inv.command,
            surface = %inv.context.surface,
            caller = %inv.context.caller.id,
            outcome = result.kind(),
            "[Commands] Dispatched"
        );
        result
    }

    fn dispatch_inner(&self, inv: &Invocation) -> DispatchResult {
        let Some(def) = self.table.lookup(&inv.command) else {
            debug!(command = %inv.command, "[Commands] Unknown command");
            return DispatchResult::Unknown(inv.command.clone());
        };
        let caller = &inv.context;

        if def.guild_only && caller.guild.is_none() {
            return DispatchResult::Rejected(CommandError::GuildOnly);
        }

        // Checked before any argument coercion.
        if !authorize(&caller.capabilities, def.capability) {
            return DispatchResult::Rejected(CommandError::InsufficientPermission);
        }

        let args = match coerce_args(def, &inv.args, caller) {
            Ok(args) => args,
            Err(e) => return DispatchResult::Rejected(e),
        };

        let ctx = CommandContext {
            caller,
            table: &self.table,
            prefix: &self.prefix,
        };
        match def.handler.handle(&ctx, &args) {
            Ok(Outcome::Reply(text)) => DispatchResult::Reply(text),
            Ok(Outcome::Mutation(m)) => DispatchResult::Mutation(m),
            Err(e) => DispatchResult::Rejected(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use celestia_core::{Capability, CapabilitySet, GuildSnapshot, Surface};

    fn alice() -> UserProfile {
        UserProfile::new(1, "alice", "https://cdn.example/alice.png")
    }

    fn bob() -> UserProfile {
        UserProfile::new(2, "bob", "https://cdn.example/bob.png")
    }

    fn guild_ctx(caps: CapabilitySet) -> CallerContext {
        CallerContext::new(alice(), Surface::TextPrefix)
            .with_capabilities(caps)
            .with_guild(GuildSnapshot { name: "Celestia".into(), member_count: 42 })
            .with_resolved(bob())
    }

    fn dispatcher() -> CommandDispatcher {
        CommandDispatcher::new(Arc::new(CommandTable::builtin().unwrap()), "!")
    }

    fn tokens(ts: &[&str]) -> Vec<ArgInput> {
        ts.iter().map(|t| ArgInput::Token(t.to_string())).collect()
    }

    #[test]
    fn test_parse_user_mention_forms() {
        assert_eq!(parse_user_mention("<@42>"), Some(UserId(42)));
        assert_eq!(parse_user_mention("<@!42>"), Some(UserId(42)));
        assert_eq!(parse_user_mention("42"), Some(UserId(42)));
        assert_eq!(parse_user_mention("@alice"), None);
        assert_eq!(parse_user_mention("<@abc>"), None);
    }

    #[test]
    fn test_say_joins_remaining_tokens() {
        let inv = Invocation::new("say", tokens(&["hello", "world"]), guild_ctx(CapabilitySet::empty()));
        assert_eq!(dispatcher().dispatch(&inv), DispatchResult::Reply("hello world".into()));
    }

    #[test]
    fn test_kick_yields_mutation() {
        let caps = CapabilitySet::empty().with(Capability::Kick);
        let inv = Invocation::new("kick", tokens(&["<@2>"]), guild_ctx(caps));
        assert_eq!(dispatcher().dispatch(&inv), DispatchResult::Mutation(Mutation::kick(bob())));
    }

    #[test]
    fn test_unresolved_target_is_not_found() {
        let caps = CapabilitySet::empty().with(Capability::Ban);
        let inv = Invocation::new("ban", tokens(&["<@99>"]), guild_ctx(caps));
        assert_eq!(
            dispatcher().dispatch(&inv),
            DispatchResult::Rejected(CommandError::TargetNotFound("<@99>".into()))
        );
    }

    #[test]
    fn test_malformed_user_token_is_invalid() {
        let inv = Invocation::new("avatar", tokens(&["someone"]), guild_ctx(CapabilitySet::empty()));
        assert_eq!(
            dispatcher().dispatch(&inv),
            DispatchResult::Rejected(CommandError::InvalidArgument("user".into()))
        );
    }

    #[test]
    fn test_guild_only_outside_guild() {
        let ctx = CallerContext::new(alice(), Surface::TextPrefix).with_capabilities(CapabilitySet::all());
        let inv = Invocation::new("server", vec![], ctx);
        assert_eq!(dispatcher().dispatch(&inv), DispatchResult::Rejected(CommandError::GuildOnly));
    }

    #[test]
    fn test_missing_structured_option() {
        let caps = CapabilitySet::empty().with(Capability::Moderate);
        let ctx = guild_ctx(caps);
        let inv = Invocation::new(
            "timeout",
            vec![ArgInput::Value(ArgValue::User(bob())), ArgInput::Missing],
            ctx,
        );
        assert_eq!(
            dispatcher().dispatch(&inv),
            DispatchResult::Rejected(CommandError::MissingArgument("duration".into()))
        );
    }

    #[test]
    fn test_args_accessors() {
        let table = CommandTable::builtin().unwrap();
        let def = table.lookup("timeout").unwrap();
        let args = coerce_args(def, &tokens(&["2", "60"]), &guild_ctx(CapabilitySet::empty())).unwrap();
        assert_eq!(args.require_user("user").unwrap(), &bob());
        assert_eq!(args.integer("duration"), Some(60));
        assert_eq!(args.text("duration"), None);
        assert!(args.require_text("nope").is_err());
    }

    #[derive(Clone, Default)]
    struct LevelRecorder(Arc<std::sync::Mutex<Vec<tracing::Level>>>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LevelRecorder {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
            self.0.lock().unwrap().push(*event.metadata().level());
        }
    }

    #[test]
    fn test_dispatch_event_is_debug_level() {
        use tracing_subscriber::layer::SubscriberExt;

        let recorder = LevelRecorder::default();
        let subscriber = tracing_subscriber::registry().with(recorder.clone());
        let inv = Invocation::new("ping", vec![], guild_ctx(CapabilitySet::empty()));
        let d = dispatcher();
        tracing::subscriber::with_default(subscriber, || d.dispatch(&inv));

        let levels = recorder.0.lock().unwrap();
        assert!(!levels.is_empty());
        assert!(levels.iter().all(|level| *level == tracing::Level::DEBUG));
    }
}
