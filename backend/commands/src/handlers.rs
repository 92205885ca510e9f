/// Built-in command handlers.
///
/// Each handler is a concrete struct implementing `CommandHandler`. Handlers
/// only decide; kicking, banning and timing out are performed by the surface
/// adapter when it receives the `Mutation`.
use std::time::Duration;

use celestia_core::{CommandError, MAX_TIMEOUT_SECS, ModerationAction, Mutation};
use tracing::info;

use crate::dispatch::{Args, CommandContext, CommandHandler, Outcome};
use crate::format;

// ---------------------------------------------------------------------------
// ping
// ---------------------------------------------------------------------------

pub struct PingHandler;

impl CommandHandler for PingHandler {
    fn handle(&self, ctx: &CommandContext<'_>, _args: &Args) -> Result<Outcome, CommandError> {
        Ok(Outcome::reply(format::ping(ctx.caller.latency)))
    }
}

// ---------------------------------------------------------------------------
// say
// ---------------------------------------------------------------------------

pub struct SayHandler;

impl CommandHandler for SayHandler {
    fn handle(&self, _ctx: &CommandContext<'_>, args: &Args) -> Result<Outcome, CommandError> {
        Ok(Outcome::reply(args.require_text("text")?))
    }
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

pub struct HelpHandler;

impl CommandHandler for HelpHandler {
    fn handle(&self, ctx: &CommandContext<'_>, _args: &Args) -> Result<Outcome, CommandError> {
        Ok(Outcome::reply(format::help(ctx.prefix, ctx.table.all())))
    }
}

// ---------------------------------------------------------------------------
// 8ball
// ---------------------------------------------------------------------------

pub struct EightBallHandler;

impl CommandHandler for EightBallHandler {
    fn handle(&self, _ctx: &CommandContext<'_>, args: &Args) -> Result<Outcome, CommandError> {
        args.require_text("question")?;
        let phrase = format::pick_eight_ball(&mut rand::thread_rng());
        Ok(Outcome::reply(format::eight_ball(phrase)))
    }
}

// ---------------------------------------------------------------------------
// avatar
// ---------------------------------------------------------------------------

pub struct AvatarHandler;

impl CommandHandler for AvatarHandler {
    fn handle(&self, ctx: &CommandContext<'_>, args: &Args) -> Result<Outcome, CommandError> {
        let user = args.user("user").unwrap_or(&ctx.caller.caller);
        Ok(Outcome::reply(format::avatar(user)))
    }
}

// ---------------------------------------------------------------------------
// server
// ---------------------------------------------------------------------------

pub struct ServerHandler;

impl CommandHandler for ServerHandler {
    fn handle(&self, ctx: &CommandContext<'_>, _args: &Args) -> Result<Outcome, CommandError> {
        let guild = ctx.caller.guild.as_ref().ok_or(CommandError::GuildOnly)?;
        Ok(Outcome::reply(format::server(guild)))
    }
}

// ---------------------------------------------------------------------------
// kick, ban, timeout
// ---------------------------------------------------------------------------

pub struct ModerationHandler {
    pub action: ModerationAction,
}

impl CommandHandler for ModerationHandler {
    fn handle(&self, ctx: &CommandContext<'_>, args: &Args) -> Result<Outcome, CommandError> {
        let target = args.require_user("user")?.clone();
        let mutation = match self.action {
            ModerationAction::Kick => Mutation::kick(target),
            ModerationAction::Ban => Mutation::ban(target),
            ModerationAction::Timeout => {
                let secs = args.require_integer("duration")?;
                if !(1..=MAX_TIMEOUT_SECS).contains(&secs) {
                    return Err(CommandError::InvalidArgument("duration".into()));
                }
                Mutation::timeout(target, Duration::from_secs(secs as u64))
            }
        };
        info!(
            "[Commands] {} requested by {} against {}",
            self.action, ctx.caller.caller.id, mutation.target.id
        );
        Ok(Outcome::Mutation(mutation))
    }
}
