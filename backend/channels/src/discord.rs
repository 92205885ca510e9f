use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use celestia_commands::dispatch::parse_user_mention;
use celestia_commands::{CommandDispatcher, StructuredInteraction, from_interaction, parse_prefixed};
use celestia_core::{
    ArgValue, CallerContext, Capability, CapabilitySet, GuildSnapshot, Invocation, Surface,
    UserProfile,
};
use celestia_logging::CommandAuditLog;
use serenity::builder::{CreateInteractionResponse, CreateInteractionResponseMessage};
use serenity::gateway::ShardManager;
use serenity::model::application::{CommandInteraction, Interaction, ResolvedValue};
use serenity::model::channel::Message as DiscordMessage;
use serenity::model::gateway::Ready;
use serenity::model::guild::Member;
use serenity::model::id::{GuildId, UserId as DiscordUserId};
use serenity::model::permissions::Permissions;
use serenity::model::user::User;
use serenity::prelude::*;
use tracing::{debug, error, info, warn};

use crate::ChannelAdapter;
use crate::discord_slash::register_commands;
use crate::moderation::SerenityModeration;
use crate::relay::{ReplyPlan, resolve_reply};

/// Shard manager handle stored in the client data map so handlers can read
/// heartbeat latency.
pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<ShardManager>;
}

/// Translate member permissions into the capabilities the core understands.
pub fn capabilities_from_permissions(perms: Permissions) -> CapabilitySet {
    if perms.administrator() {
        return CapabilitySet::all();
    }
    let mut set = CapabilitySet::empty();
    if perms.kick_members() {
        set = set.with(Capability::Kick);
    }
    if perms.ban_members() {
        set = set.with(Capability::Ban);
    }
    if perms.moderate_members() {
        set = set.with(Capability::Moderate);
    }
    set
}

pub fn profile_from_user(user: &User) -> UserProfile {
    UserProfile::new(user.id.get(), user.name.clone(), user.face())
}

async fn shard_latency(ctx: &Context) -> Option<Duration> {
    let manager = {
        let data = ctx.data.read().await;
        data.get::<ShardManagerContainer>()?.clone()
    };
    let runners = manager.runners.lock().await;
    runners.get(&ctx.shard_id).and_then(|runner| runner.latency)
}

fn cached_snapshot(ctx: &Context, guild_id: GuildId) -> Option<GuildSnapshot> {
    let guild = ctx.cache.guild(guild_id)?;
    Some(GuildSnapshot {
        name: guild.name.clone(),
        member_count: guild.member_count,
    })
}

fn cached_permissions(ctx: &Context, guild_id: GuildId, user: DiscordUserId) -> Option<Permissions> {
    let guild = ctx.cache.guild(guild_id)?;
    let member = guild.members.get(&user)?;
    Some(guild.member_permissions(member))
}

fn permissions_of(ctx: &Context, guild_id: GuildId, member: &Member) -> Option<Permissions> {
    let guild = ctx.cache.guild(guild_id)?;
    Some(guild.member_permissions(member))
}

struct Handler {
    dispatcher: Arc<CommandDispatcher>,
    guild_id: Option<u64>,
}

impl Handler {
    async fn text_context(&self, ctx: &Context, msg: &DiscordMessage) -> CallerContext {
        let mut context = CallerContext::new(profile_from_user(&msg.author), Surface::TextPrefix);

        if let Some(latency) = shard_latency(ctx).await {
            context = context.with_latency(latency);
        }
        for user in &msg.mentions {
            context = context.with_resolved(profile_from_user(user));
        }
        // Bare ids are only resolvable when the user is already cached.
        for token in msg.content.split_whitespace().skip(1) {
            let Some(id) = parse_user_mention(token) else { continue };
            if id.0 == 0 || context.resolve_user(id).is_some() {
                continue;
            }
            let cached = ctx.cache.user(DiscordUserId::new(id.0)).map(|u| profile_from_user(&u));
            if let Some(profile) = cached {
                context = context.with_resolved(profile);
            }
        }

        let Some(guild_id) = msg.guild_id else {
            return context;
        };
        if let Some(snapshot) = cached_snapshot(ctx, guild_id) {
            context = context.with_guild(snapshot);
        }
        let perms = match cached_permissions(ctx, guild_id, msg.author.id) {
            Some(perms) => Some(perms),
            None => match guild_id.member(ctx, msg.author.id).await {
                Ok(member) => permissions_of(ctx, guild_id, &member),
                Err(e) => {
                    warn!(guild = %guild_id, user = %msg.author.id, error = %e, "Could not fetch member");
                    None
                }
            },
        };
        if let Some(perms) = perms {
            context = context.with_capabilities(capabilities_from_permissions(perms));
        }
        context
    }

    async fn interaction_context(&self, ctx: &Context, command: &CommandInteraction) -> CallerContext {
        let mut context = CallerContext::new(profile_from_user(&command.user), Surface::Structured);
        if let Some(latency) = shard_latency(ctx).await {
            context = context.with_latency(latency);
        }
        if let Some(guild_id) = command.guild_id {
            if let Some(snapshot) = cached_snapshot(ctx, guild_id) {
                context = context.with_guild(snapshot);
            }
        }
        if let Some(perms) = command.member.as_ref().and_then(|m| m.permissions) {
            context = context.with_capabilities(capabilities_from_permissions(perms));
        }
        context
    }

    async fn settle(
        &self,
        ctx: &Context,
        inv: &Invocation,
        guild_id: Option<GuildId>,
    ) -> Option<ReplyPlan> {
        let result = self.dispatcher.dispatch(inv);
        CommandAuditLog::record(inv, &result);
        let moderation = SerenityModeration::new(ctx.http.clone());
        resolve_reply(
            &result,
            inv.context.surface,
            guild_id.map(|g| g.get()),
            &moderation,
            self.dispatcher.prefix(),
        )
        .await
    }
}

fn interaction_options(command: &CommandInteraction) -> Vec<(String, ArgValue)> {
    command
        .data
        .options()
        .into_iter()
        .filter_map(|opt| {
            let value = match opt.value {
                ResolvedValue::String(s) => ArgValue::Text(s.to_string()),
                ResolvedValue::Integer(i) => ArgValue::Integer(i),
                ResolvedValue::User(user, _) => ArgValue::User(profile_from_user(user)),
                _ => return None,
            };
            Some((opt.name.to_string(), value))
        })
        .collect()
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: DiscordMessage) {
        let prefix = self.dispatcher.prefix();
        if msg.author.bot || !msg.content.starts_with(prefix) {
            return;
        }

        let context = self.text_context(&ctx, &msg).await;
        let Some(inv) = parse_prefixed(prefix, &msg.content, msg.author.bot, context) else {
            return;
        };
        debug!(channel = %msg.channel_id, command = %inv.command, "Prefixed command");

        let Some(plan) = self.settle(&ctx, &inv, msg.guild_id).await else {
            return;
        };
        if let Err(e) = msg.channel_id.say(&ctx.http, plan.text).await {
            error!(channel = %msg.channel_id, error = %e, "Error sending reply");
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        let context = self.interaction_context(&ctx, &command).await;
        let inv = from_interaction(
            self.dispatcher.table(),
            StructuredInteraction {
                command: command.data.name.clone(),
                options: interaction_options(&command),
                context,
            },
        );
        debug!(command = %inv.command, "Slash command");

        let Some(plan) = self.settle(&ctx, &inv, command.guild_id).await else {
            return;
        };
        let response = CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .content(plan.text)
                .ephemeral(plan.ephemeral),
        );
        if let Err(e) = command.create_response(&ctx.http, response).await {
            error!(command = %command.data.name, error = %e, "Error responding to interaction");
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, guilds = ready.guilds.len(), "Discord connected");
        match register_commands(&ctx.http, self.guild_id, self.dispatcher.table()).await {
            Ok(count) => info!(count, guild = ?self.guild_id, "Registered slash commands"),
            Err(e) => error!(error = %e, "Slash command registration failed"),
        }
    }
}

pub struct DiscordAdapter {
    token: String,
    guild_id: Option<u64>,
    dispatcher: Arc<CommandDispatcher>,
}

impl DiscordAdapter {
    pub fn new(token: String, guild_id: Option<u64>, dispatcher: Arc<CommandDispatcher>) -> Self {
        Self { token, guild_id, dispatcher }
    }
}

#[async_trait]
impl ChannelAdapter for DiscordAdapter {
    fn name(&self) -> &str {
        "discord"
    }

    async fn start(&self) -> anyhow::Result<()> {
        info!(prefix = %self.dispatcher.prefix(), "Starting Discord adapter");

        let intents = GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MEMBERS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT;

        let handler = Handler {
            dispatcher: self.dispatcher.clone(),
            guild_id: self.guild_id,
        };
        let mut client = Client::builder(&self.token, intents)
            .event_handler(handler)
            .await?;

        {
            let mut data = client.data.write().await;
            data.insert::<ShardManagerContainer>(client.shard_manager.clone());
        }

        if let Err(why) = client.start().await {
            error!(error = %why, "Client error");
            anyhow::bail!("Discord client error: {why}");
        }
        Ok(())
    }
}
