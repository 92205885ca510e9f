//! Turns a dispatch result into the message sent back on the originating surface.

use celestia_commands::format;
use celestia_core::{CommandError, DispatchResult, Surface};
use tracing::debug;

use crate::moderation::ModerationClient;

/// What to send back, and whether only the caller should see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyPlan {
    pub text: String,
    pub ephemeral: bool,
}

impl ReplyPlan {
    fn public(text: String) -> Self {
        Self { text, ephemeral: false }
    }

    fn private(text: String) -> Self {
        Self { text, ephemeral: true }
    }
}

/// Resolve a dispatch result into a reply, executing any requested mutation.
///
/// Mutation failures are reported the same way as dispatch rejections.
/// Unknown commands on the text surface get no reply, since any chat line
/// that happens to start with the prefix lands here.
pub async fn resolve_reply(
    result: &DispatchResult,
    surface: Surface,
    guild_id: Option<u64>,
    moderation: &dyn ModerationClient,
    prefix: &str,
) -> Option<ReplyPlan> {
    let plan = match result {
        DispatchResult::Reply(text) => ReplyPlan::public(text.clone()),
        DispatchResult::Rejected(err) => ReplyPlan::private(format::rejection(err)),
        DispatchResult::Unknown(name) if surface == Surface::TextPrefix => {
            debug!(command = %name, "Ignoring unknown prefixed command");
            return None;
        }
        DispatchResult::Unknown(name) => ReplyPlan::private(format::unknown(prefix, name)),
        DispatchResult::Mutation(mutation) => {
            let Some(guild_id) = guild_id else {
                return Some(ReplyPlan::private(format::rejection(&CommandError::GuildOnly)));
            };
            match moderation.apply(guild_id, mutation).await {
                Ok(()) => ReplyPlan::public(format::moderation_confirmation(mutation)),
                Err(err) => ReplyPlan::private(format::rejection(&err)),
            }
        }
    };
    Some(plan)
}
