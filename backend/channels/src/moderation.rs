//! Moderation client: carries out the mutations handlers request.

use std::sync::Arc;

use async_trait::async_trait;
use celestia_core::{CommandError, ModerationAction, Mutation};
use serenity::builder::EditMember;
use serenity::http::Http;
use serenity::model::id::{GuildId, UserId};
use tracing::{info, warn};

/// Executes kick/ban/timeout requests against the platform.
#[async_trait]
pub trait ModerationClient: Send + Sync {
    async fn apply(&self, guild_id: u64, mutation: &Mutation) -> Result<(), CommandError>;
}

/// Map an HTTP status from a failed moderation call onto the error taxonomy.
///
/// 403 means the bot may not act on the target (role hierarchy, owner), 404
/// means the member left or never existed.
pub fn classify_status(target: &str, status: Option<u16>, message: &str) -> CommandError {
    match status {
        Some(403) => CommandError::TargetNotActionable(target.to_string()),
        Some(404) => CommandError::TargetNotFound(target.to_string()),
        _ => CommandError::RemoteCallFailed(message.to_string()),
    }
}

fn classify_error(target: &str, err: serenity::Error) -> CommandError {
    let status = match &err {
        serenity::Error::Http(http_err) => http_err.status_code().map(|s| s.as_u16()),
        _ => None,
    };
    classify_status(target, status, &err.to_string())
}

pub struct SerenityModeration {
    http: Arc<Http>,
}

impl SerenityModeration {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ModerationClient for SerenityModeration {
    async fn apply(&self, guild_id: u64, mutation: &Mutation) -> Result<(), CommandError> {
        if guild_id == 0 || mutation.target.id.0 == 0 {
            return Err(CommandError::TargetNotFound(mutation.target.name.clone()));
        }
        let guild = GuildId::new(guild_id);
        let user = UserId::new(mutation.target.id.0);

        let result = match mutation.action {
            ModerationAction::Kick => guild.kick(&self.http, user).await,
            ModerationAction::Ban => guild.ban(&self.http, user, 0).await,
            ModerationAction::Timeout => {
                let duration = mutation
                    .duration
                    .ok_or_else(|| CommandError::MissingArgument("duration".into()))?;
                let delta = chrono::Duration::from_std(duration)
                    .map_err(|_| CommandError::InvalidArgument("duration".into()))?;
                let until = chrono::Utc::now() + delta;
                guild
                    .edit_member(
                        &self.http,
                        user,
                        EditMember::new().disable_communication_until(until.to_rfc3339()),
                    )
                    .await
                    .map(|_| ())
            }
        };

        match result {
            Ok(()) => {
                info!(guild = guild_id, target = %mutation.target.id, action = %mutation.action, "[Moderation] Applied");
                Ok(())
            }
            Err(e) => {
                warn!(guild = guild_id, target = %mutation.target.id, action = %mutation.action, error = %e, "[Moderation] Failed");
                Err(classify_error(&mutation.target.name, e))
            }
        }
    }
}
