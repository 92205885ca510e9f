use async_trait::async_trait;

pub mod discord;
pub mod discord_slash;
pub mod moderation;
pub mod relay;

pub use discord::{DiscordAdapter, capabilities_from_permissions, profile_from_user};
pub use moderation::{ModerationClient, SerenityModeration, classify_status};
pub use relay::{ReplyPlan, resolve_reply};

/// All surface adapters implement this trait.
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    /// Human-readable adapter name for logging.
    fn name(&self) -> &str;

    /// Connect and process events until the connection ends.
    async fn start(&self) -> anyhow::Result<()>;
}
