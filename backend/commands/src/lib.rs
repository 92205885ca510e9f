pub mod detection;
pub mod dispatch;
pub mod format;
pub mod handlers;
pub mod permission;
pub mod registry;
pub mod types;

use std::sync::Arc;

pub use detection::{StructuredInteraction, from_interaction, parse_prefixed};
pub use dispatch::{Args, CommandContext, CommandDispatcher, CommandHandler, Outcome, coerce_args};
pub use handlers::{
    AvatarHandler, EightBallHandler, HelpHandler, ModerationHandler, PingHandler, SayHandler,
    ServerHandler,
};
pub use permission::authorize;
pub use registry::{CommandTable, builtin_commands};
pub use types::{CommandDescriptor, CommandSummary, ParamKind, ParamSpec};

use celestia_core::CommandError;

/// Build a dispatcher over the built-in command table.
pub fn build_default_dispatcher(prefix: impl Into<String>) -> Result<CommandDispatcher, CommandError> {
    let table = CommandTable::builtin()?;
    Ok(CommandDispatcher::new(Arc::new(table), prefix))
}
