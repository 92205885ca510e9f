pub mod error;
pub mod invocation;
pub mod outcome;
pub mod types;

pub use error::CommandError;
pub use invocation::{ArgInput, ArgValue, CallerContext, Invocation, Surface};
pub use outcome::{DispatchResult, ModerationAction, Mutation, MAX_TIMEOUT_SECS};
pub use types::{Capability, CapabilitySet, GuildSnapshot, UserId, UserProfile};
