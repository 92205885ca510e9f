/// Permission gate — decides whether a caller may run a command.
use celestia_core::{Capability, CapabilitySet};
use tracing::debug;

/// Returns `true` if `held` satisfies `required`. No requirement always passes.
///
/// This is a pure lookup: the capability set was computed by the platform
/// layer before the invocation reached the dispatcher.
pub fn authorize(held: &CapabilitySet, required: Option<Capability>) -> bool {
    match required {
        None => true,
        Some(cap) => {
            let allowed = held.contains(cap);
            if !allowed {
                debug!(required = %cap, "[Permission] Caller lacks capability");
            }
            allowed
        }
    }
}
