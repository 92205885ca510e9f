/// Input normalization — turn prefixed text lines and structured interactions
/// into the same `Invocation` shape.
use celestia_core::{ArgInput, ArgValue, CallerContext, Invocation};

use crate::registry::CommandTable;

/// Detect a prefixed command in a chat message.
///
/// Returns `None` for messages from bots, messages that don't start with the
/// prefix, and a bare prefix with no command name.
pub fn parse_prefixed(
    prefix: &str,
    content: &str,
    author_is_bot: bool,
    context: CallerContext,
) -> Option<Invocation> {
    if author_is_bot || prefix.is_empty() {
        return None;
    }
    let rest = content.strip_prefix(prefix)?;
    let mut tokens = rest.split_whitespace();
    let name = tokens.next()?;
    let args = tokens.map(|t| ArgInput::Token(t.to_string())).collect();
    Some(Invocation::new(name, args, context))
}

/// A platform-native command interaction with named, typed options.
#[derive(Debug, Clone)]
pub struct StructuredInteraction {
    pub command: String,
    pub options: Vec<(String, ArgValue)>,
    pub context: CallerContext,
}

/// Map a structured interaction's named options onto the descriptor's
/// positional parameters. Options the caller left out become `Missing`.
pub fn from_interaction(table: &CommandTable, interaction: StructuredInteraction) -> Invocation {
    let StructuredInteraction { command, mut options, context } = interaction;
    let args = match table.lookup(&command) {
        Some(def) => def
            .params
            .iter()
            .map(|spec| {
                match options.iter().position(|(name, _)| name.eq_ignore_ascii_case(&spec.name)) {
                    Some(i) => ArgInput::Value(options.swap_remove(i).1),
                    None => ArgInput::Missing,
                }
            })
            .collect(),
        None => Vec::new(),
    };
    Invocation::new(command, args, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use celestia_core::{Surface, UserProfile};

    fn ctx(surface: Surface) -> CallerContext {
        CallerContext::new(UserProfile::new(1, "alice", ""), surface)
    }

    #[test]
    fn test_detects_prefixed_command() {
        let inv = parse_prefixed("!", "!Timeout <@2>   60", false, ctx(Surface::TextPrefix)).unwrap();
        assert_eq!(inv.command, "timeout");
        assert_eq!(
            inv.args,
            vec![ArgInput::Token("<@2>".into()), ArgInput::Token("60".into())]
        );
    }

    #[test]
    fn test_ignores_non_commands() {
        assert!(parse_prefixed("!", "hello there", false, ctx(Surface::TextPrefix)).is_none());
        assert!(parse_prefixed("!", "!ping", true, ctx(Surface::TextPrefix)).is_none());
        assert!(parse_prefixed("!", "!   ", false, ctx(Surface::TextPrefix)).is_none());
        assert!(parse_prefixed("!", " !ping", false, ctx(Surface::TextPrefix)).is_none());
    }

    #[test]
    fn test_multi_char_prefix() {
        let inv = parse_prefixed("c!", "c!ping", false, ctx(Surface::TextPrefix)).unwrap();
        assert_eq!(inv.command, "ping");
        assert!(inv.args.is_empty());
    }

    #[test]
    fn test_interaction_options_follow_param_order() {
        let table = CommandTable::builtin().unwrap();
        let bob = UserProfile::new(2, "bob", "");
        let inv = from_interaction(
            &table,
            StructuredInteraction {
                command: "timeout".into(),
                options: vec![
                    ("duration".into(), ArgValue::Integer(60)),
                    ("user".into(), ArgValue::User(bob.clone())),
                ],
                context: ctx(Surface::Structured),
            },
        );
        assert_eq!(
            inv.args,
            vec![ArgInput::Value(ArgValue::User(bob)), ArgInput::Value(ArgValue::Integer(60))]
        );
    }

    #[test]
    fn test_interaction_absent_option_is_missing() {
        let table = CommandTable::builtin().unwrap();
        let inv = from_interaction(
            &table,
            StructuredInteraction {
                command: "avatar".into(),
                options: vec![],
                context: ctx(Surface::Structured),
            },
        );
        assert_eq!(inv.args, vec![ArgInput::Missing]);
    }
}
