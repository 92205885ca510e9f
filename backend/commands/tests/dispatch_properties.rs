use std::collections::HashSet;
use std::time::Duration;

use celestia_commands::format::EIGHT_BALL_PHRASES;
use celestia_commands::{
    CommandDispatcher, StructuredInteraction, build_default_dispatcher, from_interaction,
    parse_prefixed,
};
use celestia_core::{
    ArgValue, CallerContext, Capability, CapabilitySet, CommandError, DispatchResult, GuildSnapshot,
    Mutation, Surface, UserProfile,
};

fn alice() -> UserProfile {
    UserProfile::new(100, "alice", "https://cdn.example/avatars/alice.png")
}

fn bob() -> UserProfile {
    UserProfile::new(200, "bob", "https://cdn.example/avatars/bob.png")
}

fn context(surface: Surface, caps: CapabilitySet) -> CallerContext {
    CallerContext::new(bob(), surface)
        .with_capabilities(caps)
        .with_guild(GuildSnapshot { name: "Celestia".into(), member_count: 3 })
        .with_latency(Duration::from_millis(87))
        .with_resolved(alice())
}

fn dispatcher() -> CommandDispatcher {
    build_default_dispatcher("!").unwrap()
}

fn text(d: &CommandDispatcher, line: &str, caps: CapabilitySet) -> DispatchResult {
    let inv = parse_prefixed("!", line, false, context(Surface::TextPrefix, caps)).unwrap();
    d.dispatch(&inv)
}

fn slash(
    d: &CommandDispatcher,
    command: &str,
    options: Vec<(&str, ArgValue)>,
    caps: CapabilitySet,
) -> DispatchResult {
    let inv = from_interaction(
        d.table(),
        StructuredInteraction {
            command: command.into(),
            options: options.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
            context: context(Surface::Structured, caps),
        },
    );
    d.dispatch(&inv)
}

fn alternating_case(name: &str) -> String {
    name.chars()
        .enumerate()
        .map(|(i, c)| if i % 2 == 0 { c.to_ascii_uppercase() } else { c })
        .collect()
}

#[test]
fn lookup_ignores_case_for_every_command() {
    let d = dispatcher();
    for def in d.table().all() {
        for variant in [def.name.to_uppercase(), def.name.clone(), alternating_case(&def.name)] {
            let found = d.table().lookup(&variant).unwrap();
            assert_eq!(found.name, def.name);
        }
    }
}

#[test]
fn unregistered_command_is_unknown() {
    let d = dispatcher();
    assert_eq!(
        text(&d, "!dance wildly", CapabilitySet::all()),
        DispatchResult::Unknown("dance".into())
    );
    assert_eq!(
        slash(&d, "dance", vec![], CapabilitySet::all()),
        DispatchResult::Unknown("dance".into())
    );
}

#[test]
fn ping_reports_latency() {
    let d = dispatcher();
    let DispatchResult::Reply(reply) = text(&d, "!ping", CapabilitySet::empty()) else {
        panic!("ping must reply");
    };
    let digits: String = reply.chars().filter(char::is_ascii_digit).collect();
    let ms: u64 = digits.parse().unwrap();
    assert_eq!(ms, 87);
    assert!(reply.starts_with("Pong!"));
}

#[test]
fn say_requires_text_and_echoes_it() {
    let d = dispatcher();
    assert_eq!(
        text(&d, "!say", CapabilitySet::empty()),
        DispatchResult::Rejected(CommandError::MissingArgument("text".into()))
    );
    assert_eq!(
        slash(&d, "say", vec![("text", ArgValue::Text("   ".into()))], CapabilitySet::empty())
            .rejection_reason()
            .as_deref(),
        Some("missing argument: text")
    );
    assert_eq!(
        text(&d, "!say hello world", CapabilitySet::empty()),
        DispatchResult::Reply("hello world".into())
    );
}

#[test]
fn timeout_rejects_non_numeric_duration() {
    let d = dispatcher();
    let caps = CapabilitySet::empty().with(Capability::Moderate);
    let result = text(&d, "!timeout <@100> abc", caps);
    assert_eq!(result.rejection_reason().as_deref(), Some("invalid argument: duration"));
}

#[test]
fn moderation_without_capability_is_always_denied() {
    let d = dispatcher();
    let lines = [
        "!kick <@100>",
        "!kick",
        "!kick nobody",
        "!ban <@100>",
        "!ban <@999>",
        "!timeout <@100> 60",
        "!timeout <@100> abc",
        "!timeout",
    ];
    for line in lines {
        assert_eq!(
            text(&d, line, CapabilitySet::empty()),
            DispatchResult::Rejected(CommandError::InsufficientPermission),
            "{line}"
        );
    }
    // Holding a different capability does not help.
    let wrong = CapabilitySet::empty().with(Capability::Kick);
    assert_eq!(
        text(&d, "!ban <@100>", wrong),
        DispatchResult::Rejected(CommandError::InsufficientPermission)
    );
}

#[test]
fn moderation_with_capability_yields_mutation() {
    let d = dispatcher();
    assert_eq!(
        text(&d, "!ban <@!100>", CapabilitySet::empty().with(Capability::Ban)),
        DispatchResult::Mutation(Mutation::ban(alice()))
    );
    assert_eq!(
        text(&d, "!timeout 100 90", CapabilitySet::empty().with(Capability::Moderate)),
        DispatchResult::Mutation(Mutation::timeout(alice(), Duration::from_secs(90)))
    );
}

#[test]
fn eight_ball_only_uses_stock_phrases_and_covers_them() {
    let d = dispatcher();
    let mut seen = HashSet::new();
    for _ in 0..1000 {
        let DispatchResult::Reply(reply) = text(&d, "!8ball will it rain?", CapabilitySet::empty())
        else {
            panic!("8ball must reply");
        };
        let phrase = reply.strip_prefix("🎱 ").unwrap().to_string();
        assert!(EIGHT_BALL_PHRASES.contains(&phrase.as_str()), "{phrase}");
        seen.insert(phrase);
    }
    assert_eq!(seen.len(), EIGHT_BALL_PHRASES.len());
}

#[test]
fn both_surfaces_agree() {
    let d = dispatcher();
    let none = CapabilitySet::empty;
    let moderator = || CapabilitySet::all();

    assert_eq!(
        text(&d, "!avatar <@100>", none()),
        slash(&d, "avatar", vec![("user", ArgValue::User(alice()))], none())
    );
    assert_eq!(text(&d, "!avatar", none()), slash(&d, "avatar", vec![], none()));
    assert_eq!(
        text(&d, "!say hello world", none()),
        slash(&d, "say", vec![("text", ArgValue::Text("hello world".into()))], none())
    );
    assert_eq!(text(&d, "!server", none()), slash(&d, "server", vec![], none()));
    assert_eq!(text(&d, "!help", none()), slash(&d, "help", vec![], none()));
    assert_eq!(
        text(&d, "!timeout <@100> 45", moderator()),
        slash(
            &d,
            "timeout",
            vec![("user", ArgValue::User(alice())), ("duration", ArgValue::Integer(45))],
            moderator()
        )
    );
    assert_eq!(
        text(&d, "!kick <@100>", none()),
        slash(&d, "kick", vec![("user", ArgValue::User(alice()))], none())
    );
}

#[test]
fn server_reports_guild_snapshot() {
    let d = dispatcher();
    assert_eq!(
        text(&d, "!server", CapabilitySet::empty()),
        DispatchResult::Reply("Server name: Celestia\nTotal members: 3".into())
    );
}
