//! Reply text for every command. Pure functions over already-validated values.

use std::time::Duration;

use celestia_core::{CommandError, GuildSnapshot, ModerationAction, Mutation, UserProfile};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::types::CommandDescriptor;

/// Stock answers for the magic 8-ball.
pub const EIGHT_BALL_PHRASES: [&str; 7] = [
    "Yes.",
    "No.",
    "Maybe.",
    "Definitely.",
    "Absolutely not!",
    "I have no idea.",
    "Ask again later.",
];

pub fn ping(latency: Option<Duration>) -> String {
    let ms = latency.map(|d| (d.as_secs_f64() * 1000.0).round() as u64).unwrap_or(0);
    format!("Pong! 🏓 Latency is {ms}ms.")
}

pub fn help(prefix: &str, commands: &[CommandDescriptor]) -> String {
    let mut lines = vec!["Commands available:".to_string()];
    for cmd in commands {
        let mut line = format!("- {} → {}", cmd.usage(prefix), cmd.description);
        if cmd.capability.is_some() {
            line.push_str(" (requires permission)");
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// Pick one 8-ball phrase uniformly at random.
pub fn pick_eight_ball<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    EIGHT_BALL_PHRASES.choose(rng).copied().unwrap_or("Ask again later.")
}

pub fn eight_ball(phrase: &str) -> String {
    format!("🎱 {phrase}")
}

pub fn avatar(user: &UserProfile) -> String {
    format!("{}'s avatar: {}", user.name, user.avatar_url)
}

pub fn server(guild: &GuildSnapshot) -> String {
    format!("Server name: {}\nTotal members: {}", guild.name, guild.member_count)
}

/// Confirmation sent once the platform client has carried out a mutation.
pub fn moderation_confirmation(mutation: &Mutation) -> String {
    let name = &mutation.target.name;
    match mutation.action {
        ModerationAction::Kick => format!("{name} has been kicked."),
        ModerationAction::Ban => format!("{name} has been banned."),
        ModerationAction::Timeout => {
            let secs = mutation.duration.map(|d| d.as_secs()).unwrap_or(0);
            format!("{name} has been timed out for {secs} seconds.")
        }
    }
}

pub fn rejection(err: &CommandError) -> String {
    format!("❌ {err}")
}

pub fn unknown(prefix: &str, name: &str) -> String {
    format!("❓ Unknown command `{name}`. Try `{prefix}help`.")
}
