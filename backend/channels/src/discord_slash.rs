//! Slash command registration built from the command table.

use anyhow::Context as _;
use celestia_commands::{CommandDescriptor, CommandTable, ParamKind};
use serenity::builder::{CreateCommand, CreateCommandOption};
use serenity::http::Http;
use serenity::model::application::{Command, CommandOptionType};
use serenity::model::id::GuildId;

fn option_type(kind: ParamKind) -> CommandOptionType {
    match kind {
        ParamKind::Text => CommandOptionType::String,
        ParamKind::User => CommandOptionType::User,
        ParamKind::Integer => CommandOptionType::Integer,
    }
}

/// Describe one command for the platform's application command API.
pub fn slash_command(def: &CommandDescriptor) -> CreateCommand {
    def.params.iter().fold(
        CreateCommand::new(def.name.as_str()).description(def.description.as_str()),
        |cmd, param| {
            cmd.add_option(
                CreateCommandOption::new(
                    option_type(param.kind),
                    param.name.as_str(),
                    param.description.as_str(),
                )
                .required(param.required),
            )
        },
    )
}

/// Register every command in the table, scoped to one guild when given.
///
/// Guild registration shows up immediately; global registration can take up
/// to an hour to propagate.
pub async fn register_commands(
    http: &Http,
    guild_id: Option<u64>,
    table: &CommandTable,
) -> anyhow::Result<usize> {
    let commands: Vec<CreateCommand> = table.all().iter().map(slash_command).collect();
    let registered = match guild_id {
        Some(id) => GuildId::new(id)
            .set_commands(http, commands)
            .await
            .with_context(|| format!("registering guild commands for {id}"))?,
        None => Command::set_global_commands(http, commands)
            .await
            .context("registering global commands")?,
    };
    Ok(registered.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command_json(name: &str) -> serde_json::Value {
        let table = CommandTable::builtin().unwrap();
        let def = table.lookup(name).unwrap();
        serde_json::to_value(slash_command(def)).unwrap()
    }

    #[test]
    fn test_kick_has_user_option() {
        let json = command_json("kick");
        assert_eq!(json["name"], "kick");
        let options = json["options"].as_array().unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0]["name"], "user");
    }

    #[test]
    fn test_timeout_option_order() {
        let json = command_json("timeout");
        let names: Vec<&str> = json["options"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["user", "duration"]);
    }

    #[test]
    fn test_ping_description() {
        let table = CommandTable::builtin().unwrap();
        let json = command_json("ping");
        assert_eq!(json["description"], table.lookup("ping").unwrap().description.as_str());
    }
}
