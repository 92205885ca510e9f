//! `celestia commands`: print the command table.

use anyhow::Result;
use celestia_commands::{format, CommandSummary, CommandTable};

pub fn run(prefix: &str, json: bool) -> Result<()> {
    let table = CommandTable::builtin()?;
    println!("{}", render(&table, prefix, json)?);
    Ok(())
}

fn render(table: &CommandTable, prefix: &str, json: bool) -> Result<String> {
    if json {
        let summaries: Vec<CommandSummary<'_>> = table.all().iter().map(CommandSummary::from).collect();
        return Ok(serde_json::to_string_pretty(&summaries)?);
    }
    Ok(format::help(prefix, table.all()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_lists_every_command() {
        let table = CommandTable::builtin().unwrap();
        let out = render(&table, "!", true).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), table.len());
    }

    #[test]
    fn text_uses_prefix() {
        let table = CommandTable::builtin().unwrap();
        let out = render(&table, "?", false).unwrap();
        assert!(out.starts_with("Commands available:"));
        assert!(out.contains("?ping"));
    }
}
