//! `celestia check-config`: validate the environment without connecting.

use anyhow::{bail, Result};
use celestia_config::{from_env, summary, validate};

pub fn run() -> Result<()> {
    println!("\n🔍 Checking Celestia configuration...\n");

    let config = match from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("  🔴 {e}");
            bail!("configuration could not be loaded");
        }
    };

    println!("{}", serde_json::to_string_pretty(&summary(&config))?);
    println!();

    let report = validate(&config);
    for warning in &report.warnings {
        println!("  🟡 {}: {}", warning.path, warning.message);
    }
    for error in &report.errors {
        println!("  🔴 {}: {}", error.path, error.message);
    }

    println!();
    if report.is_valid() {
        println!("✅ Configuration is valid.");
        Ok(())
    } else {
        bail!("{} configuration error(s)", report.errors.len())
    }
}
