use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

use crate::config::Config;

use super::output::{print_output, print_warning};
use super::OutputFormat;

#[derive(Debug, Serialize, Tabled)]
struct TeamRow {
    #[tabled(rename = "Team")]
    name: String,
    #[tabled(rename = "Google group")]
    group: String,
    #[tabled(rename = "Discord role")]
    discord: String,
    #[tabled(rename = "Team role")]
    team_role: String,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "Managed")]
    managed: bool,
}

pub fn execute(config: &Config, format: OutputFormat) -> Result<()> {
    if config.teams.is_empty() {
        print_warning("No teams configured");
        return Ok(());
    }

    print_output(&rows(config), format);
    Ok(())
}

fn rows(config: &Config) -> Vec<TeamRow> {
    let skipped = config.skipped_groups();
    config
        .teams
        .iter()
        .map(|(name, team)| TeamRow {
            name: name.clone(),
            group: team.google_email.clone(),
            discord: team.discord.clone(),
            team_role: team.team_role.clone().unwrap_or_default(),
            message: team.message_template.clone().unwrap_or_default(),
            managed: !skipped.contains(&team.google_email.to_lowercase()),
        })
        .collect()
}
