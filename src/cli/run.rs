use anyhow::{Context, Result};
use clap::Args;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct RunCommand {
    /// Discord bot token (overrides discord.token)
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

pub async fn execute(cmd: RunCommand, config: Config) -> Result<()> {
    config.validate()?;

    let token = cmd
        .token
        .or_else(|| config.discord.token.clone())
        .context("No Discord token: set discord.token or DISCORD_TOKEN")?;

    crate::bot::run(config, token).await
}
