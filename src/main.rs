use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workspace_bot::cli::{self, Cli, Commands};
use workspace_bot::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "workspace_bot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match cli.command {
        // Completions need no configuration
        Commands::Completions(cmd) => cli::completions::execute(cmd),
        Commands::Run(cmd) => cli::run::execute(cmd, load_config(&cli.config)?).await,
        Commands::CheckConfig => cli::check::execute(&load_config(&cli.config)?),
        Commands::Teams => cli::teams::execute(&load_config(&cli.config)?, cli.format),
    }
}

fn load_config(path: &Option<PathBuf>) -> Result<Config> {
    Config::load(path.as_deref())
}
