pub mod check;
pub mod completions;
pub mod output;
pub mod run;
pub mod teams;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Discord bot managing Google Workspace accounts
#[derive(Parser, Debug)]
#[command(name = "workspace-bot")]
#[command(
    author,
    version,
    about = "Discord bot managing Google Workspace accounts",
    long_about = None
)]
pub struct Cli {
    /// Config file (default: platform config directory)
    #[arg(short, long, env = "WORKSPACE_BOT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connect to Discord and serve commands
    Run(run::RunCommand),

    /// Validate the configuration and render every template
    CheckConfig,

    /// List configured teams
    Teams,

    /// Generate shell completions
    Completions(completions::CompletionsCommand),
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Table output (best for humans)
    #[default]
    Table,
    /// Plain output (minimal, for scripting)
    Plain,
}
