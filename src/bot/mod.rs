//! Discord front end: poise prefix commands over the shared command handlers.

pub mod chat;
pub mod checks;
pub mod commands;

use std::sync::Arc;

use anyhow::Context as _;
use poise::serenity_prelude as serenity;
use tracing::{error, info, warn};

use crate::api::{GoogleClient, ServiceAccount};
use crate::chat::Chat;
use crate::commands::Services;
use crate::config::Config;
use crate::templates::Templates;
use crate::workspace::Workspace;

pub type Error = anyhow::Error;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// State shared by every command invocation
pub struct Data {
    pub config: Config,
    pub workspace: Arc<dyn Workspace>,
    pub templates: Templates,
}

impl Data {
    pub fn services<'a>(&'a self, chat: &'a dyn Chat) -> Services<'a> {
        Services {
            config: &self.config,
            workspace: self.workspace.as_ref(),
            chat,
            templates: &self.templates,
        }
    }
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!(error = ?error, "failed to set up bot");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(
                command = %ctx.command().qualified_name,
                author = %ctx.author().name,
                error = %error,
                "command failed"
            );
        }
        poise::FrameworkError::CommandCheckFailed { error, ctx, .. } => {
            if let Some(error) = error {
                error!(command = %ctx.command().qualified_name, error = %error, "permission check failed");
            } else {
                warn!(
                    command = %ctx.command().qualified_name,
                    author = %ctx.author().name,
                    "caller is not a workspace admin"
                );
            }
            if let Err(e) = ctx.say("You are not allowed to run this command").await {
                error!(error = %e, "failed to report refused command");
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!(error = %e, "error while handling error");
            }
        }
    }
}

/// Connect to Discord and serve commands until the gateway closes
pub async fn run(config: Config, token: String) -> anyhow::Result<()> {
    let auth = ServiceAccount::from_file(&config.google.service_account_key)
        .context("Failed to load Google service account")?;
    info!(service_account = auth.client_email(), "loaded Google credentials");

    let workspace = GoogleClient::new(&config.google, Arc::new(auth))?;
    let templates = Templates::from_dir(&config.templates_dir);
    let prefix = config.discord.prefix.clone();

    let data = Data {
        config,
        workspace: Arc::new(workspace),
        templates,
    };

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(prefix),
                ..Default::default()
            },
            on_error: |error| Box::pin(on_error(error)),
            pre_command: |ctx| {
                Box::pin(async move {
                    info!(
                        command = %ctx.command().qualified_name,
                        author = %ctx.author().name,
                        "running command"
                    );
                })
            },
            ..Default::default()
        })
        .setup(move |_ctx, ready, _framework| {
            Box::pin(async move {
                info!(user = %ready.user.name, guilds = ready.guilds.len(), "connected to Discord");
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_MEMBERS;

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .context("Failed to create Discord client")?;

    client.start().await.context("Discord client stopped")?;
    Ok(())
}
