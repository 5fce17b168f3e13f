use poise::serenity_prelude as serenity;

use super::checks::is_workspace_admin;
use super::chat::GuildChat;
use super::{Context, Data, Error};
use crate::chat::Member;
use crate::commands::{self, ProvisionRequest};

pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![
        help(),
        provision(),
        deprovision(),
        update_team(),
        update_pseudo(),
        update_signatures(),
        urecovery(),
        rpassword(),
    ]
}

/// Show available commands
#[poise::command(prefix_command)]
pub async fn help(ctx: Context<'_>, #[rest] command: Option<String>) -> Result<(), Error> {
    poise::builtins::help(
        ctx,
        command.as_deref(),
        poise::builtins::HelpConfiguration::default(),
    )
    .await?;
    Ok(())
}

/// Provision an user
///
/// Creates the Google account, adds it to the team group and sets its
/// signature, then grants the default and team roles on Discord.
#[poise::command(prefix_command, guild_only, check = "is_workspace_admin")]
pub async fn provision(
    ctx: Context<'_>,
    #[description = "Member to provision"] member: serenity::Member,
    firstname: String,
    lastname: String,
    pseudo: String,
    #[description = "Team the member joins"] role_name: String,
) -> Result<(), Error> {
    let chat = GuildChat::new(ctx)?;
    let request = ProvisionRequest {
        firstname,
        lastname,
        pseudo,
        role_name,
    };
    commands::provision(&ctx.data().services(&chat), &Member::from(&member), &request).await?;
    Ok(())
}

/// Deprovision an user
///
/// Suspends the Google account and removes every Discord role.
#[poise::command(prefix_command, guild_only, check = "is_workspace_admin")]
pub async fn deprovision(ctx: Context<'_>, member: serenity::Member) -> Result<(), Error> {
    let chat = GuildChat::new(ctx)?;
    commands::deprovision(&ctx.data().services(&chat), &Member::from(&member)).await?;
    Ok(())
}

/// Update user team
#[poise::command(prefix_command, guild_only, rename = "uteam", check = "is_workspace_admin")]
pub async fn update_team(
    ctx: Context<'_>,
    member: serenity::Member,
    new_team_name: String,
) -> Result<(), Error> {
    let chat = GuildChat::new(ctx)?;
    commands::update_team(
        &ctx.data().services(&chat),
        &Member::from(&member),
        &new_team_name,
    )
    .await?;
    Ok(())
}

/// Update user pseudo
#[poise::command(prefix_command, guild_only, rename = "upseudo", check = "is_workspace_admin")]
pub async fn update_pseudo(
    ctx: Context<'_>,
    member: serenity::Member,
    new_pseudo: String,
) -> Result<(), Error> {
    let chat = GuildChat::new(ctx)?;
    commands::update_pseudo(
        &ctx.data().services(&chat),
        &Member::from(&member),
        &new_pseudo,
    )
    .await?;
    Ok(())
}

/// Update the signature of all users on gmail
#[poise::command(prefix_command, guild_only, rename = "usignatures", check = "is_workspace_admin")]
pub async fn update_signatures(ctx: Context<'_>) -> Result<(), Error> {
    let chat = GuildChat::new(ctx)?;
    commands::update_signatures(&ctx.data().services(&chat)).await?;
    Ok(())
}

/// Update recovery email of an user
#[poise::command(prefix_command, guild_only, check = "is_workspace_admin")]
pub async fn urecovery(
    ctx: Context<'_>,
    member: serenity::Member,
    backup_email: String,
) -> Result<(), Error> {
    let chat = GuildChat::new(ctx)?;
    commands::update_recovery(
        &ctx.data().services(&chat),
        &Member::from(&member),
        &backup_email,
    )
    .await?;
    Ok(())
}

/// Reset password of an user
#[poise::command(prefix_command, guild_only, check = "is_workspace_admin")]
pub async fn rpassword(ctx: Context<'_>, member: serenity::Member) -> Result<(), Error> {
    let chat = GuildChat::new(ctx)?;
    commands::reset_password(&ctx.data().services(&chat), &Member::from(&member)).await?;
    Ok(())
}
