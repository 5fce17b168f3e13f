use std::time::Duration;

use tracing::info;

use super::Services;
use crate::chat::Member;
use crate::error::{CommandError, DomainError};
use crate::password::generate_password;
use crate::user::User;
use crate::workspace::NewAccount;

/// Arguments of `provision`
#[derive(Debug, Clone)]
pub struct ProvisionRequest {
    pub firstname: String,
    pub lastname: String,
    pub pseudo: String,
    /// Team the member joins
    pub role_name: String,
}

/// Create the workspace account of `member` and grant the matching Discord roles.
pub async fn provision(
    svc: &Services<'_>,
    member: &Member,
    request: &ProvisionRequest,
) -> Result<(), CommandError> {
    svc.report(run(svc, member, request).await).await.map(drop)
}

async fn run(svc: &Services<'_>, member: &Member, request: &ProvisionRequest) -> Result<(), CommandError> {
    let team = svc
        .config
        .team(&request.role_name)
        .ok_or_else(|| DomainError::UnknownRole(request.role_name.clone()))?;
    if !team.is_team_role() {
        return Err(DomainError::NotTeamRole(request.role_name.clone()).into());
    }

    let user = User {
        email: User::email_from_name(&request.firstname, &request.lastname, &svc.config.google.domain),
        firstname: request.firstname.clone(),
        lastname: request.lastname.clone(),
        pseudo: Some(request.pseudo.clone()),
        role: None,
        team: Some(request.role_name.clone()),
        discord_id: Some(member.id),
    };
    let password = generate_password();
    let signature = svc.templates.signature(&user, team)?;
    let welcome = svc.templates.welcome(&user.email, &password)?;
    let team_message = svc.templates.team_message(team)?;

    svc.workspace
        .create_user(&NewAccount {
            email: user.email.clone(),
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            password: password.clone(),
            team: request.role_name.clone(),
            discord_id: member.id,
            pseudo: request.pseudo.clone(),
        })
        .await?;
    svc.workspace.add_to_group(&user.email, &team.google_email).await?;

    // Gmail rejects the signature update for a while after the account is created
    let delay = svc.config.google.signature_delay_secs;
    if delay > 0 {
        tokio::time::sleep(Duration::from_secs(delay)).await;
    }
    svc.workspace.update_signature(&user.email, &signature).await?;

    for name in &svc.config.discord.roles.default {
        let role = svc.chat_role(name, DomainError::MissingChatRole).await?;
        svc.chat.add_role(member, role).await?;
    }
    let role = svc.chat_role(&team.discord, DomainError::MissingChatRole).await?;
    svc.chat.add_role(member, role).await?;

    svc.chat.rename(member, &user.nickname()).await?;
    svc.chat
        .say(&format!("User {} provisioned", user.email))
        .await?;
    info!(email = %user.email, member = member.id, team = %request.role_name, "provisioned member");

    svc.chat.direct_message(member, &welcome).await?;
    if !team_message.is_empty() {
        svc.chat.direct_message(member, &team_message).await?;
    }

    Ok(())
}
