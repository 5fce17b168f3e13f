use tracing::{info, warn};

use super::Services;
use crate::error::{CommandError, DomainError};
use crate::types::DirectoryUser;
use crate::user::User;

/// Outcome of a bulk signature update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignatureReport {
    pub total: usize,
    pub updated: usize,
    pub skipped: usize,
}

/// Regenerate the Gmail signature of every managed account.
///
/// Accounts the bot cannot handle (exempt, incomplete, unknown team) are
/// reported and skipped. The first Google error ends the batch.
pub async fn update_signatures(svc: &Services<'_>) -> Result<SignatureReport, CommandError> {
    let users = match svc.workspace.list_users().await {
        Ok(users) => users,
        Err(e) => {
            svc.chat.say(&e.to_string()).await?;
            return Err(e.into());
        }
    };

    let mut report = SignatureReport {
        total: users.len(),
        ..Default::default()
    };
    svc.chat
        .say(&format!("Starting to update {} users", report.total))
        .await?;

    for record in users {
        match update_one(svc, record).await {
            Ok(()) => report.updated += 1,
            Err(CommandError::Domain(e)) => {
                warn!(error = %e, "skipped signature");
                report.skipped += 1;
                svc.chat.say(&e.to_string()).await?;
            }
            Err(CommandError::Workspace(e)) => {
                svc.chat.say(&e.to_string()).await?;
                return Err(e.into());
            }
            Err(e) => return Err(e),
        }
    }

    info!(updated = report.updated, total = report.total, "updated signatures");
    svc.chat
        .say(&format!(
            "Updated signatures for {}/{} users",
            report.updated, report.total
        ))
        .await?;
    Ok(report)
}

async fn update_one(svc: &Services<'_>, record: DirectoryUser) -> Result<(), CommandError> {
    let user = User::from_record(record, &svc.config.google.schema)?;
    svc.ensure_managed(&user).await?;

    let team_name = user.team.clone().unwrap_or_default();
    let team = svc
        .config
        .team(&team_name)
        .ok_or_else(|| DomainError::TeamNotConfigured {
            email: user.email.clone(),
            team: team_name.clone(),
        })?;

    let signature = svc.templates.signature(&user, team)?;
    svc.workspace.update_signature(&user.email, &signature).await?;
    Ok(())
}
