use tracing::info;

use super::Services;
use crate::chat::Member;
use crate::error::CommandError;

/// Suspend the workspace account of `member` and strip their Discord roles.
pub async fn deprovision(svc: &Services<'_>, member: &Member) -> Result<(), CommandError> {
    svc.report(run(svc, member).await).await.map(drop)
}

async fn run(svc: &Services<'_>, member: &Member) -> Result<(), CommandError> {
    let user = svc.resolve(member).await?;

    svc.workspace.suspend_user(&user.email).await?;
    svc.chat.clear_roles(member).await?;

    info!(email = %user.email, member = member.id, "deprovisioned member");
    svc.chat
        .say(&format!("User {} deprovisioned", member.name))
        .await?;
    Ok(())
}
