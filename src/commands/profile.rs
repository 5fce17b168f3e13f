use tracing::info;

use super::Services;
use crate::chat::Member;
use crate::error::CommandError;
use crate::password::generate_password;

/// Change the pseudo of `member` and rename them to match.
pub async fn update_pseudo(
    svc: &Services<'_>,
    member: &Member,
    new_pseudo: &str,
) -> Result<(), CommandError> {
    svc.report(run_pseudo(svc, member, new_pseudo).await)
        .await
        .map(drop)
}

async fn run_pseudo(svc: &Services<'_>, member: &Member, new_pseudo: &str) -> Result<(), CommandError> {
    let mut user = svc.resolve(member).await?;

    svc.workspace.update_pseudo(&user.email, new_pseudo).await?;
    user.pseudo = Some(new_pseudo.to_string());

    let old_nick = member.display_name();
    let new_nick = user.nickname();
    svc.chat.rename(member, &new_nick).await?;

    info!(email = %user.email, pseudo = new_pseudo, "updated member pseudo");
    svc.chat
        .say(&format!(
            "User {} you now shall be called {} !",
            old_nick, new_nick
        ))
        .await?;
    Ok(())
}

/// Set the recovery address of `member`.
pub async fn update_recovery(
    svc: &Services<'_>,
    member: &Member,
    backup_email: &str,
) -> Result<(), CommandError> {
    svc.report(run_recovery(svc, member, backup_email).await)
        .await
        .map(drop)
}

async fn run_recovery(svc: &Services<'_>, member: &Member, backup_email: &str) -> Result<(), CommandError> {
    let user = svc.resolve(member).await?;

    svc.workspace
        .update_recovery_email(&user.email, backup_email)
        .await?;

    svc.chat
        .say(&format!(
            "Updated recovery information for user {}",
            member.name
        ))
        .await?;
    Ok(())
}

/// Give `member` a temporary password, to be changed at next login.
pub async fn reset_password(svc: &Services<'_>, member: &Member) -> Result<(), CommandError> {
    svc.report(run_reset(svc, member).await).await.map(drop)
}

async fn run_reset(svc: &Services<'_>, member: &Member) -> Result<(), CommandError> {
    let user = svc.resolve(member).await?;

    let password = generate_password();
    let message = svc.templates.reset_password(&user.email, &password)?;

    svc.workspace
        .update_password(&user.email, &password, true)
        .await?;
    svc.chat.direct_message(member, &message).await?;

    info!(email = %user.email, "reset member password");
    svc.chat
        .say(&format!("Sent a new password to {} in PM", member.name))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fakes::{jane, member, ChatEvent, Harness, Mutation};

    #[tokio::test]
    async fn pseudo_renames_member() {
        let h = Harness::new();
        h.workspace.add_user(jane());

        update_pseudo(&h.services(), &member(), "janed").await.unwrap();

        assert_eq!(
            h.workspace.mutations(),
            vec![Mutation::UpdatePseudo {
                email: "jane.doe@example.org".to_string(),
                pseudo: "janed".to_string(),
            }]
        );
        assert_eq!(
            h.chat.member_changes(),
            vec![ChatEvent::Rename { member: 42, nick: "Jane \"janed\" Doe".to_string() }]
        );
        assert_eq!(
            h.chat.said(),
            vec!["User Jane you now shall be called Jane \"janed\" Doe !"]
        );
    }

    #[tokio::test]
    async fn exempt_user_keeps_pseudo() {
        let h = Harness::new();
        h.workspace.add_user(jane());
        h.workspace.set_groups("jane.doe@example.org", &["board@example.org"]);

        update_pseudo(&h.services(), &member(), "newname").await.unwrap();

        assert!(h.workspace.mutations().is_empty());
        assert!(h.chat.member_changes().is_empty());
        let said = h.chat.said();
        assert_eq!(said.len(), 1);
        assert!(said[0].contains("board@example.org, which is not managed by bot"));
    }

    #[tokio::test]
    async fn recovery_is_updated() {
        let h = Harness::new();
        h.workspace.add_user(jane());

        update_recovery(&h.services(), &member(), "jane@home.example")
            .await
            .unwrap();

        assert_eq!(
            h.workspace.mutations(),
            vec![Mutation::UpdateRecovery {
                email: "jane.doe@example.org".to_string(),
                recovery: "jane@home.example".to_string(),
            }]
        );
        assert_eq!(h.chat.said(), vec!["Updated recovery information for user jane"]);
    }

    #[tokio::test]
    async fn reset_forces_change_and_sends_password() {
        let h = Harness::new();
        h.workspace.add_user(jane());

        reset_password(&h.services(), &member()).await.unwrap();

        let password = match h.workspace.mutations().as_slice() {
            [Mutation::UpdatePassword { email, password, change_at_next_login: true }]
                if email == "jane.doe@example.org" => password.clone(),
            other => panic!("unexpected mutations: {:?}", other),
        };
        let dms = h.chat.direct_messages();
        assert_eq!(dms.len(), 1);
        assert!(dms[0].contains(&crate::util::escape_markdown(&password)));
        assert_eq!(h.chat.said(), vec!["Sent a new password to jane in PM"]);
    }

    #[tokio::test]
    async fn failed_reset_sends_nothing() {
        let h = Harness::new();
        h.workspace.add_user(jane());
        h.workspace.fail("update_password");

        assert!(reset_password(&h.services(), &member()).await.is_err());
        assert!(h.chat.direct_messages().is_empty());
        assert_eq!(h.chat.said().len(), 1);
    }
}
