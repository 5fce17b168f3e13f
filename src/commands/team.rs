use tracing::info;

use super::Services;
use crate::chat::Member;
use crate::error::{CommandError, DomainError};

/// Move `member` to another team, in the directory and on Discord.
pub async fn update_team(
    svc: &Services<'_>,
    member: &Member,
    new_team_name: &str,
) -> Result<(), CommandError> {
    svc.report(run(svc, member, new_team_name).await).await.map(drop)
}

async fn run(svc: &Services<'_>, member: &Member, new_team_name: &str) -> Result<(), CommandError> {
    let mut user = svc.resolve(member).await?;

    let team = svc
        .config
        .team(new_team_name)
        .ok_or_else(|| DomainError::UnknownTeam(new_team_name.to_string()))?;
    if !team.is_team_role() {
        return Err(DomainError::InvalidTeam(new_team_name.to_string()).into());
    }
    user.team = Some(new_team_name.to_string());
    let signature = svc.templates.signature(&user, team)?;

    for other in svc.config.teams.values() {
        svc.workspace
            .remove_from_group(&user.email, &other.google_email)
            .await?;
    }
    svc.workspace.add_to_group(&user.email, &team.google_email).await?;
    svc.workspace
        .update_organization(&user.email, user.role.as_deref(), new_team_name)
        .await?;
    svc.workspace.update_signature(&user.email, &signature).await?;

    for other in svc.config.teams.values() {
        let role = svc
            .chat_role(&other.discord, DomainError::MissingTeamChatRole)
            .await?;
        svc.chat.remove_role(member, role).await?;
    }
    let role = svc
        .chat_role(&team.discord, DomainError::MissingTeamChatRole)
        .await?;
    svc.chat.add_role(member, role).await?;

    info!(email = %user.email, team = new_team_name, "moved member to team");
    svc.chat
        .say(&format!(
            "User {} is now member of team: {}",
            member.name, new_team_name
        ))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fakes::{jane, member, ChatEvent, Harness, Mutation};

    #[tokio::test]
    async fn moves_member_to_design() {
        let h = Harness::new();
        h.workspace.add_user(jane());

        update_team(&h.services(), &member(), "design").await.unwrap();

        let mutations = h.workspace.mutations();
        let removed: Vec<_> = mutations
            .iter()
            .take_while(|m| matches!(m, Mutation::RemoveFromGroup { .. }))
            .cloned()
            .collect();
        let mut groups: Vec<_> = removed
            .iter()
            .map(|m| match m {
                Mutation::RemoveFromGroup { group, .. } => group.clone(),
                _ => unreachable!(),
            })
            .collect();
        groups.sort();
        assert_eq!(
            groups,
            vec!["board@example.org", "design@example.org", "engineering@example.org"]
        );

        assert_eq!(
            &mutations[removed.len()..removed.len() + 2],
            &[
                Mutation::AddToGroup {
                    email: "jane.doe@example.org".to_string(),
                    group: "design@example.org".to_string(),
                },
                Mutation::UpdateOrganization {
                    email: "jane.doe@example.org".to_string(),
                    title: Some("developer".to_string()),
                    department: "design".to_string(),
                },
            ]
        );
        assert!(matches!(
            mutations.last(),
            Some(Mutation::UpdateSignature { signature, .. }) if signature.contains("Design team")
        ));

        let changes = h.chat.member_changes();
        assert_eq!(changes.len(), 4);
        assert_eq!(
            changes.last(),
            Some(&ChatEvent::AddRole { member: 42, role: "Design".to_string() })
        );
        assert_eq!(h.chat.said(), vec!["User jane is now member of team: design"]);
    }

    #[tokio::test]
    async fn no_removal_follows_the_new_group() {
        let h = Harness::new();
        h.workspace.add_user(jane());

        update_team(&h.services(), &member(), "engineer").await.unwrap();

        let mutations = h.workspace.mutations();
        let added = mutations
            .iter()
            .position(|m| matches!(m, Mutation::AddToGroup { .. }))
            .unwrap();
        assert!(!mutations[added..]
            .iter()
            .any(|m| matches!(m, Mutation::RemoveFromGroup { .. })));
    }

    #[tokio::test]
    async fn unknown_or_invalid_team_is_refused() {
        for (team, message) in [
            ("ghost", "Role ghost does not exist, check bot config"),
            ("board", "Role board is invalid, check bot config"),
        ] {
            let h = Harness::new();
            h.workspace.add_user(jane());

            update_team(&h.services(), &member(), team).await.unwrap();

            assert!(h.workspace.mutations().is_empty());
            assert_eq!(h.chat.said(), vec![message]);
        }
    }

    #[tokio::test]
    async fn missing_discord_role_leaves_directory_changes() {
        let h = Harness::with_roles(&["member", "Engineering", "Design"]);
        h.workspace.add_user(jane());

        update_team(&h.services(), &member(), "design").await.unwrap();

        assert!(!h.workspace.mutations().is_empty());
        assert_eq!(
            h.chat.said(),
            vec!["Discord role Board does not exist, check bot config"]
        );
    }
}
