//! Member management commands, written against the [`Workspace`] and [`Chat`] seams.
//!
//! Every command follows the same shape: resolve the directory account of the
//! targeted member, make sure the bot is allowed to manage it, apply the
//! directory mutations, then mirror them on Discord. Steps are applied in
//! order and never rolled back.
//!
//! Failures are reported in the invoking channel by [`Services::report`]:
//! domain errors end the command cleanly, Google errors are shown and then
//! returned to the framework.

mod deprovision;
mod profile;
mod provision;
mod signatures;
mod team;

#[cfg(test)]
pub(crate) mod fakes;

pub use deprovision::deprovision;
pub use profile::{reset_password, update_pseudo, update_recovery};
pub use provision::{provision, ProvisionRequest};
pub use signatures::{update_signatures, SignatureReport};
pub use team::update_team;

use tracing::warn;

use crate::chat::{Chat, Member, RoleId};
use crate::config::Config;
use crate::error::{CommandError, DomainError};
use crate::templates::Templates;
use crate::user::User;
use crate::workspace::Workspace;

/// Collaborators available to a command invocation
pub struct Services<'a> {
    pub config: &'a Config,
    pub workspace: &'a dyn Workspace,
    pub chat: &'a dyn Chat,
    pub templates: &'a Templates,
}

impl Services<'_> {
    /// Report a finished command body in the channel.
    pub async fn report<T>(&self, result: Result<T, CommandError>) -> Result<Option<T>, CommandError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(CommandError::Domain(e)) => {
                warn!(error = %e, "command refused");
                self.chat.say(&e.to_string()).await?;
                Ok(None)
            }
            Err(CommandError::Workspace(e)) => {
                self.chat.say(&e.to_string()).await?;
                Err(e.into())
            }
            Err(e) => Err(e),
        }
    }

    /// Directory account of `member`, checked to be manageable
    pub async fn resolve(&self, member: &Member) -> Result<User, CommandError> {
        let tag = |e: DomainError| CommandError::Domain(e.for_member(member.to_string()));

        let record = self
            .workspace
            .find_user(member.id)
            .await?
            .ok_or_else(|| tag(DomainError::UserNotFound))?;
        let user = User::from_record(record, &self.config.google.schema).map_err(tag)?;

        match self.ensure_managed(&user).await {
            Err(CommandError::Domain(e)) => Err(tag(e)),
            other => other.map(|()| user),
        }
    }

    /// Fails with [`DomainError::Unmanaged`] when `user` sits in an exempt group
    pub async fn ensure_managed(&self, user: &User) -> Result<(), CommandError> {
        let skipped = self.config.skipped_groups();
        if skipped.is_empty() {
            return Ok(());
        }

        let groups = self.workspace.user_groups(&user.email).await?;
        match groups.into_iter().find(|g| skipped.contains(&g.to_lowercase())) {
            Some(group) => Err(DomainError::Unmanaged {
                email: user.email.clone(),
                group,
            }
            .into()),
            None => Ok(()),
        }
    }

    /// Guild role called `name`, or the error built by `missing`
    pub async fn chat_role(
        &self,
        name: &str,
        missing: fn(String) -> DomainError,
    ) -> Result<RoleId, CommandError> {
        self.chat
            .find_role(name)
            .await?
            .ok_or_else(|| missing(name.to_string()).into())
    }
}
