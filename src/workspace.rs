//! Directory operations the commands depend on.

use async_trait::async_trait;

use crate::error::WorkspaceError;
use crate::types::DirectoryUser;

/// Account created by `provision`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub password: String,
    pub team: String,
    pub discord_id: u64,
    pub pseudo: String,
}

/// Google Workspace as seen by the bot
#[async_trait]
pub trait Workspace: Send + Sync {
    async fn create_user(&self, account: &NewAccount) -> Result<(), WorkspaceError>;

    /// Account linked to a Discord user id, if any
    async fn find_user(&self, discord_id: u64) -> Result<Option<DirectoryUser>, WorkspaceError>;

    /// Every account of the customer
    async fn list_users(&self) -> Result<Vec<DirectoryUser>, WorkspaceError>;

    /// Addresses of the groups `email` belongs to
    async fn user_groups(&self, email: &str) -> Result<Vec<String>, WorkspaceError>;

    async fn suspend_user(&self, email: &str) -> Result<(), WorkspaceError>;

    async fn add_to_group(&self, email: &str, group: &str) -> Result<(), WorkspaceError>;

    /// Removing a user that is not a member succeeds
    async fn remove_from_group(&self, email: &str, group: &str) -> Result<(), WorkspaceError>;

    async fn update_organization(
        &self,
        email: &str,
        title: Option<&str>,
        department: &str,
    ) -> Result<(), WorkspaceError>;

    async fn update_pseudo(&self, email: &str, pseudo: &str) -> Result<(), WorkspaceError>;

    async fn update_recovery_email(&self, email: &str, recovery: &str)
        -> Result<(), WorkspaceError>;

    async fn update_password(
        &self,
        email: &str,
        password: &str,
        change_at_next_login: bool,
    ) -> Result<(), WorkspaceError>;

    /// Set the Gmail signature of `email`, acting as that user
    async fn update_signature(&self, email: &str, signature: &str) -> Result<(), WorkspaceError>;
}
