//! Discord operations the commands depend on, bound to one guild and channel.

use std::fmt;

use async_trait::async_trait;

use crate::error::ChatError;

/// Guild member targeted by a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: u64,
    pub name: String,
    pub nick: Option<String>,
}

impl Member {
    /// Name shown in the guild
    pub fn display_name(&self) -> &str {
        self.nick.as_deref().unwrap_or(&self.name)
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoleId(pub u64);

#[async_trait]
pub trait Chat: Send + Sync {
    /// Message the channel the command was invoked from
    async fn say(&self, content: &str) -> Result<(), ChatError>;

    async fn direct_message(&self, member: &Member, content: &str) -> Result<(), ChatError>;

    async fn find_role(&self, name: &str) -> Result<Option<RoleId>, ChatError>;

    async fn add_role(&self, member: &Member, role: RoleId) -> Result<(), ChatError>;

    async fn remove_role(&self, member: &Member, role: RoleId) -> Result<(), ChatError>;

    /// Strip every role from the member
    async fn clear_roles(&self, member: &Member) -> Result<(), ChatError>;

    async fn rename(&self, member: &Member, nick: &str) -> Result<(), ChatError>;
}
