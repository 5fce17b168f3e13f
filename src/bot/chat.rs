use std::sync::Arc;

use async_trait::async_trait;
use poise::serenity_prelude as serenity;

use super::Context;
use crate::chat::{Chat, Member, RoleId};
use crate::error::ChatError;

/// [`Chat`] over the Discord REST API, bound to the invoking guild and channel
pub struct GuildChat {
    http: Arc<serenity::Http>,
    guild_id: serenity::GuildId,
    channel_id: serenity::ChannelId,
}

impl GuildChat {
    pub fn new(ctx: Context<'_>) -> Result<Self, ChatError> {
        let guild_id = ctx
            .guild_id()
            .ok_or_else(|| ChatError::Other("command used outside of a guild".to_string()))?;

        Ok(Self {
            http: ctx.serenity_context().http.clone(),
            guild_id,
            channel_id: ctx.channel_id(),
        })
    }

    fn user_id(member: &Member) -> serenity::UserId {
        serenity::UserId::new(member.id)
    }
}

impl From<&serenity::Member> for Member {
    fn from(member: &serenity::Member) -> Self {
        Self {
            id: member.user.id.get(),
            name: member.user.name.clone(),
            nick: member.nick.clone(),
        }
    }
}

#[async_trait]
impl Chat for GuildChat {
    async fn say(&self, content: &str) -> Result<(), ChatError> {
        self.channel_id.say(&*self.http, content).await?;
        Ok(())
    }

    async fn direct_message(&self, member: &Member, content: &str) -> Result<(), ChatError> {
        Self::user_id(member)
            .direct_message(&*self.http, serenity::CreateMessage::new().content(content))
            .await?;
        Ok(())
    }

    async fn find_role(&self, name: &str) -> Result<Option<RoleId>, ChatError> {
        let roles = self.guild_id.roles(&*self.http).await?;
        Ok(roles
            .values()
            .find(|role| role.name == name)
            .map(|role| RoleId(role.id.get())))
    }

    async fn add_role(&self, member: &Member, role: RoleId) -> Result<(), ChatError> {
        self.http
            .add_member_role(
                self.guild_id,
                Self::user_id(member),
                serenity::RoleId::new(role.0),
                None,
            )
            .await?;
        Ok(())
    }

    async fn remove_role(&self, member: &Member, role: RoleId) -> Result<(), ChatError> {
        self.http
            .remove_member_role(
                self.guild_id,
                Self::user_id(member),
                serenity::RoleId::new(role.0),
                None,
            )
            .await?;
        Ok(())
    }

    async fn clear_roles(&self, member: &Member) -> Result<(), ChatError> {
        self.guild_id
            .edit_member(
                &*self.http,
                Self::user_id(member),
                serenity::EditMember::new().roles(Vec::<serenity::RoleId>::new()),
            )
            .await?;
        Ok(())
    }

    async fn rename(&self, member: &Member, nick: &str) -> Result<(), ChatError> {
        self.guild_id
            .edit_member(
                &*self.http,
                Self::user_id(member),
                serenity::EditMember::new().nickname(nick),
            )
            .await?;
        Ok(())
    }
}
