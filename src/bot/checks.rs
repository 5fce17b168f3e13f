use super::{Context, Error};

/// Whether one of `member_roles` is listed in `admin_roles`
pub fn has_admin_role<'a>(member_roles: impl IntoIterator<Item = &'a str>, admin_roles: &[String]) -> bool {
    member_roles
        .into_iter()
        .any(|name| admin_roles.iter().any(|admin| admin == name))
}

/// Caller holds a configured admin role or the Administrator permission
pub async fn is_workspace_admin(ctx: Context<'_>) -> Result<bool, Error> {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(false);
    };
    let Some(member) = ctx.author_member().await else {
        return Ok(false);
    };

    let roles = guild_id.roles(ctx.http()).await?;
    let held: Vec<_> = member.roles.iter().filter_map(|id| roles.get(id)).collect();

    let administrator = held.iter().any(|role| role.permissions.administrator());
    let configured = has_admin_role(
        held.iter().map(|role| role.name.as_str()),
        &ctx.data().config.discord.roles.admin,
    );

    Ok(administrator || configured)
}
