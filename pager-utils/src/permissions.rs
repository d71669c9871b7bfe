use twilight_http::Client;
use twilight_model::{
    channel::{ChannelType, permission_overwrite::PermissionOverwrite},
    guild::Permissions,
    id::{
        Id,
        marker::{ChannelMarker, GuildMarker, RoleMarker, UserMarker},
    },
};
use twilight_util::permission_calculator::PermissionCalculator;

/// Resolve a user's effective permissions in a guild channel.
///
/// Role permissions are combined and then channel overwrites are applied.
/// The guild owner has every permission. Returns `Ok(None)` when the channel
/// is not part of a guild (DMs).
pub async fn resolve_channel_permissions(
    http: &Client,
    channel_id: Id<ChannelMarker>,
    user_id: Id<UserMarker>,
) -> anyhow::Result<Option<Permissions>> {
    let channel = http.channel(channel_id).await?.model().await?;

    let Some(guild_id) = channel.guild_id else {
        return Ok(None);
    };

    let guild = http.guild(guild_id).await?.model().await?;
    let member = http.guild_member(guild_id, user_id).await?.model().await?;
    let overwrites = channel.permission_overwrites.unwrap_or_default();

    let subject = GuildMember {
        guild_id,
        owner_id: guild.owner_id,
        user_id,
        role_ids: &member.roles,
    };
    let roles = guild.roles.iter().map(|role| (role.id, role.permissions));

    Ok(Some(subject.permissions_in(roles, channel.kind, &overwrites)))
}

/// The facts about a guild member that decide their permissions.
struct GuildMember<'a> {
    guild_id: Id<GuildMarker>,
    owner_id: Id<UserMarker>,
    user_id: Id<UserMarker>,
    role_ids: &'a [Id<RoleMarker>],
}

impl GuildMember<'_> {
    /// Effective permissions in a channel, given every guild role.
    ///
    /// The owner bypasses roles and overwrites entirely.
    fn permissions_in(
        &self,
        guild_roles: impl IntoIterator<Item = (Id<RoleMarker>, Permissions)>,
        kind: ChannelType,
        overwrites: &[PermissionOverwrite],
    ) -> Permissions {
        if self.owner_id == self.user_id {
            return Permissions::all();
        }

        let mut everyone = Permissions::empty();
        let mut member_roles: Vec<(Id<RoleMarker>, Permissions)> = Vec::new();

        for (role_id, permissions) in guild_roles {
            if role_id == self.guild_id.cast() {
                everyone = permissions;
            } else if self.role_ids.contains(&role_id) {
                member_roles.push((role_id, permissions));
            }
        }

        PermissionCalculator::new(self.guild_id, self.user_id, everyone, &member_roles)
            .in_channel(kind, overwrites)
    }
}

/// Whether a permission set allows removing other users' reactions.
pub fn allows_reaction_management(perms: Permissions) -> bool {
    perms.contains(Permissions::ADMINISTRATOR) || perms.contains(Permissions::MANAGE_MESSAGES)
}

/// Check whether `user_id` may remove other users' reactions in a channel.
///
/// Always `false` outside guilds, where nobody can.
pub async fn can_manage_reactions(
    http: &Client,
    channel_id: Id<ChannelMarker>,
    user_id: Id<UserMarker>,
) -> anyhow::Result<bool> {
    let perms = resolve_channel_permissions(http, channel_id, user_id).await?;

    Ok(perms.is_some_and(allows_reaction_management))
}
