//! GUILD_MEMBER_ADD / REMOVE / UPDATE / CHUNK handlers

use discord_cache::CacheBuilder;
use discord_core::GuildMember;
use tracing::debug;

use crate::events::{
    GuildMemberAddPayload, GuildMemberChunkPayload, GuildMemberRemovePayload,
    GuildMemberUpdatePayload,
};

/// Insert the member and merge its user into the top-level map
pub fn add_member(builder: &mut CacheBuilder, payload: &GuildMemberAddPayload) {
    builder.upsert_user(payload.user.clone());

    let Some(guild) = builder.guild_mut(payload.guild_id) else {
        debug!(guild_id = %payload.guild_id, "Member add for unknown guild; user kept");
        return;
    };
    guild.upsert_member(GuildMember {
        user_id: payload.user.id,
        nickname: payload.nick.clone(),
        role_ids: payload.roles.clone(),
        joined_at: payload.joined_at,
    });
}

/// Remove the member from the guild
///
/// The user stays in the top-level map; it may be referenced by other
/// guilds, messages or DMs.
pub fn remove_member(builder: &mut CacheBuilder, payload: &GuildMemberRemovePayload) {
    match builder.guild_mut(payload.guild_id) {
        Some(guild) => {
            if guild.remove_member(payload.user.id).is_none() {
                debug!(
                    guild_id = %payload.guild_id,
                    user_id = %payload.user.id,
                    "Member remove for unknown member"
                );
            }
        }
        None => {
            debug!(guild_id = %payload.guild_id, "Member remove for unknown guild; dropped");
        }
    }
}

/// Replace the member's roles and nickname; refresh the embedded user
pub fn update_member(builder: &mut CacheBuilder, payload: &GuildMemberUpdatePayload) {
    builder.upsert_user(payload.user.clone());

    let Some(guild) = builder.guild_mut(payload.guild_id) else {
        debug!(guild_id = %payload.guild_id, "Member update for unknown guild; user kept");
        return;
    };
    match guild.members.get_mut(&payload.user.id) {
        Some(member) => {
            member.set_roles(payload.roles.clone());
            member.set_nickname(payload.nick.clone());
        }
        None => {
            debug!(
                guild_id = %payload.guild_id,
                user_id = %payload.user.id,
                "Member update for unknown member"
            );
        }
    }
}

/// Bulk-merge members delivered for a large guild
pub fn merge_chunk(builder: &mut CacheBuilder, payload: &GuildMemberChunkPayload) {
    // Users merge even when the guild is unknown, keeping later chunks
    // for the same guild consistent
    let mut members = Vec::with_capacity(payload.members.len());
    for member in payload.members.iter().cloned() {
        let (user, member) = member.into_parts();
        builder.upsert_user(user);
        members.push(member);
    }

    let Some(guild) = builder.guild_mut(payload.guild_id) else {
        debug!(guild_id = %payload.guild_id, "Member chunk for unknown guild; users kept");
        return;
    };
    for member in members {
        guild.upsert_member(member);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use discord_cache::CacheSnapshot;
    use discord_core::{Guild, Snowflake};

    fn builder_with_guild(guild_id: u64) -> CacheBuilder {
        let mut builder = CacheBuilder::from_snapshot(&CacheSnapshot::new());
        builder.upsert_guild(Guild::new(Snowflake::new(guild_id), "g", Snowflake::new(1)));
        builder
    }

    #[test]
    fn test_add_member_merges_user() {
        let mut builder = builder_with_guild(1);
        let payload: GuildMemberAddPayload = serde_json::from_str(
            r#"{"guild_id":"1","user":{"id":"7","username":"alice"},"roles":["50"]}"#,
        )
        .unwrap();
        add_member(&mut builder, &payload);

        let snapshot = builder.finalize();
        let member = snapshot
            .guild(Snowflake::new(1))
            .unwrap()
            .member(Snowflake::new(7))
            .unwrap();
        assert!(member.has_role(Snowflake::new(50)));
        assert_eq!(snapshot.user(Snowflake::new(7)).unwrap().username, "alice");
    }

    #[test]
    fn test_remove_member_keeps_user() {
        let mut builder = builder_with_guild(1);
        let add: GuildMemberAddPayload = serde_json::from_str(
            r#"{"guild_id":"1","user":{"id":"7","username":"alice"}}"#,
        )
        .unwrap();
        add_member(&mut builder, &add);

        let remove: GuildMemberRemovePayload = serde_json::from_str(
            r#"{"guild_id":"1","user":{"id":"7","username":"alice"}}"#,
        )
        .unwrap();
        remove_member(&mut builder, &remove);

        let snapshot = builder.finalize();
        assert!(snapshot
            .guild(Snowflake::new(1))
            .unwrap()
            .member(Snowflake::new(7))
            .is_none());
        // The user survives removal from the guild
        assert!(snapshot.user(Snowflake::new(7)).is_some());
    }

    #[test]
    fn test_update_member_replaces_roles_and_nick() {
        let mut builder = builder_with_guild(1);
        let add: GuildMemberAddPayload = serde_json::from_str(
            r#"{"guild_id":"1","user":{"id":"7","username":"alice"},"nick":"al","roles":["50","51"]}"#,
        )
        .unwrap();
        add_member(&mut builder, &add);

        let update: GuildMemberUpdatePayload = serde_json::from_str(
            r#"{"guild_id":"1","user":{"id":"7","username":"alice2"},"roles":["52"]}"#,
        )
        .unwrap();
        update_member(&mut builder, &update);

        let snapshot = builder.finalize();
        let member = snapshot
            .guild(Snowflake::new(1))
            .unwrap()
            .member(Snowflake::new(7))
            .unwrap();
        assert_eq!(member.role_ids, vec![Snowflake::new(52)]);
        // nick was absent in the payload, so the nickname is cleared
        assert!(member.nickname.is_none());
        // The embedded user refresh reaches the top-level map
        assert_eq!(snapshot.user(Snowflake::new(7)).unwrap().username, "alice2");
    }

    #[test]
    fn test_chunk_bulk_merges() {
        let mut builder = builder_with_guild(1);
        let chunk: GuildMemberChunkPayload = serde_json::from_str(
            r#"{
                "guild_id": "1",
                "members": [
                    {"user": {"id": "7", "username": "alice"}},
                    {"user": {"id": "8", "username": "bob"}},
                    {"user": {"id": "9", "username": "carol"}}
                ]
            }"#,
        )
        .unwrap();
        merge_chunk(&mut builder, &chunk);

        let snapshot = builder.finalize();
        assert_eq!(snapshot.guild(Snowflake::new(1)).unwrap().members.len(), 3);
        for id in [7, 8, 9] {
            assert!(snapshot.user(Snowflake::new(id)).is_some());
        }
    }

    #[test]
    fn test_chunk_for_unknown_guild_keeps_users() {
        let mut builder = CacheBuilder::from_snapshot(&CacheSnapshot::new());
        let chunk: GuildMemberChunkPayload = serde_json::from_str(
            r#"{"guild_id":"404","members":[{"user":{"id":"7","username":"alice"}}]}"#,
        )
        .unwrap();
        merge_chunk(&mut builder, &chunk);

        let snapshot = builder.finalize();
        assert!(snapshot.guild(Snowflake::new(404)).is_none());
        assert!(snapshot.user(Snowflake::new(7)).is_some());
    }
}
