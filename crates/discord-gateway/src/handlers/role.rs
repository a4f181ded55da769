//! GUILD_ROLE_CREATE / UPDATE / DELETE handlers

use discord_cache::CacheBuilder;
use tracing::debug;

use crate::events::{GuildRoleDeletePayload, GuildRolePayload};

/// Insert or replace a role in its guild
pub fn upsert_role(builder: &mut CacheBuilder, payload: &GuildRolePayload) {
    match builder.guild_mut(payload.guild_id) {
        Some(guild) => guild.upsert_role(payload.role.clone()),
        None => {
            debug!(
                guild_id = %payload.guild_id,
                role_id = %payload.role.id,
                "Role upsert for unknown guild; dropped"
            );
        }
    }
}

/// Remove a role from its guild
///
/// Members referencing the role keep the dangling id.
pub fn delete_role(builder: &mut CacheBuilder, payload: &GuildRoleDeletePayload) {
    match builder.guild_mut(payload.guild_id) {
        Some(guild) => {
            if guild.remove_role(payload.role_id).is_none() {
                debug!(
                    guild_id = %payload.guild_id,
                    role_id = %payload.role_id,
                    "Role delete for unknown role"
                );
            }
        }
        None => {
            debug!(guild_id = %payload.guild_id, "Role delete for unknown guild; dropped");
        }
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
    fn test_role_create_then_update() {
        let mut builder = builder_with_guild(1);
        let create: GuildRolePayload =
            serde_json::from_str(r#"{"guild_id":"1","role":{"id":"50","name":"mods"}}"#).unwrap();
        upsert_role(&mut builder, &create);

        let update: GuildRolePayload = serde_json::from_str(
            r#"{"guild_id":"1","role":{"id":"50","name":"moderators","position":2}}"#,
        )
        .unwrap();
        upsert_role(&mut builder, &update);

        let snapshot = builder.finalize();
        let role = snapshot
            .guild(Snowflake::new(1))
            .unwrap()
            .role(Snowflake::new(50))
            .unwrap();
        assert_eq!(role.name, "moderators");
        assert_eq!(role.position, 2);
    }

    #[test]
    fn test_role_delete() {
        let mut builder = builder_with_guild(1);
        let create: GuildRolePayload =
            serde_json::from_str(r#"{"guild_id":"1","role":{"id":"50","name":"mods"}}"#).unwrap();
        upsert_role(&mut builder, &create);

        let delete: GuildRoleDeletePayload =
            serde_json::from_str(r#"{"guild_id":"1","role_id":"50"}"#).unwrap();
        delete_role(&mut builder, &delete);

        let snapshot = builder.finalize();
        assert!(snapshot
            .guild(Snowflake::new(1))
            .unwrap()
            .role(Snowflake::new(50))
            .is_none());
    }
}
