//! PRESENCE_UPDATE handler

use discord_cache::CacheBuilder;
use discord_core::Presence;
use tracing::debug;

use crate::events::PresencePayload;

/// Replace the presence keyed by (guild, user) and merge any embedded
/// user fields into the top-level map
pub fn update_presence(builder: &mut CacheBuilder, payload: &PresencePayload) {
    builder.update_user_fields(
        payload.user.id,
        payload.user.username.clone(),
        payload.user.avatar.clone(),
    );

    let Some(guild_id) = payload.guild_id else {
        debug!(user_id = %payload.user.id, "Presence update without guild id; dropped");
        return;
    };

    let mut presence = Presence::new(payload.user.id, payload.status);
    presence.game = payload.game.as_ref().and_then(|g| g.name.clone());
    builder.set_presence(guild_id, presence);
}

#[cfg(test)]
mod tests {
    use super::*;
    use discord_cache::CacheSnapshot;
    use discord_core::{Snowflake, User, UserStatus};

    #[test]
    fn test_presence_replaced() {
        let mut builder = CacheBuilder::from_snapshot(&CacheSnapshot::new());

        let online: PresencePayload = serde_json::from_str(
            r#"{"user":{"id":"7"},"guild_id":"1","status":"online","game":{"name":"chess"}}"#,
        )
        .unwrap();
        update_presence(&mut builder, &online);

        let idle: PresencePayload =
            serde_json::from_str(r#"{"user":{"id":"7"},"guild_id":"1","status":"idle"}"#).unwrap();
        update_presence(&mut builder, &idle);

        let snapshot = builder.finalize();
        let presence = snapshot.presence(Snowflake::new(1), Snowflake::new(7)).unwrap();
        assert_eq!(presence.status, UserStatus::Idle);
        // Replacement, not merge: the old game is gone
        assert!(presence.game.is_none());
    }

    #[test]
    fn test_embedded_user_fields_merge() {
        let mut builder = CacheBuilder::from_snapshot(&CacheSnapshot::new());
        builder.upsert_user(User::new(Snowflake::new(7), "old"));

        let payload: PresencePayload = serde_json::from_str(
            r#"{"user":{"id":"7","username":"new"},"guild_id":"1","status":"dnd"}"#,
        )
        .unwrap();
        update_presence(&mut builder, &payload);

        let snapshot = builder.finalize();
        assert_eq!(snapshot.user(Snowflake::new(7)).unwrap().username, "new");
    }

    #[test]
    fn test_presence_without_guild_dropped() {
        let mut builder = CacheBuilder::from_snapshot(&CacheSnapshot::new());
        let payload: PresencePayload =
            serde_json::from_str(r#"{"user":{"id":"7"},"status":"online"}"#).unwrap();
        update_presence(&mut builder, &payload);

        let snapshot = builder.finalize();
        assert!(snapshot.presence(Snowflake::new(0), Snowflake::new(7)).is_none());
    }
}
