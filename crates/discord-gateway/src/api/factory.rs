//! API message factories
//!
//! One factory per event, invoked after the event has been applied and
//! the next snapshot published. A factory returns `None` when the entity
//! the event refers to was never cached; callers log that at debug and
//! move on.

use std::sync::Arc;

use discord_cache::CacheSnapshot;

use crate::api::messages::{ApiMessage, ApiMessageKind};
use crate::events::GatewayEvent;

/// Synthesize the API message for an applied event
#[must_use]
pub fn build_message(
    event: &GatewayEvent,
    prev: Arc<CacheSnapshot>,
    curr: Arc<CacheSnapshot>,
) -> Option<ApiMessage> {
    let kind = match event {
        GatewayEvent::Ready(payload) => Some(ApiMessageKind::Ready {
            user: payload.user.clone(),
        }),
        GatewayEvent::Resumed(_) => Some(ApiMessageKind::Resumed),

        GatewayEvent::ChannelCreate(payload) => channel_in(&curr, payload.id)
            .then_some(ApiMessageKind::ChannelCreated { channel_id: payload.id }),
        GatewayEvent::ChannelUpdate(payload) => channel_in(&curr, payload.id)
            .then_some(ApiMessageKind::ChannelUpdated { channel_id: payload.id }),
        GatewayEvent::ChannelDelete(payload) => channel_in(&prev, payload.id)
            .then_some(ApiMessageKind::ChannelDeleted { channel_id: payload.id }),

        GatewayEvent::GuildCreate(payload) => curr
            .guild(payload.id)
            .map(|_| ApiMessageKind::GuildCreated { guild_id: payload.id }),
        GatewayEvent::GuildUpdate(payload) => curr
            .guild(payload.id)
            .map(|_| ApiMessageKind::GuildUpdated { guild_id: payload.id }),
        GatewayEvent::GuildDelete(payload) => {
            let known = prev.guild(payload.id).is_some()
                || prev.unavailable_guild(payload.id).is_some();
            known.then_some(ApiMessageKind::GuildDeleted {
                guild_id: payload.id,
                unavailable: payload.unavailable,
            })
        }

        GatewayEvent::GuildBanAdd(payload) => Some(ApiMessageKind::GuildBanAdded {
            guild_id: payload.guild_id,
            user: payload.user.clone(),
        }),
        GatewayEvent::GuildBanRemove(payload) => Some(ApiMessageKind::GuildBanRemoved {
            guild_id: payload.guild_id,
            user: payload.user.clone(),
        }),
        GatewayEvent::GuildEmojisUpdate(payload) => curr
            .guild(payload.guild_id)
            .map(|_| ApiMessageKind::GuildEmojisUpdated { guild_id: payload.guild_id }),
        GatewayEvent::GuildIntegrationsUpdate(payload) => {
            Some(ApiMessageKind::GuildIntegrationsUpdated { guild_id: payload.guild_id })
        }

        GatewayEvent::GuildMemberAdd(payload) => member_in(&curr, payload.guild_id, payload.user.id)
            .then_some(ApiMessageKind::MemberAdded {
                guild_id: payload.guild_id,
                user_id: payload.user.id,
            }),
        GatewayEvent::GuildMemberRemove(payload) => {
            member_in(&prev, payload.guild_id, payload.user.id).then_some(
                ApiMessageKind::MemberRemoved {
                    guild_id: payload.guild_id,
                    user_id: payload.user.id,
                },
            )
        }
        GatewayEvent::GuildMemberUpdate(payload) => {
            member_in(&curr, payload.guild_id, payload.user.id).then_some(
                ApiMessageKind::MemberUpdated {
                    guild_id: payload.guild_id,
                    user_id: payload.user.id,
                },
            )
        }
        GatewayEvent::GuildMemberChunk(payload) => {
            curr.guild(payload.guild_id).map(|_| ApiMessageKind::MembersChunked {
                guild_id: payload.guild_id,
                count: payload.members.len(),
            })
        }

        GatewayEvent::GuildRoleCreate(payload) => {
            role_in(&curr, payload.guild_id, payload.role.id).then_some(
                ApiMessageKind::RoleCreated {
                    guild_id: payload.guild_id,
                    role_id: payload.role.id,
                },
            )
        }
        GatewayEvent::GuildRoleUpdate(payload) => {
            role_in(&curr, payload.guild_id, payload.role.id).then_some(
                ApiMessageKind::RoleUpdated {
                    guild_id: payload.guild_id,
                    role_id: payload.role.id,
                },
            )
        }
        GatewayEvent::GuildRoleDelete(payload) => {
            role_in(&prev, payload.guild_id, payload.role_id).then_some(
                ApiMessageKind::RoleDeleted {
                    guild_id: payload.guild_id,
                    role_id: payload.role_id,
                },
            )
        }

        GatewayEvent::MessageCreate(payload) => {
            curr.message(payload.channel_id, payload.id).map(|_| {
                ApiMessageKind::MessageCreated {
                    channel_id: payload.channel_id,
                    message_id: payload.id,
                }
            })
        }
        GatewayEvent::MessageUpdate(payload) => {
            curr.message(payload.channel_id, payload.id).map(|_| {
                ApiMessageKind::MessageUpdated {
                    channel_id: payload.channel_id,
                    message_id: payload.id,
                }
            })
        }
        GatewayEvent::MessageDelete(payload) => prev
            .message(payload.channel_id, payload.id)
            .cloned()
            .map(|message| ApiMessageKind::MessageDeleted {
                channel_id: payload.channel_id,
                message,
            }),
        GatewayEvent::MessageDeleteBulk(payload) => {
            let messages: Vec<_> = payload
                .ids
                .iter()
                .filter_map(|id| prev.message(payload.channel_id, *id).cloned())
                .collect();
            (!messages.is_empty()).then_some(ApiMessageKind::MessagesBulkDeleted {
                channel_id: payload.channel_id,
                messages,
            })
        }

        GatewayEvent::PresenceUpdate(payload) => payload.guild_id.and_then(|guild_id| {
            curr.presence(guild_id, payload.user.id)
                .map(|_| ApiMessageKind::PresenceUpdated {
                    guild_id,
                    user_id: payload.user.id,
                })
        }),

        GatewayEvent::TypingStart(_)
        | GatewayEvent::UserUpdate(_)
        | GatewayEvent::VoiceStateUpdate(_)
        | GatewayEvent::VoiceServerUpdate(_) => None,
    };

    kind.map(|kind| ApiMessage { prev, curr, kind })
}

fn channel_in(snapshot: &CacheSnapshot, channel_id: discord_core::Snowflake) -> bool {
    snapshot.guild_channel(channel_id).is_some()
        || snapshot.dm_channel(channel_id).is_some()
        || snapshot.group_dm_channel(channel_id).is_some()
}

fn member_in(
    snapshot: &CacheSnapshot,
    guild_id: discord_core::Snowflake,
    user_id: discord_core::Snowflake,
) -> bool {
    snapshot
        .guild(guild_id)
        .is_some_and(|g| g.member(user_id).is_some())
}

fn role_in(
    snapshot: &CacheSnapshot,
    guild_id: discord_core::Snowflake,
    role_id: discord_core::Snowflake,
) -> bool {
    snapshot
        .guild(guild_id)
        .is_some_and(|g| g.role(role_id).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use discord_cache::CacheBuilder;
    use discord_core::Snowflake;
    use serde_json::json;

    fn apply(event: &GatewayEvent, prev: &Arc<CacheSnapshot>) -> Arc<CacheSnapshot> {
        let mut builder = CacheBuilder::from_snapshot(prev);
        crate::handlers::apply(&mut builder, event);
        Arc::new(builder.finalize())
    }

    #[test]
    fn test_message_delete_carries_prev_body() {
        let prev = Arc::new(CacheSnapshot::new());
        let create = GatewayEvent::decode(
            "MESSAGE_CREATE",
            json!({
                "id": "100", "channel_id": "10",
                "author": {"id": "7", "username": "alice"},
                "content": "doomed"
            }),
        )
        .unwrap();
        let with_message = apply(&create, &prev);

        let delete =
            GatewayEvent::decode("MESSAGE_DELETE", json!({"id": "100", "channel_id": "10"}))
                .unwrap();
        let after = apply(&delete, &with_message);

        let message = build_message(&delete, with_message, after).unwrap();
        match message.kind {
            ApiMessageKind::MessageDeleted { message, .. } => {
                assert_eq!(message.content, "doomed");
            }
            other => panic!("expected MessageDeleted, got {}", other.name()),
        }
    }

    #[test]
    fn test_delete_of_uncached_message_yields_none() {
        let prev = Arc::new(CacheSnapshot::new());
        let delete =
            GatewayEvent::decode("MESSAGE_DELETE", json!({"id": "100", "channel_id": "10"}))
                .unwrap();
        let curr = apply(&delete, &prev);
        assert!(build_message(&delete, prev, curr).is_none());
    }

    #[test]
    fn test_unimplemented_event_yields_none() {
        let prev = Arc::new(CacheSnapshot::new());
        let typing = GatewayEvent::decode(
            "TYPING_START",
            json!({"channel_id": "10", "user_id": "7", "timestamp": 1488805200}),
        )
        .unwrap();
        let curr = apply(&typing, &prev);
        assert!(build_message(&typing, prev, curr).is_none());
    }

    #[test]
    fn test_ban_event_always_builds() {
        let prev = Arc::new(CacheSnapshot::new());
        let ban = GatewayEvent::decode(
            "GUILD_BAN_ADD",
            json!({"guild_id": "1", "user": {"id": "7", "username": "alice"}}),
        )
        .unwrap();
        let curr = apply(&ban, &prev);

        let message = build_message(&ban, prev, curr).unwrap();
        match message.kind {
            ApiMessageKind::GuildBanAdded { guild_id, user } => {
                assert_eq!(guild_id, Snowflake::new(1));
                assert_eq!(user.username, "alice");
            }
            other => panic!("expected GuildBanAdded, got {}", other.name()),
        }
    }
}
