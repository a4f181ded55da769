//! Gateway dispatch events
//!
//! The registry tying each event name to its payload schema, cache
//! handler and API message factory. The three legs live in one closed
//! enum each ([`GatewayEvent`] here, the handler table in
//! [`crate::handlers`], the factory table in [`crate::api`]), so adding
//! an event without wiring all three is a compile error.

mod dispatcher;
mod event_types;
mod payloads;

pub use dispatcher::Dispatcher;
pub use event_types::{Disposition, EventType};
pub use payloads::{
    ChannelPayload, ClassifiedChannel, GamePayload, GuildBanPayload, GuildCreatePayload,
    GuildDeletePayload, GuildEmojisUpdatePayload, GuildIntegrationsUpdatePayload,
    GuildMemberAddPayload, GuildMemberChunkPayload, GuildMemberRemovePayload,
    GuildMemberUpdatePayload, GuildRoleDeletePayload, GuildRolePayload, GuildUpdatePayload,
    MemberPayload, MessageDeleteBulkPayload, MessageDeletePayload, MessagePayload,
    MessageUpdatePayload, PartialUser, PresencePayload, ReadyPayload, ResumedPayload,
    TypingStartPayload, VoiceServerUpdatePayload, VoiceStateUpdatePayload,
};

use discord_core::User;
use serde_json::Value;

use crate::protocol::CodecError;

/// A decoded dispatch event
#[derive(Debug, Clone)]
pub enum GatewayEvent {
    Ready(ReadyPayload),
    Resumed(ResumedPayload),
    ChannelCreate(ChannelPayload),
    ChannelUpdate(ChannelPayload),
    ChannelDelete(ChannelPayload),
    GuildCreate(GuildCreatePayload),
    GuildUpdate(GuildUpdatePayload),
    GuildDelete(GuildDeletePayload),
    GuildBanAdd(GuildBanPayload),
    GuildBanRemove(GuildBanPayload),
    GuildEmojisUpdate(GuildEmojisUpdatePayload),
    GuildIntegrationsUpdate(GuildIntegrationsUpdatePayload),
    GuildMemberAdd(GuildMemberAddPayload),
    GuildMemberRemove(GuildMemberRemovePayload),
    GuildMemberUpdate(GuildMemberUpdatePayload),
    GuildMemberChunk(GuildMemberChunkPayload),
    GuildRoleCreate(GuildRolePayload),
    GuildRoleUpdate(GuildRolePayload),
    GuildRoleDelete(GuildRoleDeletePayload),
    MessageCreate(MessagePayload),
    MessageUpdate(MessageUpdatePayload),
    MessageDelete(MessageDeletePayload),
    MessageDeleteBulk(MessageDeleteBulkPayload),
    PresenceUpdate(PresencePayload),
    TypingStart(TypingStartPayload),
    UserUpdate(User),
    VoiceStateUpdate(VoiceStateUpdatePayload),
    VoiceServerUpdate(VoiceServerUpdatePayload),
}

impl GatewayEvent {
    /// Decode the payload of a named dispatch
    ///
    /// # Errors
    /// Returns [`CodecError::UnknownEvent`] for names outside the catalog
    /// and a JSON error when the payload does not match the schema.
    pub fn decode(name: &str, d: Value) -> Result<Self, CodecError> {
        let event_type =
            EventType::parse(name).ok_or_else(|| CodecError::UnknownEvent(name.to_string()))?;
        Self::decode_typed(event_type, d)
    }

    /// Decode the payload for an already-resolved event type
    ///
    /// # Errors
    /// Returns a JSON error when the payload does not match the schema.
    pub fn decode_typed(event_type: EventType, d: Value) -> Result<Self, CodecError> {
        let event = match event_type {
            EventType::Ready => Self::Ready(serde_json::from_value(d)?),
            EventType::Resumed => Self::Resumed(serde_json::from_value(d)?),
            EventType::ChannelCreate => Self::ChannelCreate(serde_json::from_value(d)?),
            EventType::ChannelUpdate => Self::ChannelUpdate(serde_json::from_value(d)?),
            EventType::ChannelDelete => Self::ChannelDelete(serde_json::from_value(d)?),
            EventType::GuildCreate => Self::GuildCreate(serde_json::from_value(d)?),
            EventType::GuildUpdate => Self::GuildUpdate(serde_json::from_value(d)?),
            EventType::GuildDelete => Self::GuildDelete(serde_json::from_value(d)?),
            EventType::GuildBanAdd => Self::GuildBanAdd(serde_json::from_value(d)?),
            EventType::GuildBanRemove => Self::GuildBanRemove(serde_json::from_value(d)?),
            EventType::GuildEmojisUpdate => Self::GuildEmojisUpdate(serde_json::from_value(d)?),
            EventType::GuildIntegrationsUpdate => {
                Self::GuildIntegrationsUpdate(serde_json::from_value(d)?)
            }
            EventType::GuildMemberAdd => Self::GuildMemberAdd(serde_json::from_value(d)?),
            EventType::GuildMemberRemove => Self::GuildMemberRemove(serde_json::from_value(d)?),
            EventType::GuildMemberUpdate => Self::GuildMemberUpdate(serde_json::from_value(d)?),
            EventType::GuildMemberChunk => Self::GuildMemberChunk(serde_json::from_value(d)?),
            EventType::GuildRoleCreate => Self::GuildRoleCreate(serde_json::from_value(d)?),
            EventType::GuildRoleUpdate => Self::GuildRoleUpdate(serde_json::from_value(d)?),
            EventType::GuildRoleDelete => Self::GuildRoleDelete(serde_json::from_value(d)?),
            EventType::MessageCreate => Self::MessageCreate(serde_json::from_value(d)?),
            EventType::MessageUpdate => Self::MessageUpdate(serde_json::from_value(d)?),
            EventType::MessageDelete => Self::MessageDelete(serde_json::from_value(d)?),
            EventType::MessageDeleteBulk => Self::MessageDeleteBulk(serde_json::from_value(d)?),
            EventType::PresenceUpdate => Self::PresenceUpdate(serde_json::from_value(d)?),
            EventType::TypingStart => Self::TypingStart(serde_json::from_value(d)?),
            EventType::UserUpdate => Self::UserUpdate(serde_json::from_value(d)?),
            EventType::VoiceStateUpdate => Self::VoiceStateUpdate(serde_json::from_value(d)?),
            EventType::VoiceServerUpdate => Self::VoiceServerUpdate(serde_json::from_value(d)?),
        };
        Ok(event)
    }

    /// The event type of this decoded event
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::Ready(_) => EventType::Ready,
            Self::Resumed(_) => EventType::Resumed,
            Self::ChannelCreate(_) => EventType::ChannelCreate,
            Self::ChannelUpdate(_) => EventType::ChannelUpdate,
            Self::ChannelDelete(_) => EventType::ChannelDelete,
            Self::GuildCreate(_) => EventType::GuildCreate,
            Self::GuildUpdate(_) => EventType::GuildUpdate,
            Self::GuildDelete(_) => EventType::GuildDelete,
            Self::GuildBanAdd(_) => EventType::GuildBanAdd,
            Self::GuildBanRemove(_) => EventType::GuildBanRemove,
            Self::GuildEmojisUpdate(_) => EventType::GuildEmojisUpdate,
            Self::GuildIntegrationsUpdate(_) => EventType::GuildIntegrationsUpdate,
            Self::GuildMemberAdd(_) => EventType::GuildMemberAdd,
            Self::GuildMemberRemove(_) => EventType::GuildMemberRemove,
            Self::GuildMemberUpdate(_) => EventType::GuildMemberUpdate,
            Self::GuildMemberChunk(_) => EventType::GuildMemberChunk,
            Self::GuildRoleCreate(_) => EventType::GuildRoleCreate,
            Self::GuildRoleUpdate(_) => EventType::GuildRoleUpdate,
            Self::GuildRoleDelete(_) => EventType::GuildRoleDelete,
            Self::MessageCreate(_) => EventType::MessageCreate,
            Self::MessageUpdate(_) => EventType::MessageUpdate,
            Self::MessageDelete(_) => EventType::MessageDelete,
            Self::MessageDeleteBulk(_) => EventType::MessageDeleteBulk,
            Self::PresenceUpdate(_) => EventType::PresenceUpdate,
            Self::TypingStart(_) => EventType::TypingStart,
            Self::UserUpdate(_) => EventType::UserUpdate,
            Self::VoiceStateUpdate(_) => EventType::VoiceStateUpdate,
            Self::VoiceServerUpdate(_) => EventType::VoiceServerUpdate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_message_create() {
        let event = GatewayEvent::decode(
            "MESSAGE_CREATE",
            json!({
                "id": "100",
                "channel_id": "10",
                "author": {"id": "7", "username": "alice"},
                "content": "hi"
            }),
        )
        .unwrap();
        assert_eq!(event.event_type(), EventType::MessageCreate);
    }

    #[test]
    fn test_decode_unknown_event_name() {
        let err = GatewayEvent::decode("USER_SETTINGS_UPDATE", json!({})).unwrap_err();
        assert!(matches!(err, CodecError::UnknownEvent(name) if name == "USER_SETTINGS_UPDATE"));
    }

    #[test]
    fn test_decode_schema_mismatch() {
        // MESSAGE_CREATE without its required fields is a recoverable
        // codec error, not a panic
        let err = GatewayEvent::decode("MESSAGE_CREATE", json!({"id": "1"})).unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
    }

    #[test]
    fn test_decode_resumed_with_trace() {
        let event = GatewayEvent::decode("RESUMED", json!({"_trace": ["gateway"]})).unwrap();
        match event {
            GatewayEvent::Resumed(payload) => assert_eq!(payload.trace, vec!["gateway"]),
            other => panic!("expected RESUMED, got {:?}", other.event_type()),
        }
    }

    #[test]
    fn test_event_type_roundtrip_through_decode() {
        let event = GatewayEvent::decode("GUILD_DELETE", json!({"id": "1"})).unwrap();
        assert_eq!(event.event_type().as_str(), "GUILD_DELETE");
    }
}
