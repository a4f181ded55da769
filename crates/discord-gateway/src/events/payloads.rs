//! Event payload definitions
//!
//! Wire shapes for each dispatch event. Fields added by the gateway on top
//! of the base entity shapes (`guild_id` and friends) are ordinary members
//! of these records.

use chrono::{DateTime, Utc};
use discord_core::{
    Attachment, ChannelType, DmChannel, Emoji, GroupDmChannel, GuildChannel, GuildMember, Message,
    Role, Snowflake, UnavailableGuild, User, UserStatus,
};
use serde::{Deserialize, Serialize};

// === Connection events ===

/// READY event payload
///
/// Sent after a successful Identify.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyPayload {
    /// Gateway protocol version
    #[serde(default)]
    pub v: u8,

    /// The identity this session authenticated as
    pub user: User,

    /// Existing DM and group DM channels
    #[serde(default)]
    pub private_channels: Vec<ChannelPayload>,

    /// Guilds the bot is in, initially all unavailable
    #[serde(default)]
    pub guilds: Vec<UnavailableGuild>,

    /// Session ID used for resuming
    pub session_id: String,

    /// Debug trace of gateway servers involved
    #[serde(default, rename = "_trace")]
    pub trace: Vec<String>,
}

/// RESUMED event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumedPayload {
    /// Debug trace of gateway servers involved
    #[serde(default, rename = "_trace")]
    pub trace: Vec<String>,
}

// === Channel events ===

/// Channel shape shared by CHANNEL_CREATE/UPDATE/DELETE and READY
///
/// One wire shape covers guild channels, DMs and group DMs; [`classify`]
/// sorts it into the cache's representation.
///
/// [`classify`]: ChannelPayload::classify
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelPayload {
    pub id: Snowflake,
    #[serde(rename = "type", default)]
    pub channel_type: ChannelType,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<i32>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub parent_id: Option<Snowflake>,
    #[serde(default)]
    pub recipients: Vec<User>,
    #[serde(default)]
    pub owner_id: Option<Snowflake>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// A channel payload sorted into its cache representation
#[derive(Debug, Clone)]
pub enum ClassifiedChannel {
    Guild(GuildChannel),
    Dm(DmChannel),
    Group(GroupDmChannel),
}

impl ChannelPayload {
    /// Sort this payload into the collection it belongs to
    ///
    /// Returns `None` for guild channels without a guild id and DMs
    /// without a recipient; callers drop those with a debug log.
    pub fn classify(&self) -> Option<ClassifiedChannel> {
        match self.channel_type {
            ChannelType::Dm => {
                let recipient = self.recipients.first()?.clone();
                Some(ClassifiedChannel::Dm(DmChannel::new(self.id, recipient)))
            }
            ChannelType::GroupDm => Some(ClassifiedChannel::Group(GroupDmChannel {
                id: self.id,
                owner_id: self.owner_id.unwrap_or_default(),
                name: self.name.clone(),
                icon: self.icon.clone(),
                recipients: self.recipients.clone(),
            })),
            ChannelType::GuildText | ChannelType::GuildVoice | ChannelType::GuildCategory => {
                let guild_id = self.guild_id?;
                Some(ClassifiedChannel::Guild(GuildChannel {
                    id: self.id,
                    guild_id,
                    name: self.name.clone().unwrap_or_default(),
                    channel_type: self.channel_type,
                    position: self.position.unwrap_or_default(),
                    topic: self.topic.clone(),
                    parent_id: self.parent_id,
                }))
            }
        }
    }
}

// === Guild events ===

/// GUILD_CREATE event payload: the full guild
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildCreatePayload {
    pub id: Snowflake,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub owner_id: Snowflake,
    #[serde(default)]
    pub large: bool,
    #[serde(default)]
    pub member_count: u32,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub emojis: Vec<Emoji>,
    #[serde(default)]
    pub members: Vec<MemberPayload>,
    #[serde(default)]
    pub channels: Vec<ChannelPayload>,
    #[serde(default)]
    pub presences: Vec<PresencePayload>,
}

/// GUILD_UPDATE event payload: scalar fields only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildUpdatePayload {
    pub id: Snowflake,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub owner_id: Option<Snowflake>,
}

/// GUILD_DELETE event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildDeletePayload {
    pub id: Snowflake,
    /// True for a temporary outage; false when the bot left or the guild
    /// was deleted
    #[serde(default)]
    pub unavailable: bool,
}

/// GUILD_BAN_ADD / GUILD_BAN_REMOVE event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildBanPayload {
    pub guild_id: Snowflake,
    pub user: User,
}

/// GUILD_EMOJIS_UPDATE event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildEmojisUpdatePayload {
    pub guild_id: Snowflake,
    #[serde(default)]
    pub emojis: Vec<Emoji>,
}

/// GUILD_INTEGRATIONS_UPDATE event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildIntegrationsUpdatePayload {
    pub guild_id: Snowflake,
}

// === Member events ===

/// Member shape embedded in GUILD_CREATE and GUILD_MEMBER_CHUNK
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberPayload {
    pub user: User,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub roles: Vec<Snowflake>,
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
}

impl MemberPayload {
    /// Split into the embedded user and the cached member record
    pub fn into_parts(self) -> (User, GuildMember) {
        let member = GuildMember {
            user_id: self.user.id,
            nickname: self.nick,
            role_ids: self.roles,
            joined_at: self.joined_at,
        };
        (self.user, member)
    }
}

/// GUILD_MEMBER_ADD event payload: a member plus its guild id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildMemberAddPayload {
    pub guild_id: Snowflake,
    pub user: User,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub roles: Vec<Snowflake>,
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
}

/// GUILD_MEMBER_REMOVE event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildMemberRemovePayload {
    pub guild_id: Snowflake,
    pub user: User,
}

/// GUILD_MEMBER_UPDATE event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildMemberUpdatePayload {
    pub guild_id: Snowflake,
    pub user: User,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub roles: Vec<Snowflake>,
}

/// GUILD_MEMBER_CHUNK event payload: bulk member delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildMemberChunkPayload {
    pub guild_id: Snowflake,
    #[serde(default)]
    pub members: Vec<MemberPayload>,
}

// === Role events ===

/// GUILD_ROLE_CREATE / GUILD_ROLE_UPDATE event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildRolePayload {
    pub guild_id: Snowflake,
    pub role: Role,
}

/// GUILD_ROLE_DELETE event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildRoleDeletePayload {
    pub guild_id: Snowflake,
    pub role_id: Snowflake,
}

// === Message events ===

/// MESSAGE_CREATE event payload: the full message with its author
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePayload {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub author: User,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub edited_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl MessagePayload {
    /// Split into the embedded author and the cached message
    pub fn into_parts(self) -> (User, Message) {
        let message = Message {
            id: self.id,
            channel_id: self.channel_id,
            author_id: self.author.id,
            content: self.content,
            created_at: self.timestamp,
            edited_at: self.edited_timestamp,
            pinned: self.pinned,
            attachments: self.attachments,
        };
        (self.author, message)
    }
}

/// MESSAGE_UPDATE event payload: partial, absent fields preserved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageUpdatePayload {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub edited_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pinned: Option<bool>,
    #[serde(default)]
    pub attachments: Option<Vec<Attachment>>,
}

/// MESSAGE_DELETE event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDeletePayload {
    pub id: Snowflake,
    pub channel_id: Snowflake,
}

/// MESSAGE_DELETE_BULK event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDeleteBulkPayload {
    #[serde(default)]
    pub ids: Vec<Snowflake>,
    pub channel_id: Snowflake,
}

// === Presence events ===

/// Partial user embedded in PRESENCE_UPDATE
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartialUser {
    pub id: Snowflake,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Activity embedded in PRESENCE_UPDATE
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamePayload {
    #[serde(default)]
    pub name: Option<String>,
}

/// PRESENCE_UPDATE event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresencePayload {
    pub user: PartialUser,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub game: Option<GamePayload>,
}

/// TYPING_START event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypingStartPayload {
    pub channel_id: Snowflake,
    pub user_id: Snowflake,
    /// Unix timestamp in seconds
    #[serde(default)]
    pub timestamp: i64,
}

// === Voice events ===

/// VOICE_STATE_UPDATE event payload (decoded, not yet handled)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceStateUpdatePayload {
    pub user_id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    #[serde(default)]
    pub channel_id: Option<Snowflake>,
}

/// VOICE_SERVER_UPDATE event payload (decoded, not yet handled)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceServerUpdatePayload {
    pub guild_id: Snowflake,
    #[serde(default)]
    pub endpoint: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_payload_decode() {
        let json = r#"{
            "v": 5,
            "user": {"id": "1", "username": "bot"},
            "private_channels": [
                {"id": "10", "type": 1, "recipients": [{"id": "2", "username": "alice"}]}
            ],
            "guilds": [{"id": "100", "unavailable": true}],
            "session_id": "S",
            "_trace": ["gateway-prd-main"]
        }"#;
        let ready: ReadyPayload = serde_json::from_str(json).unwrap();
        assert_eq!(ready.v, 5);
        assert_eq!(ready.user.username, "bot");
        assert_eq!(ready.private_channels.len(), 1);
        assert_eq!(ready.guilds[0].id, Snowflake::new(100));
        assert_eq!(ready.session_id, "S");
    }

    #[test]
    fn test_channel_classify_guild() {
        let payload: ChannelPayload = serde_json::from_str(
            r#"{"id":"5","type":0,"guild_id":"1","name":"general","position":2}"#,
        )
        .unwrap();
        match payload.classify() {
            Some(ClassifiedChannel::Guild(channel)) => {
                assert_eq!(channel.guild_id, Snowflake::new(1));
                assert_eq!(channel.name, "general");
                assert_eq!(channel.position, 2);
            }
            other => panic!("expected guild channel, got {other:?}"),
        }
    }

    #[test]
    fn test_channel_classify_dm() {
        let payload: ChannelPayload = serde_json::from_str(
            r#"{"id":"5","type":1,"recipients":[{"id":"2","username":"alice"}]}"#,
        )
        .unwrap();
        match payload.classify() {
            Some(ClassifiedChannel::Dm(dm)) => {
                assert_eq!(dm.recipient.username, "alice");
            }
            other => panic!("expected dm channel, got {other:?}"),
        }
    }

    #[test]
    fn test_channel_classify_rejects_orphan_guild_channel() {
        // A guild-typed channel without a guild id cannot be cached
        let payload: ChannelPayload =
            serde_json::from_str(r#"{"id":"5","type":0,"name":"general"}"#).unwrap();
        assert!(payload.classify().is_none());
    }

    #[test]
    fn test_member_payload_into_parts() {
        let payload: MemberPayload = serde_json::from_str(
            r#"{"user":{"id":"7","username":"alice"},"nick":"al","roles":["50"]}"#,
        )
        .unwrap();
        let (user, member) = payload.into_parts();
        assert_eq!(user.id, Snowflake::new(7));
        assert_eq!(member.user_id, Snowflake::new(7));
        assert_eq!(member.nickname.as_deref(), Some("al"));
        assert!(member.has_role(Snowflake::new(50)));
    }

    #[test]
    fn test_message_payload_into_parts() {
        let payload: MessagePayload = serde_json::from_str(
            r#"{
                "id": "100",
                "channel_id": "10",
                "author": {"id": "7", "username": "alice"},
                "content": "hello",
                "timestamp": "2017-03-06T12:00:00.000000+00:00"
            }"#,
        )
        .unwrap();
        let (author, message) = payload.into_parts();
        assert_eq!(author.username, "alice");
        assert_eq!(message.author_id, author.id);
        assert_eq!(message.content, "hello");
        assert!(message.created_at.is_some());
        assert!(!message.is_edited());
    }

    #[test]
    fn test_message_update_partial_fields() {
        let payload: MessageUpdatePayload =
            serde_json::from_str(r#"{"id":"100","channel_id":"10","content":"edited"}"#).unwrap();
        assert_eq!(payload.content.as_deref(), Some("edited"));
        assert!(payload.edited_timestamp.is_none());
        assert!(payload.pinned.is_none());
        assert!(payload.attachments.is_none());
    }

    #[test]
    fn test_presence_payload_decode() {
        let payload: PresencePayload = serde_json::from_str(
            r#"{
                "user": {"id": "7", "username": "alice"},
                "guild_id": "1",
                "status": "idle",
                "game": {"name": "chess"}
            }"#,
        )
        .unwrap();
        assert_eq!(payload.status, UserStatus::Idle);
        assert_eq!(payload.game.unwrap().name.as_deref(), Some("chess"));
        assert_eq!(payload.user.username.as_deref(), Some("alice"));
    }

    #[test]
    fn test_guild_delete_unavailable_default() {
        let payload: GuildDeletePayload = serde_json::from_str(r#"{"id":"1"}"#).unwrap();
        assert!(!payload.unavailable);

        let outage: GuildDeletePayload =
            serde_json::from_str(r#"{"id":"1","unavailable":true}"#).unwrap();
        assert!(outage.unavailable);
    }
}
