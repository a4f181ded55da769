//! API message definitions
//!
//! One variant per event family. Kinds carry the ids of the involved
//! entities; the full state is read from the attached snapshots, except
//! where only the prior snapshot had the data (deleted messages), in
//! which case the evicted values ride along.

use std::sync::Arc;

use discord_cache::CacheSnapshot;
use discord_core::{Message, Snowflake, User};

/// A high-level "something happened" message
///
/// `prev` is the snapshot before the event was applied, `curr` the one
/// after. Snapshot publication happens before this message is delivered.
#[derive(Debug, Clone)]
pub struct ApiMessage {
    pub prev: Arc<CacheSnapshot>,
    pub curr: Arc<CacheSnapshot>,
    pub kind: ApiMessageKind,
}

/// Event family tag with entity references
#[derive(Debug, Clone, PartialEq)]
pub enum ApiMessageKind {
    /// Session authenticated; the cache now has a bot user
    Ready { user: User },
    /// Session resumed without event loss
    Resumed,

    ChannelCreated { channel_id: Snowflake },
    ChannelUpdated { channel_id: Snowflake },
    /// The channel is gone from `curr`; read it from `prev`
    ChannelDeleted { channel_id: Snowflake },

    GuildCreated { guild_id: Snowflake },
    GuildUpdated { guild_id: Snowflake },
    GuildDeleted { guild_id: Snowflake, unavailable: bool },
    GuildBanAdded { guild_id: Snowflake, user: User },
    GuildBanRemoved { guild_id: Snowflake, user: User },
    GuildEmojisUpdated { guild_id: Snowflake },
    GuildIntegrationsUpdated { guild_id: Snowflake },

    MemberAdded { guild_id: Snowflake, user_id: Snowflake },
    MemberRemoved { guild_id: Snowflake, user_id: Snowflake },
    MemberUpdated { guild_id: Snowflake, user_id: Snowflake },
    MembersChunked { guild_id: Snowflake, count: usize },

    RoleCreated { guild_id: Snowflake, role_id: Snowflake },
    RoleUpdated { guild_id: Snowflake, role_id: Snowflake },
    RoleDeleted { guild_id: Snowflake, role_id: Snowflake },

    MessageCreated { channel_id: Snowflake, message_id: Snowflake },
    MessageUpdated { channel_id: Snowflake, message_id: Snowflake },
    /// Carries the deleted body, cloned from `prev`
    MessageDeleted { channel_id: Snowflake, message: Message },
    MessagesBulkDeleted { channel_id: Snowflake, messages: Vec<Message> },

    PresenceUpdated { guild_id: Snowflake, user_id: Snowflake },
}

impl ApiMessageKind {
    /// Short family name for logging
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ready { .. } => "Ready",
            Self::Resumed => "Resumed",
            Self::ChannelCreated { .. } => "ChannelCreated",
            Self::ChannelUpdated { .. } => "ChannelUpdated",
            Self::ChannelDeleted { .. } => "ChannelDeleted",
            Self::GuildCreated { .. } => "GuildCreated",
            Self::GuildUpdated { .. } => "GuildUpdated",
            Self::GuildDeleted { .. } => "GuildDeleted",
            Self::GuildBanAdded { .. } => "GuildBanAdded",
            Self::GuildBanRemoved { .. } => "GuildBanRemoved",
            Self::GuildEmojisUpdated { .. } => "GuildEmojisUpdated",
            Self::GuildIntegrationsUpdated { .. } => "GuildIntegrationsUpdated",
            Self::MemberAdded { .. } => "MemberAdded",
            Self::MemberRemoved { .. } => "MemberRemoved",
            Self::MemberUpdated { .. } => "MemberUpdated",
            Self::MembersChunked { .. } => "MembersChunked",
            Self::RoleCreated { .. } => "RoleCreated",
            Self::RoleUpdated { .. } => "RoleUpdated",
            Self::RoleDeleted { .. } => "RoleDeleted",
            Self::MessageCreated { .. } => "MessageCreated",
            Self::MessageUpdated { .. } => "MessageUpdated",
            Self::MessageDeleted { .. } => "MessageDeleted",
            Self::MessagesBulkDeleted { .. } => "MessagesBulkDeleted",
            Self::PresenceUpdated { .. } => "PresenceUpdated",
        }
    }
}
