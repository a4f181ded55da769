//! Channel entities - guild channels, DMs and group DMs
//!
//! The gateway uses one wire shape for all channel kinds; the cache keeps
//! them in separate collections, so they are separate types here.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::entities::User;
use crate::value_objects::Snowflake;

/// Channel type discriminant as sent in the `type` wire field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ChannelType {
    /// Guild text channel
    #[default]
    GuildText = 0,
    /// Direct message between two users
    Dm = 1,
    /// Guild voice channel
    GuildVoice = 2,
    /// Group direct message
    GroupDm = 3,
    /// Guild category for organizing channels
    GuildCategory = 4,
}

impl ChannelType {
    /// Get the raw integer value
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Check if this type lives inside a guild
    #[must_use]
    pub const fn is_guild_type(self) -> bool {
        matches!(self, Self::GuildText | Self::GuildVoice | Self::GuildCategory)
    }
}

impl From<u8> for ChannelType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Dm,
            2 => Self::GuildVoice,
            3 => Self::GroupDm,
            4 => Self::GuildCategory,
            _ => Self::GuildText, // Default for 0 and unknown values
        }
    }
}

impl Serialize for ChannelType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for ChannelType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Ok(Self::from(value))
    }
}

/// A channel belonging to a guild (text, voice or category)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildChannel {
    pub id: Snowflake,
    pub guild_id: Snowflake,
    pub name: String,
    pub channel_type: ChannelType,
    pub position: i32,
    pub topic: Option<String>,
    pub parent_id: Option<Snowflake>,
}

impl GuildChannel {
    /// Create a new guild text channel
    #[must_use]
    pub fn new(id: Snowflake, guild_id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            guild_id,
            name: name.into(),
            channel_type: ChannelType::GuildText,
            position: 0,
            topic: None,
            parent_id: None,
        }
    }

    /// Check if this is a text channel
    #[inline]
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self.channel_type, ChannelType::GuildText)
    }

    /// Check if this is a category
    #[inline]
    #[must_use]
    pub fn is_category(&self) -> bool {
        matches!(self.channel_type, ChannelType::GuildCategory)
    }
}

/// A direct-message channel with a single recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DmChannel {
    pub id: Snowflake,
    pub recipient: User,
}

impl DmChannel {
    /// Create a new DM channel
    #[must_use]
    pub fn new(id: Snowflake, recipient: User) -> Self {
        Self { id, recipient }
    }
}

/// A group direct-message channel with multiple recipients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDmChannel {
    pub id: Snowflake,
    pub owner_id: Snowflake,
    pub name: Option<String>,
    pub icon: Option<String>,
    pub recipients: Vec<User>,
}

impl GroupDmChannel {
    /// Get display name (explicit name or the recipient list)
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self
                .recipients
                .iter()
                .map(|u| u.username.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_type_from_u8() {
        assert_eq!(ChannelType::from(0), ChannelType::GuildText);
        assert_eq!(ChannelType::from(1), ChannelType::Dm);
        assert_eq!(ChannelType::from(2), ChannelType::GuildVoice);
        assert_eq!(ChannelType::from(3), ChannelType::GroupDm);
        assert_eq!(ChannelType::from(4), ChannelType::GuildCategory);
        assert_eq!(ChannelType::from(99), ChannelType::GuildText); // Unknown defaults to text
    }

    #[test]
    fn test_channel_type_serde() {
        let json = serde_json::to_string(&ChannelType::GroupDm).unwrap();
        assert_eq!(json, "3");

        let ct: ChannelType = serde_json::from_str("4").unwrap();
        assert_eq!(ct, ChannelType::GuildCategory);
    }

    #[test]
    fn test_guild_channel() {
        let channel = GuildChannel::new(Snowflake::new(1), Snowflake::new(100), "general");
        assert!(channel.is_text());
        assert!(!channel.is_category());
        assert_eq!(channel.guild_id, Snowflake::new(100));
    }

    #[test]
    fn test_group_dm_display_name() {
        let group = GroupDmChannel {
            id: Snowflake::new(1),
            owner_id: Snowflake::new(2),
            name: None,
            icon: None,
            recipients: vec![
                User::new(Snowflake::new(3), "alice"),
                User::new(Snowflake::new(4), "bob"),
            ],
        };
        assert_eq!(group.display_name(), "alice, bob");

        let named = GroupDmChannel {
            name: Some("the gang".to_string()),
            ..group
        };
        assert_eq!(named.display_name(), "the gang");
    }
}
