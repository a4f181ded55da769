//! # discord-core
//!
//! Domain layer for the gateway client: value objects and the entity data
//! model replicated from the gateway. This crate has zero dependencies on
//! networking or runtime infrastructure.

pub mod entities;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Attachment, ChannelType, DmChannel, Emoji, GroupDmChannel, Guild, GuildChannel, GuildMember,
    Message, Presence, Role, UnavailableGuild, User, UserStatus,
};
pub use value_objects::{Snowflake, SnowflakeParseError};
