//! Entity definitions
//!
//! The data model replicated into the client cache. Entities are owned
//! values; cross-references between them are expressed as [`Snowflake`]
//! ids resolved through the cache, never as embedded copies.
//!
//! [`Snowflake`]: crate::value_objects::Snowflake

mod channel;
mod emoji;
mod guild;
mod member;
mod message;
mod presence;
mod role;
mod user;

pub use channel::{ChannelType, DmChannel, GroupDmChannel, GuildChannel};
pub use emoji::Emoji;
pub use guild::{Guild, UnavailableGuild};
pub use member::GuildMember;
pub use message::{Attachment, Message};
pub use presence::{Presence, UserStatus};
pub use role::Role;
pub use user::User;
