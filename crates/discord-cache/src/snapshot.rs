//! Immutable cache snapshot
//!
//! A consistent point-in-time view of everything the gateway has told us.
//! Snapshots are produced atomically by [`CacheBuilder::finalize`] and
//! never mutated afterwards; all access goes through read accessors.
//!
//! [`CacheBuilder::finalize`]: crate::CacheBuilder::finalize

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use discord_core::{
    DmChannel, GroupDmChannel, Guild, GuildChannel, Message, Presence, Snowflake,
    UnavailableGuild, User,
};

use crate::messages::ChannelMessages;

/// Point-in-time view of all cached gateway state
///
/// Invariants upheld by the builder:
/// - every member's user id has an entry in the top-level user map
/// - a guild id is in at most one of `guilds` / `unavailable_guilds`
/// - message stores exist only for channels that have been observed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheSnapshot {
    pub(crate) bot_user: Option<User>,
    pub(crate) dm_channels: HashMap<Snowflake, DmChannel>,
    pub(crate) group_dm_channels: HashMap<Snowflake, GroupDmChannel>,
    pub(crate) guilds: HashMap<Snowflake, Guild>,
    pub(crate) unavailable_guilds: HashMap<Snowflake, UnavailableGuild>,
    pub(crate) users: HashMap<Snowflake, User>,
    pub(crate) messages: HashMap<Snowflake, ChannelMessages>,
    pub(crate) last_typed: HashMap<Snowflake, HashMap<Snowflake, DateTime<Utc>>>,
    pub(crate) presences: HashMap<Snowflake, HashMap<Snowflake, Presence>>,
}

impl CacheSnapshot {
    /// Create an empty snapshot (state before READY)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The identity this session authenticated as, once READY arrived
    pub fn bot_user(&self) -> Option<&User> {
        self.bot_user.as_ref()
    }

    /// Look up a fully-available guild
    pub fn guild(&self, guild_id: Snowflake) -> Option<&Guild> {
        self.guilds.get(&guild_id)
    }

    /// Iterate all fully-available guilds
    pub fn guilds(&self) -> impl Iterator<Item = &Guild> {
        self.guilds.values()
    }

    /// Look up a guild known to exist but not yet delivered
    pub fn unavailable_guild(&self, guild_id: Snowflake) -> Option<&UnavailableGuild> {
        self.unavailable_guilds.get(&guild_id)
    }

    /// Number of guilds in either availability state
    pub fn guild_count(&self) -> usize {
        self.guilds.len() + self.unavailable_guilds.len()
    }

    /// Look up a user in the top-level user map
    pub fn user(&self, user_id: Snowflake) -> Option<&User> {
        self.users.get(&user_id)
    }

    /// Look up a DM channel
    pub fn dm_channel(&self, channel_id: Snowflake) -> Option<&DmChannel> {
        self.dm_channels.get(&channel_id)
    }

    /// Look up a group DM channel
    pub fn group_dm_channel(&self, channel_id: Snowflake) -> Option<&GroupDmChannel> {
        self.group_dm_channels.get(&channel_id)
    }

    /// Look up a guild channel across all guilds
    pub fn guild_channel(&self, channel_id: Snowflake) -> Option<&GuildChannel> {
        self.guilds.values().find_map(|g| g.channel(channel_id))
    }

    /// Look up a cached message
    pub fn message(&self, channel_id: Snowflake, message_id: Snowflake) -> Option<&Message> {
        self.messages.get(&channel_id).and_then(|m| m.get(message_id))
    }

    /// The bounded message store of one channel, if any messages were seen
    pub fn channel_messages(&self, channel_id: Snowflake) -> Option<&ChannelMessages> {
        self.messages.get(&channel_id)
    }

    /// Look up a user's presence in one guild
    pub fn presence(&self, guild_id: Snowflake, user_id: Snowflake) -> Option<&Presence> {
        self.presences.get(&guild_id).and_then(|p| p.get(&user_id))
    }

    /// When a user last started typing in a channel, if observed
    pub fn last_typed(&self, channel_id: Snowflake, user_id: Snowflake) -> Option<DateTime<Utc>> {
        self.last_typed
            .get(&channel_id)
            .and_then(|m| m.get(&user_id))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CacheBuilder;
    use discord_core::GuildMember;

    #[test]
    fn test_empty_snapshot() {
        let snapshot = CacheSnapshot::new();
        assert!(snapshot.bot_user().is_none());
        assert_eq!(snapshot.guild_count(), 0);
        assert!(snapshot.guild_channel(Snowflake::new(1)).is_none());
        assert!(snapshot.message(Snowflake::new(1), Snowflake::new(2)).is_none());
    }

    #[test]
    fn test_guild_channel_lookup_across_guilds() {
        let mut builder = CacheBuilder::from_snapshot(&CacheSnapshot::new());

        let mut guild_a = Guild::new(Snowflake::new(1), "a", Snowflake::new(9));
        guild_a.upsert_channel(GuildChannel::new(Snowflake::new(11), guild_a.id, "a-general"));
        let mut guild_b = Guild::new(Snowflake::new(2), "b", Snowflake::new(9));
        guild_b.upsert_channel(GuildChannel::new(Snowflake::new(22), guild_b.id, "b-general"));

        builder.upsert_guild(guild_a);
        builder.upsert_guild(guild_b);
        let snapshot = builder.finalize();

        assert_eq!(
            snapshot.guild_channel(Snowflake::new(22)).unwrap().name,
            "b-general"
        );
        assert!(snapshot.guild_channel(Snowflake::new(33)).is_none());
    }

    #[test]
    fn test_member_users_resolvable() {
        // The single-storage rule: members are resolved through users
        let mut builder = CacheBuilder::from_snapshot(&CacheSnapshot::new());

        let mut guild = Guild::new(Snowflake::new(1), "g", Snowflake::new(9));
        guild.upsert_member(GuildMember::new(Snowflake::new(7)));
        builder.upsert_guild(guild);
        builder.upsert_user(User::new(Snowflake::new(7), "alice"));

        let snapshot = builder.finalize();
        let member_id = snapshot
            .guild(Snowflake::new(1))
            .unwrap()
            .member(Snowflake::new(7))
            .unwrap()
            .user_id;
        assert_eq!(snapshot.user(member_id).unwrap().username, "alice");
    }
}
