//! Mutable snapshot builder
//!
//! A working copy of a [`CacheSnapshot`] used by exactly one event handler
//! between construction and finalization. Handlers go through the mutator
//! methods here; they never touch a live snapshot's containers.

use chrono::{DateTime, Utc};
use discord_core::{
    DmChannel, GroupDmChannel, Guild, Message, Presence, Snowflake, UnavailableGuild, User,
};

use crate::snapshot::CacheSnapshot;

/// Mutable working copy of a snapshot
#[derive(Debug)]
pub struct CacheBuilder {
    state: CacheSnapshot,
}

impl CacheBuilder {
    /// Create an isolated copy of a snapshot
    ///
    /// The copy shares nothing with the source; mutating the builder can
    /// never be observed through previously published snapshots.
    #[must_use]
    pub fn from_snapshot(snapshot: &CacheSnapshot) -> Self {
        Self {
            state: snapshot.clone(),
        }
    }

    /// Produce the next immutable snapshot
    #[must_use]
    pub fn finalize(self) -> CacheSnapshot {
        self.state
    }

    /// Set the authenticated identity
    pub fn set_bot_user(&mut self, user: User) {
        self.state.bot_user = Some(user);
    }

    /// Insert or replace a user in the top-level user map
    pub fn upsert_user(&mut self, user: User) {
        self.state.users.insert(user.id, user);
    }

    /// Merge present fields of a partial user into an existing entry
    ///
    /// Unknown users are left alone; partial data cannot create an entry.
    pub fn update_user_fields(
        &mut self,
        user_id: Snowflake,
        username: Option<String>,
        avatar: Option<String>,
    ) {
        if let Some(user) = self.state.users.get_mut(&user_id) {
            if let Some(username) = username {
                user.set_username(username);
            }
            if let Some(avatar) = avatar {
                user.set_avatar(Some(avatar));
            }
        }
    }

    /// Insert or replace a DM channel
    pub fn upsert_dm_channel(&mut self, channel: DmChannel) {
        self.state.dm_channels.insert(channel.id, channel);
    }

    /// Remove a DM channel, returning it if present
    pub fn remove_dm_channel(&mut self, channel_id: Snowflake) -> Option<DmChannel> {
        self.state.dm_channels.remove(&channel_id)
    }

    /// Insert or replace a group DM channel
    pub fn upsert_group_dm_channel(&mut self, channel: GroupDmChannel) {
        self.state.group_dm_channels.insert(channel.id, channel);
    }

    /// Remove a group DM channel, returning it if present
    pub fn remove_group_dm_channel(&mut self, channel_id: Snowflake) -> Option<GroupDmChannel> {
        self.state.group_dm_channels.remove(&channel_id)
    }

    /// Insert or replace a fully-available guild
    ///
    /// Clears any unavailable marker for the same id, keeping the two
    /// guild maps disjoint.
    pub fn upsert_guild(&mut self, guild: Guild) {
        self.state.unavailable_guilds.remove(&guild.id);
        self.state.guilds.insert(guild.id, guild);
    }

    /// Mark a guild as unavailable
    ///
    /// Removes any full state for the same id and returns it.
    pub fn set_guild_unavailable(&mut self, marker: UnavailableGuild) -> Option<Guild> {
        let previous = self.state.guilds.remove(&marker.id);
        self.state.unavailable_guilds.insert(marker.id, marker);
        previous
    }

    /// Remove a guild entirely (left, kicked, or deleted)
    pub fn remove_guild(&mut self, guild_id: Snowflake) -> Option<Guild> {
        self.state.unavailable_guilds.remove(&guild_id);
        self.state.guilds.remove(&guild_id)
    }

    /// Mutable access to a guild's interior state
    pub fn guild_mut(&mut self, guild_id: Snowflake) -> Option<&mut Guild> {
        self.state.guilds.get_mut(&guild_id)
    }

    /// Read access to a guild while building
    pub fn guild(&self, guild_id: Snowflake) -> Option<&Guild> {
        self.state.guilds.get(&guild_id)
    }

    /// Insert a message into its channel's bounded store
    pub fn insert_message(&mut self, message: Message) {
        self.state
            .messages
            .entry(message.channel_id)
            .or_default()
            .insert(message);
    }

    /// Mutable access to a cached message, used for partial updates
    pub fn message_mut(
        &mut self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> Option<&mut Message> {
        self.state
            .messages
            .get_mut(&channel_id)
            .and_then(|m| m.get_mut(message_id))
    }

    /// Remove a message, returning it if present
    pub fn remove_message(&mut self, channel_id: Snowflake, message_id: Snowflake) -> Option<Message> {
        self.state
            .messages
            .get_mut(&channel_id)
            .and_then(|m| m.remove(message_id))
    }

    /// Replace a user's presence in one guild
    pub fn set_presence(&mut self, guild_id: Snowflake, presence: Presence) {
        self.state
            .presences
            .entry(guild_id)
            .or_default()
            .insert(presence.user_id, presence);
    }

    /// Record when a user started typing in a channel
    pub fn record_typing(&mut self, channel_id: Snowflake, user_id: Snowflake, at: DateTime<Utc>) {
        self.state
            .last_typed
            .entry(channel_id)
            .or_default()
            .insert(user_id, at);
    }
}
