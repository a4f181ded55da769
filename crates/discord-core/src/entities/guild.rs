//! Guild entity - a server with its channels, members, roles and emojis

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entities::{Emoji, GuildChannel, GuildMember, Role};
use crate::value_objects::Snowflake;

/// Guild entity with full state
///
/// Holds the interior collections keyed by id; member users are stored in
/// the cache's top-level user map, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct Guild {
    pub id: Snowflake,
    pub name: String,
    pub icon: Option<String>,
    pub owner_id: Snowflake,
    pub large: bool,
    pub member_count: u32,
    pub channels: HashMap<Snowflake, GuildChannel>,
    pub members: HashMap<Snowflake, GuildMember>,
    pub roles: HashMap<Snowflake, Role>,
    pub emojis: HashMap<Snowflake, Emoji>,
}

impl Guild {
    /// Create a new Guild with empty collections
    pub fn new(id: Snowflake, name: impl Into<String>, owner_id: Snowflake) -> Self {
        Self {
            id,
            name: name.into(),
            icon: None,
            owner_id,
            large: false,
            member_count: 0,
            channels: HashMap::new(),
            members: HashMap::new(),
            roles: HashMap::new(),
            emojis: HashMap::new(),
        }
    }

    /// Check if a user is the guild owner
    #[inline]
    pub fn is_owner(&self, user_id: Snowflake) -> bool {
        self.owner_id == user_id
    }

    /// Look up a channel by id
    pub fn channel(&self, channel_id: Snowflake) -> Option<&GuildChannel> {
        self.channels.get(&channel_id)
    }

    /// Look up a member by user id
    pub fn member(&self, user_id: Snowflake) -> Option<&GuildMember> {
        self.members.get(&user_id)
    }

    /// Look up a role by id
    pub fn role(&self, role_id: Snowflake) -> Option<&Role> {
        self.roles.get(&role_id)
    }

    /// Insert or replace a channel
    pub fn upsert_channel(&mut self, channel: GuildChannel) {
        self.channels.insert(channel.id, channel);
    }

    /// Remove a channel by id, returning it if present
    pub fn remove_channel(&mut self, channel_id: Snowflake) -> Option<GuildChannel> {
        self.channels.remove(&channel_id)
    }

    /// Insert or replace a member
    pub fn upsert_member(&mut self, member: GuildMember) {
        self.members.insert(member.user_id, member);
    }

    /// Remove a member by user id, returning it if present
    pub fn remove_member(&mut self, user_id: Snowflake) -> Option<GuildMember> {
        self.members.remove(&user_id)
    }

    /// Insert or replace a role
    pub fn upsert_role(&mut self, role: Role) {
        self.roles.insert(role.id, role);
    }

    /// Remove a role by id
    ///
    /// Members referencing the role keep the dangling id; resolving role
    /// ids is the consumer's responsibility.
    pub fn remove_role(&mut self, role_id: Snowflake) -> Option<Role> {
        self.roles.remove(&role_id)
    }

    /// Replace the whole emoji set
    pub fn set_emojis(&mut self, emojis: Vec<Emoji>) {
        self.emojis = emojis.into_iter().map(|e| (e.id, e)).collect();
    }
}

/// A guild known to exist but whose contents are not yet available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnavailableGuild {
    pub id: Snowflake,
    #[serde(default)]
    pub unavailable: bool,
}

impl UnavailableGuild {
    #[must_use]
    pub fn new(id: Snowflake) -> Self {
        Self {
            id,
            unavailable: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guild_creation() {
        let guild = Guild::new(Snowflake::new(1), "Test Guild", Snowflake::new(100));
        assert_eq!(guild.name, "Test Guild");
        assert!(guild.is_owner(Snowflake::new(100)));
        assert!(!guild.is_owner(Snowflake::new(200)));
        assert!(guild.channels.is_empty());
    }

    #[test]
    fn test_channel_upsert_remove() {
        let mut guild = Guild::new(Snowflake::new(1), "Test", Snowflake::new(100));
        let channel = GuildChannel::new(Snowflake::new(10), guild.id, "general");

        guild.upsert_channel(channel.clone());
        assert_eq!(guild.channel(Snowflake::new(10)), Some(&channel));

        let removed = guild.remove_channel(Snowflake::new(10));
        assert_eq!(removed, Some(channel));
        assert!(guild.channel(Snowflake::new(10)).is_none());
    }

    #[test]
    fn test_member_upsert_remove() {
        let mut guild = Guild::new(Snowflake::new(1), "Test", Snowflake::new(100));
        guild.upsert_member(GuildMember::new(Snowflake::new(7)));
        assert!(guild.member(Snowflake::new(7)).is_some());

        guild.remove_member(Snowflake::new(7));
        assert!(guild.member(Snowflake::new(7)).is_none());
    }

    #[test]
    fn test_role_removal_leaves_member_ids() {
        let mut guild = Guild::new(Snowflake::new(1), "Test", Snowflake::new(100));
        guild.upsert_role(Role::new(Snowflake::new(50), "mods"));

        let mut member = GuildMember::new(Snowflake::new(7));
        member.set_roles(vec![Snowflake::new(50)]);
        guild.upsert_member(member);

        guild.remove_role(Snowflake::new(50));
        assert!(guild.role(Snowflake::new(50)).is_none());
        // The member's dangling role id is kept
        assert!(guild
            .member(Snowflake::new(7))
            .unwrap()
            .has_role(Snowflake::new(50)));
    }

    #[test]
    fn test_set_emojis_replaces() {
        let mut guild = Guild::new(Snowflake::new(1), "Test", Snowflake::new(100));
        guild.set_emojis(vec![Emoji {
            id: Snowflake::new(5),
            name: "old".to_string(),
            require_colons: false,
            managed: false,
        }]);
        guild.set_emojis(vec![Emoji {
            id: Snowflake::new(6),
            name: "new".to_string(),
            require_colons: false,
            managed: false,
        }]);
        assert!(!guild.emojis.contains_key(&Snowflake::new(5)));
        assert!(guild.emojis.contains_key(&Snowflake::new(6)));
    }

    #[test]
    fn test_unavailable_guild() {
        let guild = UnavailableGuild::new(Snowflake::new(12345));
        assert!(guild.unavailable);
    }
}
