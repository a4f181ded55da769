//! GUILD_CREATE / GUILD_UPDATE / GUILD_DELETE / GUILD_EMOJIS_UPDATE handlers

use discord_cache::CacheBuilder;
use discord_core::{Guild, Presence, UnavailableGuild};
use tracing::debug;

use crate::events::{
    ClassifiedChannel, GuildCreatePayload, GuildDeletePayload, GuildEmojisUpdatePayload,
    GuildUpdatePayload,
};

/// Insert the full guild, clearing its unavailable marker and merging
/// member users into the top-level user map
pub fn create_guild(builder: &mut CacheBuilder, payload: &GuildCreatePayload) {
    let mut guild = Guild::new(payload.id, payload.name.clone(), payload.owner_id);
    guild.icon = payload.icon.clone();
    guild.large = payload.large;
    guild.member_count = payload.member_count;

    for role in &payload.roles {
        guild.upsert_role(role.clone());
    }
    guild.set_emojis(payload.emojis.clone());

    for member in payload.members.iter().cloned() {
        let (user, member) = member.into_parts();
        builder.upsert_user(user);
        guild.upsert_member(member);
    }

    for channel in &payload.channels {
        // Channels embedded in GUILD_CREATE omit their guild id
        let mut channel = channel.clone();
        channel.guild_id.get_or_insert(payload.id);
        match channel.classify() {
            Some(ClassifiedChannel::Guild(channel)) => guild.upsert_channel(channel),
            _ => {
                debug!(
                    channel_id = %channel.id,
                    guild_id = %payload.id,
                    "Skipping non-guild channel embedded in GUILD_CREATE"
                );
            }
        }
    }

    builder.upsert_guild(guild);

    for presence in &payload.presences {
        let mut entry = Presence::new(presence.user.id, presence.status);
        entry.game = presence.game.as_ref().and_then(|g| g.name.clone());
        builder.set_presence(payload.id, entry);
    }
}

/// Replace scalar guild fields, preserving members, channels and presences
pub fn update_guild(builder: &mut CacheBuilder, payload: &GuildUpdatePayload) {
    let Some(guild) = builder.guild_mut(payload.id) else {
        debug!(guild_id = %payload.id, "Guild update for unknown guild; dropped");
        return;
    };

    if let Some(name) = &payload.name {
        guild.name = name.clone();
    }
    if let Some(icon) = &payload.icon {
        guild.icon = Some(icon.clone());
    }
    if let Some(owner_id) = payload.owner_id {
        guild.owner_id = owner_id;
    }
}

/// Move the guild to the unavailable set, or drop it entirely
pub fn delete_guild(builder: &mut CacheBuilder, payload: &GuildDeletePayload) {
    if payload.unavailable {
        builder.set_guild_unavailable(UnavailableGuild::new(payload.id));
    } else if builder.remove_guild(payload.id).is_none() {
        debug!(guild_id = %payload.id, "Guild delete for unknown guild");
    }
}

/// Replace the guild's emoji set
pub fn update_emojis(builder: &mut CacheBuilder, payload: &GuildEmojisUpdatePayload) {
    match builder.guild_mut(payload.guild_id) {
        Some(guild) => guild.set_emojis(payload.emojis.clone()),
        None => {
            debug!(guild_id = %payload.guild_id, "Emoji update for unknown guild; dropped");
        }
    }
}
