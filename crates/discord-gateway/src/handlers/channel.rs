//! CHANNEL_CREATE / CHANNEL_UPDATE / CHANNEL_DELETE handlers

use discord_cache::CacheBuilder;
use tracing::debug;

use crate::events::{ChannelPayload, ClassifiedChannel};

/// Insert or replace a channel in its owning collection
pub fn upsert_channel(builder: &mut CacheBuilder, payload: &ChannelPayload) {
    match payload.classify() {
        Some(ClassifiedChannel::Dm(dm)) => builder.upsert_dm_channel(dm),
        Some(ClassifiedChannel::Group(group)) => builder.upsert_group_dm_channel(group),
        Some(ClassifiedChannel::Guild(channel)) => {
            match builder.guild_mut(channel.guild_id) {
                Some(guild) => guild.upsert_channel(channel),
                None => {
                    debug!(
                        channel_id = %payload.id,
                        guild_id = %channel.guild_id,
                        "Channel for unknown guild; dropped"
                    );
                }
            }
        }
        None => {
            debug!(channel_id = %payload.id, "Unclassifiable channel payload; dropped");
        }
    }
}

/// Remove a channel from its owning collection
///
/// Messages cached under the channel id are retained; they stay reachable
/// through previously published snapshots and the channel's store.
pub fn delete_channel(builder: &mut CacheBuilder, payload: &ChannelPayload) {
    if payload.channel_type.is_guild_type() {
        let Some(guild_id) = payload.guild_id else {
            debug!(channel_id = %payload.id, "Channel delete without guild id; dropped");
            return;
        };
        match builder.guild_mut(guild_id) {
            Some(guild) => {
                guild.remove_channel(payload.id);
            }
            None => {
                debug!(
                    channel_id = %payload.id,
                    guild_id = %guild_id,
                    "Channel delete for unknown guild; dropped"
                );
            }
        }
    } else if builder.remove_dm_channel(payload.id).is_none()
        && builder.remove_group_dm_channel(payload.id).is_none()
    {
        debug!(channel_id = %payload.id, "Channel delete for unknown private channel");
    }
}
