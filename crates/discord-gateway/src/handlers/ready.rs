//! READY handler

use discord_cache::CacheBuilder;
use tracing::debug;

use crate::events::{ClassifiedChannel, ReadyPayload};

/// Populate the bot identity, private channels and unavailable guilds
pub fn apply_ready(builder: &mut CacheBuilder, payload: &ReadyPayload) {
    builder.set_bot_user(payload.user.clone());

    for channel in &payload.private_channels {
        match channel.classify() {
            Some(ClassifiedChannel::Dm(dm)) => builder.upsert_dm_channel(dm),
            Some(ClassifiedChannel::Group(group)) => builder.upsert_group_dm_channel(group),
            Some(ClassifiedChannel::Guild(_)) | None => {
                debug!(channel_id = %channel.id, "Skipping unusable private channel in READY");
            }
        }
    }

    for guild in &payload.guilds {
        builder.set_guild_unavailable(*guild);
    }
}
