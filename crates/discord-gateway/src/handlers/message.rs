//! MESSAGE_CREATE / UPDATE / DELETE / DELETE_BULK handlers

use discord_cache::CacheBuilder;
use tracing::debug;

use crate::events::{
    MessageDeleteBulkPayload, MessageDeletePayload, MessagePayload, MessageUpdatePayload,
};

/// Insert the message and merge its author into the top-level user map
pub fn create_message(builder: &mut CacheBuilder, payload: &MessagePayload) {
    let (author, message) = payload.clone().into_parts();
    builder.upsert_user(author);
    builder.insert_message(message);
}

/// Merge only the fields present in the payload into the cached message
///
/// An uncached message cannot be materialized from a partial payload and
/// is skipped.
pub fn update_message(builder: &mut CacheBuilder, payload: &MessageUpdatePayload) {
    let Some(message) = builder.message_mut(payload.channel_id, payload.id) else {
        debug!(
            channel_id = %payload.channel_id,
            message_id = %payload.id,
            "Message update for uncached message; dropped"
        );
        return;
    };

    if let Some(content) = &payload.content {
        message.content = content.clone();
    }
    if let Some(edited) = payload.edited_timestamp {
        message.edited_at = Some(edited);
    }
    if let Some(pinned) = payload.pinned {
        message.pinned = pinned;
    }
    if let Some(attachments) = &payload.attachments {
        message.attachments = attachments.clone();
    }
}

/// Remove the message from its channel's store
pub fn delete_message(builder: &mut CacheBuilder, payload: &MessageDeletePayload) {
    if builder.remove_message(payload.channel_id, payload.id).is_none() {
        debug!(
            channel_id = %payload.channel_id,
            message_id = %payload.id,
            "Message delete for uncached message"
        );
    }
}

/// Remove each listed message; missing ids are ignored
pub fn delete_messages(builder: &mut CacheBuilder, payload: &MessageDeleteBulkPayload) {
    for id in &payload.ids {
        builder.remove_message(payload.channel_id, *id);
    }
}
