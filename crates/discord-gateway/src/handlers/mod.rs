//! Cache-mutation handlers
//!
//! One handler per dispatch event, each updating the [`CacheBuilder`] to
//! reflect the server-side change. Handlers tolerate events referencing
//! entities that were never cached; those are logged at debug and the
//! rest of the mutation still applies.

mod channel;
mod guild;
mod member;
mod message;
mod presence;
mod ready;
mod role;

use discord_cache::CacheBuilder;
use tracing::warn;

use crate::events::GatewayEvent;

/// Apply one decoded event to the builder
///
/// Exhaustive over the closed event catalog; acknowledged-only events
/// leave the builder untouched and not-yet-implemented events log a
/// warning.
pub fn apply(builder: &mut CacheBuilder, event: &GatewayEvent) {
    match event {
        GatewayEvent::Ready(payload) => ready::apply_ready(builder, payload),
        GatewayEvent::Resumed(_) => {}

        GatewayEvent::ChannelCreate(payload) | GatewayEvent::ChannelUpdate(payload) => {
            channel::upsert_channel(builder, payload);
        }
        GatewayEvent::ChannelDelete(payload) => channel::delete_channel(builder, payload),

        GatewayEvent::GuildCreate(payload) => guild::create_guild(builder, payload),
        GatewayEvent::GuildUpdate(payload) => guild::update_guild(builder, payload),
        GatewayEvent::GuildDelete(payload) => guild::delete_guild(builder, payload),
        GatewayEvent::GuildEmojisUpdate(payload) => guild::update_emojis(builder, payload),

        // Ban events carry no cache change; the ban list is not replicated
        GatewayEvent::GuildBanAdd(_) | GatewayEvent::GuildBanRemove(_) => {}
        GatewayEvent::GuildIntegrationsUpdate(_) => {}

        GatewayEvent::GuildMemberAdd(payload) => member::add_member(builder, payload),
        GatewayEvent::GuildMemberRemove(payload) => member::remove_member(builder, payload),
        GatewayEvent::GuildMemberUpdate(payload) => member::update_member(builder, payload),
        GatewayEvent::GuildMemberChunk(payload) => member::merge_chunk(builder, payload),

        GatewayEvent::GuildRoleCreate(payload) | GatewayEvent::GuildRoleUpdate(payload) => {
            role::upsert_role(builder, payload);
        }
        GatewayEvent::GuildRoleDelete(payload) => role::delete_role(builder, payload),

        GatewayEvent::MessageCreate(payload) => message::create_message(builder, payload),
        GatewayEvent::MessageUpdate(payload) => message::update_message(builder, payload),
        GatewayEvent::MessageDelete(payload) => message::delete_message(builder, payload),
        GatewayEvent::MessageDeleteBulk(payload) => message::delete_messages(builder, payload),

        GatewayEvent::PresenceUpdate(payload) => presence::update_presence(builder, payload),

        GatewayEvent::TypingStart(_)
        | GatewayEvent::UserUpdate(_)
        | GatewayEvent::VoiceStateUpdate(_)
        | GatewayEvent::VoiceServerUpdate(_) => {
            warn!(event = %event.event_type(), "Event not yet handled; cache unchanged");
        }
    }
}
