//! Dispatch application pipeline
//!
//! Runs a decoded event through the registry: previous snapshot → builder
//! → handler → finalize → publish → API message factory → bus. Snapshot
//! publication always precedes API message delivery.

use std::sync::Arc;

use discord_cache::{CacheBuilder, SnapshotWriter};
use tracing::debug;

use crate::api::{self, ApiBus};
use crate::events::GatewayEvent;
use crate::handlers;

/// Applies decoded dispatches to the cache and publishes API messages
pub struct Dispatcher;

impl Dispatcher {
    /// Apply one event
    ///
    /// The builder is used by exactly this handler invocation; the new
    /// snapshot becomes visible to readers before the API message is
    /// delivered.
    pub fn apply(event: &GatewayEvent, cache: &SnapshotWriter, bus: &ApiBus) {
        let prev = cache.current();

        let mut builder = CacheBuilder::from_snapshot(&prev);
        handlers::apply(&mut builder, event);
        let curr = Arc::new(builder.finalize());

        cache.publish(Arc::clone(&curr));

        match api::build_message(event, prev, curr) {
            Some(message) => bus.publish(message),
            None => {
                debug!(event = %event.event_type(), "No API message for event");
            }
        }
    }
}
