//! API message bus
//!
//! Publish-only surface between the session task and the application.
//! Messages are queued in order; a dropped consumer turns publication
//! into a debug-logged no-op rather than an error.

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::messages::ApiMessage;

/// Receiving half handed to the application
pub type ApiReceiver = mpsc::UnboundedReceiver<ApiMessage>;

/// Create a connected bus/receiver pair
#[must_use]
pub fn api_channel() -> (ApiBus, ApiReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ApiBus { tx }, rx)
}

/// Publishing half, owned by the session task
#[derive(Debug, Clone)]
pub struct ApiBus {
    tx: mpsc::UnboundedSender<ApiMessage>,
}

impl ApiBus {
    /// Publish one message
    pub fn publish(&self, message: ApiMessage) {
        if self.tx.send(message).is_err() {
            debug!("API consumer dropped; message discarded");
        }
    }

    /// Check whether a consumer is still attached
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::messages::ApiMessageKind;
    use discord_cache::CacheSnapshot;
    use std::sync::Arc;

    fn resumed_message() -> ApiMessage {
        let snapshot = Arc::new(CacheSnapshot::new());
        ApiMessage {
            prev: snapshot.clone(),
            curr: snapshot,
            kind: ApiMessageKind::Resumed,
        }
    }

    #[tokio::test]
    async fn test_publish_delivers_in_order() {
        let (bus, mut rx) = api_channel();
        bus.publish(resumed_message());
        bus.publish(resumed_message());

        assert_eq!(rx.recv().await.unwrap().kind.name(), "Resumed");
        assert_eq!(rx.recv().await.unwrap().kind.name(), "Resumed");
    }

    #[tokio::test]
    async fn test_publish_after_consumer_drop_is_noop() {
        let (bus, rx) = api_channel();
        assert!(bus.is_open());
        drop(rx);
        assert!(!bus.is_open());

        // Must not panic or error
        bus.publish(resumed_message());
    }
}
