//! Snapshot publication handle
//!
//! The session task owns the single [`SnapshotWriter`]; consumers hold
//! cloned [`SnapshotReader`]s. Publication swaps the latest snapshot
//! atomically; readers never observe a partially built state.

use std::sync::Arc;

use tokio::sync::watch;

use crate::snapshot::CacheSnapshot;

/// Create a connected writer/reader pair seeded with an empty snapshot
#[must_use]
pub fn snapshot_channel() -> (SnapshotWriter, SnapshotReader) {
    let (tx, rx) = watch::channel(Arc::new(CacheSnapshot::new()));
    (SnapshotWriter { tx }, SnapshotReader { rx })
}

/// Publishing side, owned by the session state machine
#[derive(Debug)]
pub struct SnapshotWriter {
    tx: watch::Sender<Arc<CacheSnapshot>>,
}

impl SnapshotWriter {
    /// The most recently published snapshot
    #[must_use]
    pub fn current(&self) -> Arc<CacheSnapshot> {
        self.tx.borrow().clone()
    }

    /// Publish the next snapshot, replacing the current one
    ///
    /// Succeeds regardless of whether any reader is currently subscribed.
    pub fn publish(&self, snapshot: Arc<CacheSnapshot>) {
        self.tx.send_replace(snapshot);
    }

    /// Create an additional reader
    #[must_use]
    pub fn subscribe(&self) -> SnapshotReader {
        SnapshotReader {
            rx: self.tx.subscribe(),
        }
    }
}

/// Consuming side; cheap to clone and share
#[derive(Debug, Clone)]
pub struct SnapshotReader {
    rx: watch::Receiver<Arc<CacheSnapshot>>,
}

impl SnapshotReader {
    /// The most recently published snapshot
    #[must_use]
    pub fn current(&self) -> Arc<CacheSnapshot> {
        self.rx.borrow().clone()
    }

    /// Wait until a new snapshot is published
    ///
    /// # Errors
    /// Returns an error when the writer has been dropped.
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.rx.changed().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CacheBuilder;
    use discord_core::{Snowflake, User};

    #[tokio::test]
    async fn test_publish_and_read() {
        let (writer, reader) = snapshot_channel();
        assert!(reader.current().bot_user().is_none());

        let mut builder = CacheBuilder::from_snapshot(&writer.current());
        builder.set_bot_user(User::new(Snowflake::new(1), "bot"));
        writer.publish(Arc::new(builder.finalize()));

        assert_eq!(reader.current().bot_user().unwrap().username, "bot");
    }

    #[tokio::test]
    async fn test_changed_wakes_reader() {
        let (writer, mut reader) = snapshot_channel();

        writer.publish(Arc::new(CacheSnapshot::new()));
        reader.changed().await.unwrap();

        // Old snapshots held by consumers stay valid after publication
        let old = reader.current();
        let mut builder = CacheBuilder::from_snapshot(&writer.current());
        builder.set_bot_user(User::new(Snowflake::new(1), "bot"));
        writer.publish(Arc::new(builder.finalize()));

        assert!(old.bot_user().is_none());
        assert!(writer.current().bot_user().is_some());
    }
}
