//! # discord-cache
//!
//! In-memory replica of gateway-delivered state. The cache is published as
//! a sequence of immutable [`CacheSnapshot`] values; each applied gateway
//! event builds the next snapshot through a [`CacheBuilder`] and swaps it
//! in atomically. Readers always observe a consistent whole-snapshot view.

mod builder;
mod handle;
mod messages;
mod snapshot;

pub use builder::CacheBuilder;
pub use handle::{snapshot_channel, SnapshotReader, SnapshotWriter};
pub use messages::{ChannelMessages, DEFAULT_MESSAGE_CAPACITY};
pub use snapshot::CacheSnapshot;
