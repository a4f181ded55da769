//! Bounded per-channel message store
//!
//! Keeps the most recent messages of one channel, evicting FIFO by
//! insertion order once the capacity is reached. Replacing an existing
//! message does not refresh its position.

use std::collections::{HashMap, VecDeque};

use discord_core::{Message, Snowflake};

/// Messages retained per channel before the oldest are evicted
pub const DEFAULT_MESSAGE_CAPACITY: usize = 100;

/// FIFO-bounded message store for a single channel
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMessages {
    capacity: usize,
    /// Insertion order, oldest first
    order: VecDeque<Snowflake>,
    messages: HashMap<Snowflake, Message>,
}

impl ChannelMessages {
    /// Create an empty store with the default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MESSAGE_CAPACITY)
    }

    /// Create an empty store with a custom capacity
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            order: VecDeque::new(),
            messages: HashMap::new(),
        }
    }

    /// Insert or replace a message, evicting the oldest when full
    pub fn insert(&mut self, message: Message) {
        let id = message.id;
        if self.messages.insert(id, message).is_none() {
            self.order.push_back(id);
            while self.order.len() > self.capacity {
                if let Some(evicted) = self.order.pop_front() {
                    self.messages.remove(&evicted);
                }
            }
        }
    }

    /// Look up a message by id
    pub fn get(&self, message_id: Snowflake) -> Option<&Message> {
        self.messages.get(&message_id)
    }

    /// Mutable lookup, used for partial updates
    pub fn get_mut(&mut self, message_id: Snowflake) -> Option<&mut Message> {
        self.messages.get_mut(&message_id)
    }

    /// Remove a message by id, returning it if present
    pub fn remove(&mut self, message_id: Snowflake) -> Option<Message> {
        let removed = self.messages.remove(&message_id);
        if removed.is_some() {
            self.order.retain(|id| *id != message_id);
        }
        removed
    }

    /// Number of cached messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterate messages oldest-first
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.order.iter().filter_map(|id| self.messages.get(id))
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ChannelMessages {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(id: u64) -> Message {
        Message::new(
            Snowflake::new(id),
            Snowflake::new(1),
            Snowflake::new(2),
            format!("message {id}"),
        )
    }

    #[test]
    fn test_insert_and_get() {
        let mut store = ChannelMessages::new();
        store.insert(msg(10));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(Snowflake::new(10)).unwrap().content, "message 10");
        assert!(store.get(Snowflake::new(11)).is_none());
    }

    #[test]
    fn test_fifo_eviction() {
        let mut store = ChannelMessages::with_capacity(3);
        for id in 1..=4 {
            store.insert(msg(id));
        }
        assert_eq!(store.len(), 3);
        // Oldest was evicted
        assert!(store.get(Snowflake::new(1)).is_none());
        assert!(store.get(Snowflake::new(4)).is_some());
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut store = ChannelMessages::with_capacity(2);
        store.insert(msg(1));
        store.insert(msg(2));

        // Replace id 1; it must not be treated as a new insertion
        let mut updated = msg(1);
        updated.content = "edited".to_string();
        store.insert(updated);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(Snowflake::new(1)).unwrap().content, "edited");

        // A genuinely new insertion now evicts id 1 (still the oldest)
        store.insert(msg(3));
        assert!(store.get(Snowflake::new(1)).is_none());
        assert!(store.get(Snowflake::new(2)).is_some());
    }

    #[test]
    fn test_remove() {
        let mut store = ChannelMessages::new();
        store.insert(msg(1));
        store.insert(msg(2));

        let removed = store.remove(Snowflake::new(1)).unwrap();
        assert_eq!(removed.id, Snowflake::new(1));
        assert!(store.remove(Snowflake::new(1)).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_iter_oldest_first() {
        let mut store = ChannelMessages::new();
        for id in [5, 3, 9] {
            store.insert(msg(id));
        }
        let ids: Vec<u64> = store.iter().map(|m| m.id.into_inner()).collect();
        assert_eq!(ids, vec![5, 3, 9]);
    }
}
