//! Emoji entity - a custom guild emoji

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Custom guild emoji
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emoji {
    pub id: Snowflake,
    pub name: String,
    #[serde(default)]
    pub require_colons: bool,
    #[serde(default)]
    pub managed: bool,
}

impl Emoji {
    /// Get the chat representation, e.g. `<:name:id>`
    pub fn mention(&self) -> String {
        format!("<:{}:{}>", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emoji_mention() {
        let emoji: Emoji = serde_json::from_str(r#"{"id":"7","name":"party"}"#).unwrap();
        assert_eq!(emoji.mention(), "<:party:7>");
    }
}
