//! User entity - an account as seen by the gateway

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// User entity
///
/// Users are stored once, in the cache's top-level user map; guild members
/// and messages reference them by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    #[serde(default)]
    pub discriminator: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bot: bool,
}

impl User {
    /// Create a new User
    pub fn new(id: Snowflake, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            discriminator: String::new(),
            avatar: None,
            bot: false,
        }
    }

    /// Get the full tag: username#discriminator
    pub fn tag(&self) -> String {
        format!("{}#{}", self.username, self.discriminator)
    }

    /// Check if this is a bot account
    #[inline]
    pub fn is_bot(&self) -> bool {
        self.bot
    }

    /// Update the username
    pub fn set_username(&mut self, username: String) {
        self.username = username;
    }

    /// Update the avatar hash
    pub fn set_avatar(&mut self, avatar: Option<String>) {
        self.avatar = avatar;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_tag() {
        let mut user = User::new(Snowflake::new(1), "testuser");
        user.discriminator = "1234".to_string();
        assert_eq!(user.tag(), "testuser#1234");
    }

    #[test]
    fn test_user_deserialize_minimal() {
        let user: User = serde_json::from_str(r#"{"id":"42","username":"bot"}"#).unwrap();
        assert_eq!(user.id, Snowflake::new(42));
        assert_eq!(user.username, "bot");
        assert!(!user.bot);
        assert!(user.avatar.is_none());
    }

    #[test]
    fn test_user_deserialize_full() {
        let json = r#"{"id":"42","username":"bot","discriminator":"0001","avatar":"abc","bot":true}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.is_bot());
        assert_eq!(user.avatar.as_deref(), Some("abc"));
    }
}
