//! Presence - a user's online status within a guild

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// User online status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// User is online and active
    Online,
    /// User is idle (away from keyboard)
    Idle,
    /// Do not disturb
    Dnd,
    /// User is offline (or invisible)
    #[default]
    Offline,
}

impl UserStatus {
    /// Check if this status should be visible to others
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Offline)
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::Idle => write!(f, "idle"),
            Self::Dnd => write!(f, "dnd"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "idle" => Ok(Self::Idle),
            "dnd" => Ok(Self::Dnd),
            "offline" | "invisible" => Ok(Self::Offline),
            _ => Err(format!("Invalid status: {s}")),
        }
    }
}

/// A user's presence in one guild, keyed by (guild, user) in the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presence {
    pub user_id: Snowflake,
    pub status: UserStatus,
    /// Name of the game/activity currently shown, if any
    pub game: Option<String>,
}

impl Presence {
    /// Create a new presence
    #[must_use]
    pub fn new(user_id: Snowflake, status: UserStatus) -> Self {
        Self {
            user_id,
            status,
            game: None,
        }
    }

    /// Set the activity name
    #[must_use]
    pub fn with_game(mut self, game: impl Into<String>) -> Self {
        self.game = Some(game.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_visibility() {
        assert!(UserStatus::Online.is_visible());
        assert!(UserStatus::Dnd.is_visible());
        assert!(!UserStatus::Offline.is_visible());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("online".parse::<UserStatus>().unwrap(), UserStatus::Online);
        assert_eq!("DND".parse::<UserStatus>().unwrap(), UserStatus::Dnd);
        assert_eq!(
            "invisible".parse::<UserStatus>().unwrap(),
            UserStatus::Offline
        );
        assert!("busy".parse::<UserStatus>().is_err());
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(serde_json::to_string(&UserStatus::Idle).unwrap(), "\"idle\"");
        let status: UserStatus = serde_json::from_str("\"dnd\"").unwrap();
        assert_eq!(status, UserStatus::Dnd);
    }

    #[test]
    fn test_presence_builder() {
        let presence = Presence::new(Snowflake::new(1), UserStatus::Online).with_game("chess");
        assert_eq!(presence.game.as_deref(), Some("chess"));
    }
}
