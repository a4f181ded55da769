//! Role entity - a permission role within a guild

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Guild role entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: Snowflake,
    pub name: String,
    #[serde(default)]
    pub color: u32,
    #[serde(default)]
    pub hoist: bool,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub permissions: u64,
    #[serde(default)]
    pub managed: bool,
    #[serde(default)]
    pub mentionable: bool,
}

impl Role {
    /// Create a new Role with default flags
    pub fn new(id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: 0,
            hoist: false,
            position: 0,
            permissions: 0,
            managed: false,
            mentionable: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_deserialize() {
        let json = r#"{"id":"9","name":"admin","color":255,"position":3,"permissions":8}"#;
        let role: Role = serde_json::from_str(json).unwrap();
        assert_eq!(role.id, Snowflake::new(9));
        assert_eq!(role.name, "admin");
        assert_eq!(role.permissions, 8);
        assert!(!role.hoist);
    }
}
