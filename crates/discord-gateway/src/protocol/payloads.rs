//! Non-dispatch payload definitions
//!
//! Bodies of the control frames exchanged around the event stream.

use discord_common::GatewayConfig;
use discord_core::Snowflake;
use serde::{Deserialize, Serialize};

/// Payload for op 10 (Hello)
///
/// Sent by the server immediately after the upgrade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloPayload {
    /// Heartbeat interval in milliseconds
    pub heartbeat_interval: u64,

    /// Debug trace of gateway servers involved
    #[serde(default, rename = "_trace")]
    pub trace: Vec<String>,
}

/// Payload for op 2 (Identify)
///
/// Sent by the client to authenticate a fresh session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifyPayload {
    /// Authentication token
    pub token: String,

    /// Client properties
    pub properties: IdentifyProperties,

    /// Whether the server may compress dispatches (not supported here)
    pub compress: bool,

    /// Member-count threshold above which offline members are withheld
    pub large_threshold: u32,

    /// Shard assignment as `[shard_num, shard_total]`
    pub shard: [u32; 2],
}

impl IdentifyPayload {
    /// Build the Identify body from the session configuration
    #[must_use]
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self {
            token: config.token.clone(),
            properties: IdentifyProperties::current(),
            compress: false,
            large_threshold: config.large_threshold,
            shard: [config.shard_num, config.shard_total],
        }
    }
}

/// Client properties reported in Identify
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifyProperties {
    #[serde(rename = "$os")]
    pub os: String,
    #[serde(rename = "$browser")]
    pub browser: String,
    #[serde(rename = "$device")]
    pub device: String,
    #[serde(rename = "$referrer", default)]
    pub referrer: String,
    #[serde(rename = "$referring_domain", default)]
    pub referring_domain: String,
}

impl IdentifyProperties {
    /// Properties describing this client on the current platform
    #[must_use]
    pub fn current() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            browser: "discord-gateway".to_string(),
            device: "discord-gateway".to_string(),
            referrer: String::new(),
            referring_domain: String::new(),
        }
    }
}

/// Payload for op 6 (Resume)
///
/// Sent by the client to re-establish a dropped session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumePayload {
    /// Authentication token
    pub token: String,

    /// Session ID received in READY
    pub session_id: String,

    /// Last received sequence number
    pub seq: u64,
}

/// Payload for op 8 (Request Guild Members)
///
/// Asks the gateway to stream a guild's members as GUILD_MEMBER_CHUNK
/// dispatches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestGuildMembersPayload {
    /// Guild to enumerate
    pub guild_id: Snowflake,

    /// Username prefix filter (empty for all members)
    #[serde(default)]
    pub query: String,

    /// Maximum number of members to return (0 for no limit)
    #[serde(default)]
    pub limit: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_payload_decode() {
        let hello: HelloPayload =
            serde_json::from_str(r#"{"heartbeat_interval":45000,"_trace":["a"]}"#).unwrap();
        assert_eq!(hello.heartbeat_interval, 45_000);
        assert_eq!(hello.trace, vec!["a".to_string()]);

        // _trace is optional
        let bare: HelloPayload = serde_json::from_str(r#"{"heartbeat_interval":1000}"#).unwrap();
        assert!(bare.trace.is_empty());
    }

    #[test]
    fn test_identify_from_config() {
        let config = GatewayConfig::new("T").with_shard(0, 1);
        let identify = IdentifyPayload::from_config(&config);

        assert_eq!(identify.token, "T");
        assert!(!identify.compress);
        assert_eq!(identify.large_threshold, 100);
        assert_eq!(identify.shard, [0, 1]);
    }

    #[test]
    fn test_identify_properties_keys() {
        let json = serde_json::to_value(IdentifyProperties::current()).unwrap();
        let object = json.as_object().unwrap();
        for key in ["$os", "$browser", "$device", "$referrer", "$referring_domain"] {
            assert!(object.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn test_resume_payload_serialization() {
        let payload = ResumePayload {
            token: "T".to_string(),
            session_id: "S".to_string(),
            seq: 42,
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["token"], "T");
        assert_eq!(json["session_id"], "S");
        assert_eq!(json["seq"], 42);
    }

    #[test]
    fn test_request_guild_members_serialization() {
        let payload = RequestGuildMembersPayload {
            guild_id: Snowflake::new(99),
            query: String::new(),
            limit: 0,
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["guild_id"], "99");
        assert_eq!(json["query"], "");
        assert_eq!(json["limit"], 0);
    }
}
