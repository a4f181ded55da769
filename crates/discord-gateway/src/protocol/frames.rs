//! Gateway frame envelope
//!
//! Every gateway message is a JSON object `{op, d, s?, t?}`. The sequence
//! number `s` and event name `t` accompany Dispatch frames only; outbound
//! constructors never set them for other opcodes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    CodecError, HelloPayload, IdentifyPayload, OpCode, RequestGuildMembersPayload, ResumePayload,
};

/// Gateway frame
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GatewayFrame {
    /// Operation code
    pub op: OpCode,

    /// Event name (only for op=0 Dispatch)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t: Option<String>,

    /// Sequence number (only for op=0 Dispatch)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s: Option<u64>,

    /// Payload body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<Value>,
}

/// Decode-side mirror of the envelope; keeps the raw opcode so unknown
/// values surface as [`CodecError::UnknownOpcode`] instead of a generic
/// JSON error.
#[derive(Debug, Deserialize)]
struct RawFrame {
    op: u8,
    #[serde(default)]
    t: Option<String>,
    #[serde(default)]
    s: Option<u64>,
    #[serde(default)]
    d: Option<Value>,
}

impl GatewayFrame {
    // === Outbound constructors ===

    /// Create a Heartbeat frame (op=1)
    ///
    /// The body is the last observed sequence number, or JSON null when no
    /// dispatch has been seen yet.
    #[must_use]
    pub fn heartbeat(last_seq: Option<u64>) -> Self {
        Self {
            op: OpCode::Heartbeat,
            t: None,
            s: None,
            d: Some(last_seq.map_or(Value::Null, |s| Value::Number(s.into()))),
        }
    }

    /// Create an Identify frame (op=2)
    #[must_use]
    pub fn identify(payload: &IdentifyPayload) -> Self {
        Self {
            op: OpCode::Identify,
            t: None,
            s: None,
            d: Some(serde_json::to_value(payload).unwrap_or_default()),
        }
    }

    /// Create a Status Update frame (op=3); the body is passed through
    #[must_use]
    pub fn status_update(status: Value) -> Self {
        Self {
            op: OpCode::StatusUpdate,
            t: None,
            s: None,
            d: Some(status),
        }
    }

    /// Create a Resume frame (op=6)
    #[must_use]
    pub fn resume(payload: &ResumePayload) -> Self {
        Self {
            op: OpCode::Resume,
            t: None,
            s: None,
            d: Some(serde_json::to_value(payload).unwrap_or_default()),
        }
    }

    /// Create a Request Guild Members frame (op=8)
    #[must_use]
    pub fn request_guild_members(payload: &RequestGuildMembersPayload) -> Self {
        Self {
            op: OpCode::RequestGuildMembers,
            t: None,
            s: None,
            d: Some(serde_json::to_value(payload).unwrap_or_default()),
        }
    }

    /// Create a Dispatch frame (op=0); primarily useful in tests
    #[must_use]
    pub fn dispatch(event_type: impl Into<String>, sequence: u64, data: Value) -> Self {
        Self {
            op: OpCode::Dispatch,
            t: Some(event_type.into()),
            s: Some(sequence),
            d: Some(data),
        }
    }

    // === Inbound accessors ===

    /// Extract a Hello body (op=10)
    ///
    /// # Errors
    /// Returns a codec error when the body is missing or malformed.
    pub fn as_hello(&self) -> Result<HelloPayload, CodecError> {
        let d = self.d.clone().unwrap_or(Value::Null);
        Ok(serde_json::from_value(d)?)
    }

    /// Extract the Dispatch fields `(s, t, d)`
    ///
    /// # Errors
    /// Returns [`CodecError::MissingDispatchFields`] when `s` or `t` is
    /// absent on a Dispatch frame.
    pub fn dispatch_fields(&self) -> Result<(u64, &str, Value), CodecError> {
        match (self.s, self.t.as_deref()) {
            (Some(seq), Some(name)) => {
                Ok((seq, name, self.d.clone().unwrap_or(Value::Null)))
            }
            _ => Err(CodecError::MissingDispatchFields),
        }
    }

    // === Codec ===

    /// Serialize to a JSON text frame
    ///
    /// # Errors
    /// Returns a codec error if the frame cannot be serialized.
    pub fn to_json(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from a JSON text frame
    ///
    /// Missing `s`/`t` on non-Dispatch frames is accepted; unknown opcodes
    /// are reported as [`CodecError::UnknownOpcode`].
    ///
    /// # Errors
    /// Returns a codec error for malformed JSON or unknown opcodes.
    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        let raw: RawFrame = serde_json::from_str(json)?;
        let op = OpCode::from_u8(raw.op).ok_or(CodecError::UnknownOpcode(raw.op))?;
        Ok(Self {
            op,
            t: raw.t,
            s: raw.s,
            d: raw.d,
        })
    }
}

impl std::fmt::Display for GatewayFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(t) = &self.t {
            write!(f, "GatewayFrame(op={}, t={}", self.op, t)?;
            if let Some(s) = self.s {
                write!(f, ", s={s}")?;
            }
            write!(f, ")")
        } else {
            write!(f, "GatewayFrame(op={})", self.op)
        }
    }
}
