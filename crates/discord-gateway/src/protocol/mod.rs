//! Gateway wire protocol
//!
//! JSON text frames exchanged with the gateway: opcodes, the frame
//! envelope, and the payload bodies of non-dispatch frames.

mod frames;
mod opcodes;
mod payloads;

pub use frames::GatewayFrame;
pub use opcodes::OpCode;
pub use payloads::{
    HelloPayload, IdentifyPayload, IdentifyProperties, RequestGuildMembersPayload, ResumePayload,
};

/// Gateway protocol version requested on connect
pub const GATEWAY_VERSION: u8 = 5;

/// Codec errors
///
/// All of these are recoverable at the session level: the offending frame
/// is logged and dropped, and the session continues.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Frame carried an opcode outside the closed 0-11 set
    #[error("unknown opcode: {0}")]
    UnknownOpcode(u8),

    /// Dispatch carried an event name outside the closed catalog
    #[error("unknown event type: {0}")]
    UnknownEvent(String),

    /// Dispatch frame without sequence number or event name
    #[error("dispatch frame missing sequence or event name")]
    MissingDispatchFields,

    /// Frame or payload body failed JSON (de)serialization
    #[error("malformed frame: {0}")]
    Json(#[from] serde_json::Error),
}
