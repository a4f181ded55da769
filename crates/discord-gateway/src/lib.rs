//! # discord-gateway
//!
//! WebSocket gateway session manager and cache-mutation pipeline. Owns
//! the connection lifecycle (discovery, handshake, identify/resume,
//! heartbeating, reconnection) and applies the ordered event stream to an
//! immutable snapshot cache, publishing a high-level API message per
//! applied dispatch.

pub mod api;
pub mod connection;
pub mod events;
pub mod handlers;
pub mod protocol;
pub mod rest;
pub mod session;

pub use api::{api_channel, ApiBus, ApiMessage, ApiMessageKind, ApiReceiver};
pub use events::{Disposition, EventType, GatewayEvent};
pub use protocol::{
    CodecError, GatewayFrame, HelloPayload, IdentifyPayload, OpCode, RequestGuildMembersPayload,
    ResumePayload, GATEWAY_VERSION,
};
pub use rest::RestError;
pub use session::{
    GatewayClient, ResumeData, SessionCommand, SessionData, SessionError, SessionHandle,
    SessionMachine, SessionResult,
};
