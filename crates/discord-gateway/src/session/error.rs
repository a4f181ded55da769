//! Session error types

use thiserror::Error;

use crate::rest::RestError;

/// Session-level errors
///
/// Everything except `ReconnectsExhausted` is handled inside the
/// reconnect loop; only exhaustion surfaces to the host.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Gateway URL discovery failed
    #[error("gateway discovery failed: {0}")]
    Discovery(#[from] RestError),

    /// WebSocket upgrade or transport error
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// The bounded outbound channel was full
    #[error("outbound channel overflowed")]
    OutboundOverflow,

    /// The writer task is gone
    #[error("outbound channel closed")]
    OutboundClosed,

    /// No HeartbeatAck arrived between two heartbeats
    #[error("heartbeat was not acknowledged in time")]
    HeartbeatTimeout,

    /// The reconnect budget is spent; the session is over
    #[error("gave up after {attempts} reconnect attempts")]
    ReconnectsExhausted { attempts: u32 },
}

/// Session result type
pub type SessionResult<T> = Result<T, SessionError>;
