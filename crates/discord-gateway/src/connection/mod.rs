//! WebSocket connection plumbing

mod socket;

pub use socket::{connect, Connection, GatewayReader, OUTBOUND_BUFFER};
