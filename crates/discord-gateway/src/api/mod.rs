//! API message surface
//!
//! The downstream publication side of the pipeline: for each applied
//! dispatch, a factory synthesizes a high-level message carrying the
//! (previous, current) snapshot pair, and the bus delivers it to the
//! application.

mod bus;
mod factory;
mod messages;

pub use bus::{api_channel, ApiBus, ApiReceiver};
pub use factory::build_message;
pub use messages::{ApiMessage, ApiMessageKind};
