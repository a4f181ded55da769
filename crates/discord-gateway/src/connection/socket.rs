//! WebSocket connect and writer task
//!
//! Opens the gateway socket with the protocol query parameters, splits it,
//! and spawns the writer task fed by a bounded outbound channel. The
//! state machine writes frames to the channel only; it never touches the
//! sink directly.

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, trace, warn};

use crate::protocol::{GatewayFrame, GATEWAY_VERSION};
use crate::session::SessionError;

/// Outbound channel capacity; overflow is a fatal connection error
pub const OUTBOUND_BUFFER: usize = 64;

/// Reading half of the gateway socket
pub type GatewayReader = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

type GatewaySink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, WsMessage>;

/// An upgraded gateway connection
pub struct Connection {
    /// Bounded FIFO into the writer task
    pub outbound: mpsc::Sender<GatewayFrame>,
    /// Incoming frame stream, consumed by the session task
    pub reader: GatewayReader,
    /// Writer task handle, aborted on teardown
    pub writer_task: JoinHandle<()>,
}

/// Connect to the gateway and spawn the writer task
///
/// Appends `?v=<version>&encoding=json` to the discovered URL.
///
/// # Errors
/// Returns a session error when the upgrade fails.
pub async fn connect(gateway_url: &str) -> Result<Connection, SessionError> {
    let uri = format!("{gateway_url}?v={GATEWAY_VERSION}&encoding=json");
    info!(uri = %uri, "Connecting to gateway");

    let (socket, _response) = tokio_tungstenite::connect_async(uri.as_str()).await?;
    let (sink, reader) = socket.split();

    let (outbound, outbound_rx) = mpsc::channel(OUTBOUND_BUFFER);
    let writer_task = tokio::spawn(write_outbound(sink, outbound_rx));

    Ok(Connection {
        outbound,
        reader,
        writer_task,
    })
}

/// Serialize and send frames queued on the outbound channel
async fn write_outbound(mut sink: GatewaySink, mut outbound_rx: mpsc::Receiver<GatewayFrame>) {
    while let Some(frame) = outbound_rx.recv().await {
        let json = match frame.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Dropping unserializable outbound frame");
                continue;
            }
        };
        trace!(op = %frame.op, "Sending frame");
        if sink.send(WsMessage::Text(json.into())).await.is_err() {
            debug!("Socket write failed; writer stopping");
            break;
        }
    }
    let _ = sink.close().await;
}
