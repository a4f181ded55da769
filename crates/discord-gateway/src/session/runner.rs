//! Session runner
//!
//! Owns the reconnect loop: gateway discovery, WebSocket upgrade, and the
//! single task multiplexing incoming frames with session commands. All
//! machine transitions happen on this task.

use std::sync::Arc;
use std::time::Duration;

use discord_cache::{snapshot_channel, SnapshotReader};
use discord_common::GatewayConfig;
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, info, trace, warn};

use crate::api::{api_channel, ApiReceiver};
use crate::connection::{self, GatewayReader};
use crate::events::GatewayEvent;
use crate::protocol::{GatewayFrame, OpCode, RequestGuildMembersPayload};
use crate::rest;
use crate::session::error::{SessionError, SessionResult};
use crate::session::machine::{SessionCommand, SessionMachine};

/// Base delay between reconnect attempts; grows linearly with the attempt
/// count
const RECONNECT_DELAY_MS: u64 = 1_000;

/// Upper bound on the backoff delay
const MAX_BACKOFF_MS: u64 = 30_000;

/// Why the active connection ended
enum ActiveEnd {
    /// Reconnectable: socket died, gateway said reconnect, session
    /// invalidated, or heartbeats went unanswered
    Transient,
    /// Shutdown was requested; the session is over
    Shutdown,
}

/// Handle for talking to a running session from the application
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<SessionCommand>,
}

impl SessionHandle {
    /// Ask the gateway to stream a guild's members
    ///
    /// Returns false when the session has already terminated.
    pub fn request_guild_members(&self, payload: RequestGuildMembersPayload) -> bool {
        self.commands
            .send(SessionCommand::RequestGuildMembers(payload))
            .is_ok()
    }

    /// Request session termination; wins over any in-flight transition
    pub fn shutdown(&self) {
        let _ = self.commands.send(SessionCommand::Shutdown);
    }
}

/// The gateway client: one session, one task
pub struct GatewayClient {
    config: Arc<GatewayConfig>,
    http: reqwest::Client,
    machine: SessionMachine,
    commands_tx: mpsc::UnboundedSender<SessionCommand>,
    commands_rx: mpsc::UnboundedReceiver<SessionCommand>,
    snapshots: SnapshotReader,
    shutdown: bool,
    attempts: u32,
}

impl GatewayClient {
    /// Create a client and the API message receiver for the application
    #[must_use]
    pub fn new(config: GatewayConfig) -> (Self, ApiReceiver) {
        let config = Arc::new(config);
        let (cache_writer, snapshots) = snapshot_channel();
        let (bus, api_rx) = api_channel();
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();

        let machine = SessionMachine::new(
            Arc::clone(&config),
            cache_writer,
            bus,
            commands_tx.clone(),
        );

        let client = Self {
            config,
            http: reqwest::Client::new(),
            machine,
            commands_tx,
            commands_rx,
            snapshots,
            shutdown: false,
            attempts: 0,
        };
        (client, api_rx)
    }

    /// Reader over published cache snapshots
    #[must_use]
    pub fn snapshots(&self) -> SnapshotReader {
        self.snapshots.clone()
    }

    /// Handle for requests and shutdown
    #[must_use]
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            commands: self.commands_tx.clone(),
        }
    }

    /// Drive the session until shutdown or reconnect exhaustion
    ///
    /// # Errors
    /// Returns [`SessionError::ReconnectsExhausted`] when the attempt
    /// budget is spent.
    pub async fn run(mut self) -> SessionResult<()> {
        loop {
            self.drain_pending_commands();
            if self.shutdown {
                self.machine.shutdown();
                return Ok(());
            }
            if self.attempts >= self.config.max_reconnect_attempts {
                warn!(attempts = self.attempts, "Reconnect budget exhausted");
                return Err(SessionError::ReconnectsExhausted {
                    attempts: self.attempts,
                });
            }

            self.attempts += 1;
            if self.attempts > 1 {
                let delay = backoff_delay(self.attempts);
                debug!(
                    attempt = self.attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "Backing off"
                );
                tokio::time::sleep(delay).await;
                // Shutdown is observed when the suspension resumes
                self.drain_pending_commands();
                if self.shutdown {
                    self.machine.shutdown();
                    return Ok(());
                }
            }

            let url = match rest::fetch_gateway_url(
                &self.http,
                &self.config.rest_base_url,
                &self.config.token,
            )
            .await
            {
                Ok(url) => url,
                Err(e) => {
                    warn!(error = %e, attempt = self.attempts, "Gateway discovery failed");
                    continue;
                }
            };
            // A fresh URL resets the attempt budget
            self.attempts = 0;
            info!(url = %url, "Gateway URL received");

            let conn = match connection::connect(&url).await {
                Ok(conn) => conn,
                Err(e) => {
                    warn!(error = %e, "WebSocket upgrade failed");
                    continue;
                }
            };

            self.machine.on_connected(conn.outbound.clone());
            let end = self.run_active(conn.reader).await;
            conn.writer_task.abort();

            match end {
                ActiveEnd::Shutdown => {
                    self.machine.shutdown();
                    return Ok(());
                }
                ActiveEnd::Transient => {
                    info!(
                        resumable = self.machine.resume().is_some(),
                        "Connection ended; reconnecting"
                    );
                }
            }
        }
    }

    /// Multiplex incoming frames with session commands until the
    /// connection ends
    async fn run_active(&mut self, mut reader: GatewayReader) -> ActiveEnd {
        loop {
            tokio::select! {
                incoming = reader.next() => match incoming {
                    Some(Ok(WsMessage::Text(text))) => {
                        if let Some(end) = self.handle_text(text.as_ref()) {
                            return end;
                        }
                    }
                    Some(Ok(WsMessage::Binary(_))) => {
                        debug!("Binary frame dropped; json encoding expected");
                    }
                    Some(Ok(WsMessage::Ping(_) | WsMessage::Pong(_))) => {
                        trace!("WebSocket keepalive frame");
                    }
                    Some(Ok(WsMessage::Close(frame))) => {
                        info!(frame = ?frame, "Gateway closed the connection");
                        self.machine.on_socket_closed();
                        return ActiveEnd::Transient;
                    }
                    Some(Ok(WsMessage::Frame(_))) => {
                        debug!("Raw frame dropped");
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "WebSocket read error");
                        self.machine.on_socket_closed();
                        return ActiveEnd::Transient;
                    }
                    None => {
                        info!("Gateway stream ended");
                        self.machine.on_socket_closed();
                        return ActiveEnd::Transient;
                    }
                },
                command = self.commands_rx.recv() => match command {
                    Some(SessionCommand::SendHeartbeat) => {
                        match self.machine.on_send_heartbeat() {
                            Ok(()) => {}
                            Err(SessionError::HeartbeatTimeout) => {
                                // Machine is already Idle with resume kept
                                return ActiveEnd::Transient;
                            }
                            Err(e) => {
                                warn!(error = %e, "Heartbeat send failed");
                                self.machine.on_socket_closed();
                                return ActiveEnd::Transient;
                            }
                        }
                    }
                    Some(SessionCommand::RequestGuildMembers(payload)) => {
                        if let Err(e) = self.machine.on_request_guild_members(&payload) {
                            warn!(error = %e, "Member request send failed");
                            self.machine.on_socket_closed();
                            return ActiveEnd::Transient;
                        }
                    }
                    Some(SessionCommand::Shutdown) | None => {
                        return ActiveEnd::Shutdown;
                    }
                },
            }
        }
    }

    /// Decode and route one text frame
    ///
    /// Returns `Some` when the frame ends the active connection.
    fn handle_text(&mut self, text: &str) -> Option<ActiveEnd> {
        let frame = match GatewayFrame::from_json(text) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(error = %e, "Dropping undecodable frame");
                return None;
            }
        };
        trace!(op = %frame.op, "Frame received");

        match frame.op {
            OpCode::Dispatch => {
                let (seq, name, data) = match frame.dispatch_fields() {
                    Ok(fields) => fields,
                    Err(e) => {
                        warn!(error = %e, "Dropping malformed dispatch");
                        return None;
                    }
                };
                match GatewayEvent::decode(name, data) {
                    Ok(event) => self.machine.on_dispatch(seq, &event),
                    Err(e) => {
                        warn!(event = %name, seq, error = %e, "Dropping undecodable dispatch");
                    }
                }
                None
            }
            OpCode::Hello => {
                let hello = match frame.as_hello() {
                    Ok(hello) => hello,
                    Err(e) => {
                        warn!(error = %e, "Dropping malformed Hello");
                        return None;
                    }
                };
                match self.machine.on_hello(&hello) {
                    Ok(()) => None,
                    Err(e) => {
                        warn!(error = %e, "Handshake send failed");
                        self.machine.on_socket_closed();
                        Some(ActiveEnd::Transient)
                    }
                }
            }
            OpCode::HeartbeatAck => {
                self.machine.on_heartbeat_ack();
                None
            }
            OpCode::Heartbeat => match self.machine.on_server_heartbeat() {
                Ok(()) => None,
                Err(e) => {
                    warn!(error = %e, "Requested heartbeat send failed");
                    self.machine.on_socket_closed();
                    Some(ActiveEnd::Transient)
                }
            },
            OpCode::Reconnect => {
                self.machine.on_reconnect();
                Some(ActiveEnd::Transient)
            }
            OpCode::InvalidSession => {
                self.machine.on_invalid_session();
                Some(ActiveEnd::Transient)
            }
            other => {
                warn!(op = %other, "Client-only opcode received from gateway; dropped");
                None
            }
        }
    }

    /// Observe queued commands between connection attempts; shutdown wins
    fn drain_pending_commands(&mut self) {
        while let Ok(command) = self.commands_rx.try_recv() {
            match command {
                SessionCommand::Shutdown => self.shutdown = true,
                SessionCommand::SendHeartbeat => {
                    // Stale tick from a torn-down connection
                }
                SessionCommand::RequestGuildMembers(payload) => {
                    debug!(guild_id = %payload.guild_id, "Member request while disconnected; dropped");
                }
            }
        }
    }
}

/// Linear backoff, capped
fn backoff_delay(attempt: u32) -> Duration {
    let millis = u64::from(attempt).saturating_mul(RECONNECT_DELAY_MS);
    Duration::from_millis(millis.min(MAX_BACKOFF_MS))
}
