//! Session state machine
//!
//! Handles every gateway input while a connection is live. The machine is
//! owned by the single session task; transitions never run concurrently.
//! Inputs that are invalid for the current state are ignored with a debug
//! log.

use std::mem;
use std::sync::Arc;
use std::time::Duration;

use discord_cache::SnapshotWriter;
use discord_common::GatewayConfig;
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use crate::api::ApiBus;
use crate::events::{Dispatcher, GatewayEvent};
use crate::protocol::{
    GatewayFrame, HelloPayload, IdentifyPayload, RequestGuildMembersPayload, ResumePayload,
};
use crate::session::data::{OutboundSender, ResumeData, SessionData};
use crate::session::error::{SessionError, SessionResult};

/// Commands driving the machine from outside the socket: the heartbeat
/// ticker, the application handle, and shutdown.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// Heartbeat ticker fired
    SendHeartbeat,
    /// Application asked for a guild's members
    RequestGuildMembers(RequestGuildMembersPayload),
    /// Terminate the session
    Shutdown,
}

/// The session state machine
pub struct SessionMachine {
    config: Arc<GatewayConfig>,
    data: SessionData,
    cache: SnapshotWriter,
    bus: ApiBus,
    /// Feeds the ticker's SendHeartbeat commands back into the owner task
    commands: mpsc::UnboundedSender<SessionCommand>,
}

impl SessionMachine {
    /// Create a machine in the Idle state
    #[must_use]
    pub fn new(
        config: Arc<GatewayConfig>,
        cache: SnapshotWriter,
        bus: ApiBus,
        commands: mpsc::UnboundedSender<SessionCommand>,
    ) -> Self {
        Self {
            config,
            data: SessionData::new(),
            cache,
            bus,
            commands,
        }
    }

    /// Current resume credentials, if any
    #[must_use]
    pub fn resume(&self) -> Option<&ResumeData> {
        self.data.resume()
    }

    /// Whether heartbeats are currently scheduled
    #[must_use]
    pub fn is_beating(&self) -> bool {
        matches!(self.data, SessionData::Beating { .. })
    }

    /// Name of the current state, for logs and assertions
    #[must_use]
    pub fn state_name(&self) -> &'static str {
        self.data.state_name()
    }

    /// Socket upgraded: attach the outbound sender, await Hello
    pub fn on_connected(&mut self, sender: OutboundSender) {
        let resume = self.take_resume();
        self.data = SessionData::Connected { sender, resume };
    }

    /// Hello received: send Resume or Identify and start heartbeating
    ///
    /// # Errors
    /// Returns an outbound error when the handshake frame cannot be sent.
    pub fn on_hello(&mut self, hello: &HelloPayload) -> SessionResult<()> {
        match mem::take(&mut self.data) {
            SessionData::Connected { sender, resume } => {
                let handshake = match &resume {
                    Some(r) => {
                        info!(session_id = %r.session_id, seq = r.last_seq, "Resuming session");
                        GatewayFrame::resume(&ResumePayload {
                            token: self.config.token.clone(),
                            session_id: r.session_id.clone(),
                            seq: r.last_seq,
                        })
                    }
                    None => {
                        info!(
                            shard = self.config.shard_num,
                            shard_total = self.config.shard_total,
                            "Identifying fresh session"
                        );
                        GatewayFrame::identify(&IdentifyPayload::from_config(&self.config))
                    }
                };

                if let Err(e) = Self::send_frame(&sender, handshake) {
                    // The connection is unusable; resume data survives
                    // for the next attempt
                    self.data = SessionData::Idle { resume };
                    return Err(e);
                }

                let heartbeat =
                    spawn_heartbeat_ticker(hello.heartbeat_interval, self.commands.clone());
                self.data = SessionData::Beating {
                    interval_ms: hello.heartbeat_interval,
                    heartbeat,
                    ack_pending: false,
                    sender,
                    resume,
                };
                Ok(())
            }
            other => {
                debug!(state = other.state_name(), "Hello ignored in this state");
                self.data = other;
                Ok(())
            }
        }
    }

    /// Dispatch received: track the sequence, apply to the cache, publish
    pub fn on_dispatch(&mut self, seq: u64, event: &GatewayEvent) {
        if let Some(resume) = self.data.resume() {
            if seq <= resume.last_seq {
                warn!(
                    seq,
                    last_seq = resume.last_seq,
                    event = %event.event_type(),
                    "Non-monotone sequence; applying anyway"
                );
            }
        }

        if let GatewayEvent::Ready(payload) = event {
            info!(session_id = %payload.session_id, guilds = payload.guilds.len(), "READY");
            self.data.set_resume(Some(ResumeData {
                token: self.config.token.clone(),
                session_id: payload.session_id.clone(),
                last_seq: seq,
            }));
        } else if let Some(resume) = self.data.resume_mut() {
            resume.last_seq = seq;
        }

        Dispatcher::apply(event, &self.cache, &self.bus);
    }

    /// HeartbeatAck received
    pub fn on_heartbeat_ack(&mut self) {
        match &mut self.data {
            SessionData::Beating { ack_pending, .. } => {
                *ack_pending = false;
                trace!("Heartbeat acknowledged");
            }
            other => debug!(state = other.state_name(), "Ack ignored in this state"),
        }
    }

    /// Heartbeat ticker fired
    ///
    /// # Errors
    /// Returns [`SessionError::HeartbeatTimeout`] when the previous beat
    /// was never acknowledged; the machine is already back in Idle with
    /// resume data preserved. Outbound errors are returned as-is.
    pub fn on_send_heartbeat(&mut self) -> SessionResult<()> {
        if matches!(
            self.data,
            SessionData::Beating {
                ack_pending: true,
                ..
            }
        ) {
            warn!("Heartbeat not acknowledged; connection considered dead");
            self.disconnect_preserving_resume();
            return Err(SessionError::HeartbeatTimeout);
        }

        match &mut self.data {
            SessionData::Beating {
                ack_pending,
                sender,
                resume,
                ..
            } => {
                let seq = resume.as_ref().map(|r| r.last_seq);
                Self::send_frame(sender, GatewayFrame::heartbeat(seq))?;
                *ack_pending = true;
                trace!(seq = ?seq, "Heartbeat sent");
                Ok(())
            }
            other => {
                debug!(state = other.state_name(), "Heartbeat tick ignored in this state");
                Ok(())
            }
        }
    }

    /// Server requested an immediate heartbeat (op 1 from the gateway)
    ///
    /// Sent without touching `ack_pending`; the periodic liveness check is
    /// unaffected.
    ///
    /// # Errors
    /// Returns an outbound error when the frame cannot be sent.
    pub fn on_server_heartbeat(&mut self) -> SessionResult<()> {
        match &self.data {
            SessionData::Beating { sender, resume, .. } => {
                let seq = resume.as_ref().map(|r| r.last_seq);
                Self::send_frame(sender, GatewayFrame::heartbeat(seq))
            }
            other => {
                debug!(state = other.state_name(), "Server heartbeat ignored in this state");
                Ok(())
            }
        }
    }

    /// Gateway asked us to reconnect
    pub fn on_reconnect(&mut self) {
        info!("Gateway requested reconnect");
        self.disconnect_preserving_resume();
    }

    /// Session invalidated: resume data is discarded, forcing a fresh
    /// Identify on the next connect
    pub fn on_invalid_session(&mut self) {
        warn!("Session invalidated; resume data cleared");
        let _ = self.take_resume();
        self.data = SessionData::Idle { resume: None };
    }

    /// Socket error or remote close
    pub fn on_socket_closed(&mut self) {
        debug!("Socket closed; returning to Idle");
        self.disconnect_preserving_resume();
    }

    /// Application asked for guild members
    ///
    /// # Errors
    /// Returns an outbound error when the frame cannot be sent.
    pub fn on_request_guild_members(
        &mut self,
        payload: &RequestGuildMembersPayload,
    ) -> SessionResult<()> {
        match &self.data {
            SessionData::Beating { sender, .. } => {
                Self::send_frame(sender, GatewayFrame::request_guild_members(payload))
            }
            other => {
                debug!(
                    state = other.state_name(),
                    guild_id = %payload.guild_id,
                    "Member request ignored in this state"
                );
                Ok(())
            }
        }
    }

    /// Terminate: cancel the ticker and drop the connection
    pub fn shutdown(&mut self) {
        info!("Session shutting down");
        self.disconnect_preserving_resume();
    }

    /// Tear the connection down, keeping resume data for the next attempt
    fn disconnect_preserving_resume(&mut self) {
        let resume = self.take_resume();
        self.data = SessionData::Idle { resume };
    }

    /// Extract resume data, aborting the heartbeat ticker and dropping
    /// the outbound sender along the way
    fn take_resume(&mut self) -> Option<ResumeData> {
        match mem::take(&mut self.data) {
            SessionData::Idle { resume } | SessionData::Connected { resume, .. } => resume,
            SessionData::Beating {
                heartbeat, resume, ..
            } => {
                heartbeat.abort();
                resume
            }
        }
    }

    fn send_frame(sender: &OutboundSender, frame: GatewayFrame) -> SessionResult<()> {
        match sender.try_send(frame) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => Err(SessionError::OutboundOverflow),
            Err(mpsc::error::TrySendError::Closed(_)) => Err(SessionError::OutboundClosed),
        }
    }
}

/// Spawn the periodic ticker emitting SendHeartbeat commands
fn spawn_heartbeat_ticker(
    interval_ms: u64,
    commands: mpsc::UnboundedSender<SessionCommand>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms.max(1)));
        // The first tick completes immediately; the beat schedule starts
        // one full interval after Hello
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if commands.send(SessionCommand::SendHeartbeat).is_err() {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::api_channel;
    use discord_cache::snapshot_channel;

    fn machine() -> (SessionMachine, mpsc::UnboundedReceiver<SessionCommand>) {
        let (writer, _reader) = snapshot_channel();
        let (bus, _api_rx) = api_channel();
        let (commands, commands_rx) = mpsc::unbounded_channel();
        let config = Arc::new(GatewayConfig::new("T"));
        (SessionMachine::new(config, writer, bus, commands), commands_rx)
    }

    #[tokio::test]
    async fn test_hello_outside_connected_is_ignored() {
        let (mut m, _rx) = machine();
        let hello = HelloPayload {
            heartbeat_interval: 45_000,
            trace: vec![],
        };
        m.on_hello(&hello).unwrap();
        assert_eq!(m.state_name(), "Idle");
        assert!(!m.is_beating());
    }

    #[tokio::test]
    async fn test_heartbeat_tick_while_idle_is_ignored() {
        let (mut m, _rx) = machine();
        m.on_send_heartbeat().unwrap();
        assert_eq!(m.state_name(), "Idle");
    }

    #[tokio::test]
    async fn test_outbound_overflow_is_fatal() {
        let (mut m, _rx) = machine();
        // Capacity-1 channel with no consumer: the second send overflows
        let (tx, _out_rx) = mpsc::channel(1);
        m.on_connected(tx);
        let hello = HelloPayload {
            heartbeat_interval: 45_000,
            trace: vec![],
        };
        m.on_hello(&hello).unwrap();

        let err = m.on_send_heartbeat().unwrap_err();
        assert!(matches!(err, SessionError::OutboundOverflow));
    }

    #[tokio::test]
    async fn test_server_heartbeat_does_not_set_ack_pending() {
        let (mut m, _rx) = machine();
        let (tx, mut out_rx) = mpsc::channel(8);
        m.on_connected(tx);
        m.on_hello(&HelloPayload {
            heartbeat_interval: 45_000,
            trace: vec![],
        })
        .unwrap();
        out_rx.recv().await.unwrap(); // Identify

        m.on_server_heartbeat().unwrap();
        out_rx.recv().await.unwrap(); // immediate heartbeat

        // The periodic beat still goes through: ack_pending was untouched
        m.on_send_heartbeat().unwrap();
        let frame = out_rx.recv().await.unwrap();
        assert_eq!(frame.op, crate::protocol::OpCode::Heartbeat);
    }
}
