//! Session data
//!
//! The discriminated payload carried through the session lifecycle, plus
//! the resume credentials that survive reconnects.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::protocol::GatewayFrame;

/// Sending half of the bounded outbound channel
pub type OutboundSender = mpsc::Sender<GatewayFrame>;

/// Credentials for resuming a session without replaying history
///
/// Exists from READY until the session ends; `last_seq` advances on every
/// dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeData {
    pub token: String,
    pub session_id: String,
    pub last_seq: u64,
}

/// Discriminated session state payload
#[derive(Debug)]
pub enum SessionData {
    /// Not connected; resume data survives here between attempts
    Idle { resume: Option<ResumeData> },

    /// Socket upgraded, awaiting Hello
    Connected {
        sender: OutboundSender,
        resume: Option<ResumeData>,
    },

    /// Hello processed, Identify/Resume sent, heartbeats scheduled
    Beating {
        interval_ms: u64,
        /// Ticker task feeding SendHeartbeat commands; aborted on teardown
        heartbeat: JoinHandle<()>,
        /// True while a heartbeat awaits its ack
        ack_pending: bool,
        sender: OutboundSender,
        resume: Option<ResumeData>,
    },
}

impl SessionData {
    /// Fresh session with no resume history
    #[must_use]
    pub fn new() -> Self {
        Self::Idle { resume: None }
    }

    /// Name of the current variant, for logs
    #[must_use]
    pub fn state_name(&self) -> &'static str {
        match self {
            Self::Idle { .. } => "Idle",
            Self::Connected { .. } => "Connected",
            Self::Beating { .. } => "Beating",
        }
    }

    /// The resume data in any variant
    #[must_use]
    pub fn resume(&self) -> Option<&ResumeData> {
        match self {
            Self::Idle { resume } | Self::Connected { resume, .. } | Self::Beating { resume, .. } => {
                resume.as_ref()
            }
        }
    }

    /// Mutable access to the resume data
    pub fn resume_mut(&mut self) -> Option<&mut ResumeData> {
        match self {
            Self::Idle { resume } | Self::Connected { resume, .. } | Self::Beating { resume, .. } => {
                resume.as_mut()
            }
        }
    }

    /// Replace the resume data in place
    pub fn set_resume(&mut self, data: Option<ResumeData>) {
        match self {
            Self::Idle { resume } | Self::Connected { resume, .. } | Self::Beating { resume, .. } => {
                *resume = data;
            }
        }
    }
}

impl Default for SessionData {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_names() {
        assert_eq!(SessionData::new().state_name(), "Idle");

        let (tx, _rx) = mpsc::channel(1);
        let connected = SessionData::Connected {
            sender: tx,
            resume: None,
        };
        assert_eq!(connected.state_name(), "Connected");
    }

    #[test]
    fn test_resume_accessors() {
        let mut data = SessionData::new();
        assert!(data.resume().is_none());

        data.set_resume(Some(ResumeData {
            token: "T".to_string(),
            session_id: "S".to_string(),
            last_seq: 1,
        }));
        assert_eq!(data.resume().unwrap().last_seq, 1);

        data.resume_mut().unwrap().last_seq = 2;
        assert_eq!(data.resume().unwrap().last_seq, 2);
    }
}
