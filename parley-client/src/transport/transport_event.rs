use crate::media::RemoteTrack;
use crate::session::SessionInput;
use parley_core::{IceCandidate, ParticipantId};
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    New,
    Connecting,
    Connected,
    Disconnected,
    Failed,
    Closed,
}

impl TransportState {
    /// The remote side is gone for good.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransportState::Failed | TransportState::Closed)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    CandidateGathered(IceCandidate),
    TrackAdded(RemoteTrack),
    StateChanged(TransportState),
}

/// Handed to a transport at creation; everything it reports goes through
/// here. Events are stamped with the negotiation round the transport was
/// opened for, so a session drops whatever a retired transport still says.
#[derive(Debug, Clone)]
pub struct TransportEvents {
    remote_id: ParticipantId,
    round: u64,
    tx: mpsc::UnboundedSender<SessionInput>,
}

impl TransportEvents {
    pub(crate) fn new(remote_id: ParticipantId, round: u64, tx: mpsc::UnboundedSender<SessionInput>) -> Self {
        Self { remote_id, round, tx }
    }

    pub fn remote_id(&self) -> ParticipantId {
        self.remote_id
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    /// Returns false once the owning session has ended.
    pub fn emit(&self, event: TransportEvent) -> bool {
        self.tx
            .send(SessionInput::Transport {
                round: self.round,
                event,
            })
            .is_ok()
    }
}
