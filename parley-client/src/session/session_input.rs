use crate::transport::TransportEvent;
use parley_core::IceCandidate;

/// Everything a session reacts to, processed one at a time.
#[derive(Debug)]
pub enum SessionInput {
    StartAsCaller,
    Offer(String),
    Answer(String),
    Candidate(IceCandidate),
    Transport { round: u64, event: TransportEvent },
    Close,
}

impl SessionInput {
    pub fn name(&self) -> &'static str {
        match self {
            SessionInput::StartAsCaller => "startAsCaller",
            SessionInput::Offer(_) => "offer",
            SessionInput::Answer(_) => "answer",
            SessionInput::Candidate(_) => "candidate",
            SessionInput::Transport { .. } => "transport",
            SessionInput::Close => "close",
        }
    }

    /// Whether the input came from the relay, as opposed to a transport
    /// or the session owner.
    pub fn is_signal(&self) -> bool {
        matches!(
            self,
            SessionInput::StartAsCaller
                | SessionInput::Offer(_)
                | SessionInput::Answer(_)
                | SessionInput::Candidate(_)
        )
    }
}
