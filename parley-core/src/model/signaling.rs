use crate::model::ice::IceCandidate;
use crate::model::participant::ParticipantId;
use serde::{Deserialize, Serialize};

/// Events a client sends to the relay. The sender id is implied by the
/// connection the frame arrives on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "op",
    content = "d",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ClientMessage {
    Join {
        #[serde(default)]
        name: Option<String>,
    },
    Call {
        target_id: ParticipantId,
    },
    Offer {
        to: ParticipantId,
        sdp: String,
    },
    Answer {
        to: ParticipantId,
        sdp: String,
    },
    Candidate {
        payload: IceCandidate,
    },
}

/// Events the relay delivers to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "op",
    content = "d",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ServerMessage {
    JoinSuccess {
        self_id: ParticipantId,
        member_ids: Vec<ParticipantId>,
    },
    NewMember {
        member_id: ParticipantId,
    },
    /// Obligation to start an offer towards `target_id`.
    BeginOffer {
        target_id: ParticipantId,
    },
    IncomingOffer {
        from: ParticipantId,
        sdp: String,
    },
    IncomingAnswer {
        from: ParticipantId,
        sdp: String,
    },
    IncomingCandidate {
        from: ParticipantId,
        payload: IceCandidate,
    },
}

impl ClientMessage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Call { .. } => "call",
            Self::Offer { .. } => "offer",
            Self::Answer { .. } => "answer",
            Self::Candidate { .. } => "candidate",
        }
    }
}
