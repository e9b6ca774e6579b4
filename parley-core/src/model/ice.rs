use crate::model::participant::ParticipantId;
use crate::utils::DEFAULT_STUN_SERVERS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

impl IceServerConfig {
    /// The public STUN list, as a single server entry.
    pub fn default_stun() -> Self {
        Self {
            urls: DEFAULT_STUN_SERVERS.iter().map(|s| s.to_string()).collect(),
            username: None,
            credential: None,
        }
    }
}

/// Network-path candidate as carried inside `candidate` / `incomingCandidate`.
///
/// The relay never looks inside; `target` names the participant whose
/// connection the candidate was gathered for, so receivers that are not
/// the target can ignore it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidate {
    pub candidate: String,
    #[serde(default)]
    pub sdp_mid: Option<String>,
    #[serde(default)]
    pub sdp_m_line_index: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ParticipantId>,
}

impl IceCandidate {
    pub fn is_for(&self, participant: &ParticipantId) -> bool {
        self.target.as_ref().is_none_or(|target| target == participant)
    }
}
