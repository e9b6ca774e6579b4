mod ice;
mod participant;
mod signaling;

pub use ice::{IceCandidate, IceServerConfig};
pub use participant::{ParticipantId, ParticipantIdError};
pub use signaling::{ClientMessage, ServerMessage};
