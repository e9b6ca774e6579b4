use async_trait::async_trait;
use parley_core::{ParticipantId, ServerMessage};

/// What the room needs from the outside world: a way to push a message to
/// one participant's channel.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Delivers `message` to `to`. A participant whose socket is already
    /// gone is logged and skipped.
    async fn deliver(&self, to: ParticipantId, message: ServerMessage);
}
