use parley_core::{ClientMessage, ParticipantId};
use tokio::sync::oneshot;

/// Inputs to the room task, fed by the signaling service.
#[derive(Debug)]
pub enum RoomCommand {
    /// A parsed frame from a participant's socket.
    Signal {
        participant_id: ParticipantId,
        message: ClientMessage,
    },

    /// The socket closed or stopped answering pings.
    Disconnect { participant_id: ParticipantId },

    /// Snapshot of current member ids, in join order.
    ListMembers {
        reply: oneshot::Sender<Vec<ParticipantId>>,
    },
}
