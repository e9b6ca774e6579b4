use crate::session::{
    PeerSession, RemoteStream, SessionContext, SessionFlow, SessionInput, SessionStatus,
};
use parley_core::ParticipantId;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Sent to the manager when a session task ends.
///
/// `unprocessed` holds the inputs that were still queued when the session
/// stopped, in arrival order.
#[derive(Debug)]
pub struct SessionClosed {
    pub remote_id: ParticipantId,
    pub generation: u64,
    pub unprocessed: Vec<SessionInput>,
}

/// Owner side of a running session task.
pub struct SessionHandle {
    remote_id: ParticipantId,
    generation: u64,
    inputs: mpsc::UnboundedSender<SessionInput>,
    status: watch::Receiver<SessionStatus>,
    remote_stream: RemoteStream,
    task: JoinHandle<()>,
}

impl SessionHandle {
    pub fn spawn(
        remote_id: ParticipantId,
        generation: u64,
        ctx: SessionContext,
        closed_tx: mpsc::UnboundedSender<SessionClosed>,
    ) -> Self {
        let (inputs, inputs_rx) = mpsc::unbounded_channel();
        let (session, status, remote_stream) = PeerSession::new(remote_id, ctx, inputs.clone());

        let task = tokio::spawn(async move {
            let unprocessed = run(session, inputs_rx).await;
            let _ = closed_tx.send(SessionClosed {
                remote_id,
                generation,
                unprocessed,
            });
        });

        Self {
            remote_id,
            generation,
            inputs,
            status,
            remote_stream,
            task,
        }
    }

    pub fn remote_id(&self) -> ParticipantId {
        self.remote_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Queues `input`, handing it back if the session has stopped.
    pub fn send(&self, input: SessionInput) -> Result<(), SessionInput> {
        self.inputs.send(input).map_err(|rejected| rejected.0)
    }

    pub fn status(&self) -> SessionStatus {
        *self.status.borrow()
    }

    pub fn status_receiver(&self) -> watch::Receiver<SessionStatus> {
        self.status.clone()
    }

    pub fn remote_stream(&self) -> RemoteStream {
        self.remote_stream.clone()
    }

    /// Asks the session to close and waits for its task to finish.
    pub async fn close(mut self) {
        let _ = self.inputs.send(SessionInput::Close);
        if let Err(e) = (&mut self.task).await {
            warn!(remote_id = %self.remote_id, "Session task failed: {}", e);
        }
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        let _ = self.inputs.send(SessionInput::Close);
    }
}

async fn run(
    mut session: PeerSession,
    mut inputs: mpsc::UnboundedReceiver<SessionInput>,
) -> Vec<SessionInput> {
    let remote_id = session.remote_id();

    while let Some(input) = inputs.recv().await {
        let op = input.name();
        debug!(%remote_id, op, "Session input");

        let flow = match input {
            SessionInput::StartAsCaller => session.start_as_caller().await.map(|_| SessionFlow::Continue),
            SessionInput::Offer(sdp) => session.accept_offer(sdp).await.map(|_| SessionFlow::Continue),
            SessionInput::Answer(sdp) => session.accept_answer(sdp).await.map(|_| SessionFlow::Continue),
            SessionInput::Candidate(candidate) => session
                .add_remote_candidate(candidate)
                .await
                .map(|_| SessionFlow::Continue),
            SessionInput::Transport { round, event } => {
                Ok(session.handle_transport_event(round, event).await)
            }
            SessionInput::Close => Ok(SessionFlow::Close),
        };

        match flow {
            Ok(SessionFlow::Continue) => {}
            Ok(SessionFlow::Close) => break,
            Err(e) => warn!(%remote_id, op, state = ?session.state(), "Negotiation step failed: {}", e),
        }
    }

    // Later sends fail and are kept by the manager instead.
    inputs.close();
    let mut unprocessed = Vec::new();
    while let Ok(input) = inputs.try_recv() {
        unprocessed.push(input);
    }
    if !unprocessed.is_empty() {
        debug!(%remote_id, count = unprocessed.len(), "Inputs left unprocessed");
    }

    session.close().await;
    unprocessed
}
