use crate::manager::{PeerDirectory, PeerView};
use crate::media::LocalMediaSnapshot;
use crate::session::{SessionClosed, SessionContext, SessionHandle, SessionInput};
use crate::signaling::SignalSink;
use crate::transport::TransportFactory;
use parley_core::{ClientMessage, ParticipantId, ServerMessage};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Owns one session per remote participant and feeds them relay traffic.
///
/// Runs as a single task: relay messages, local media changes and session
/// shutdowns are handled one at a time, so the session map needs no lock.
pub struct NegotiationManager {
    ctx: SessionContext,
    inbound: mpsc::UnboundedReceiver<ServerMessage>,
    media: watch::Receiver<LocalMediaSnapshot>,
    directory: PeerDirectory,
    local_id: Option<ParticipantId>,
    sessions: HashMap<ParticipantId, SessionHandle>,
    /// Signals that reached a session after it stopped, replayed once its
    /// shutdown notice arrives.
    stranded: HashMap<ParticipantId, Vec<SessionInput>>,
    closed_tx: mpsc::UnboundedSender<SessionClosed>,
    closed_rx: mpsc::UnboundedReceiver<SessionClosed>,
    next_generation: u64,
}

impl NegotiationManager {
    pub fn new(
        factory: Arc<dyn TransportFactory>,
        signals: Arc<dyn SignalSink>,
        media: watch::Receiver<LocalMediaSnapshot>,
        inbound: mpsc::UnboundedReceiver<ServerMessage>,
    ) -> Self {
        let (closed_tx, closed_rx) = mpsc::unbounded_channel();

        let mut changes = media.clone();
        // Only changes after startup trigger renegotiation.
        changes.mark_unchanged();

        Self {
            ctx: SessionContext {
                factory,
                signals,
                media,
            },
            inbound,
            media: changes,
            directory: PeerDirectory::new(),
            local_id: None,
            sessions: HashMap::new(),
            stranded: HashMap::new(),
            closed_tx,
            closed_rx,
            next_generation: 0,
        }
    }

    pub fn directory(&self) -> PeerDirectory {
        self.directory.clone()
    }

    /// Runs until the signaling channel closes, then closes every session.
    pub async fn run(mut self) {
        info!("Negotiation manager started");
        let mut media_alive = true;

        loop {
            tokio::select! {
                message = self.inbound.recv() => match message {
                    Some(message) => self.handle_server_message(message).await,
                    None => {
                        info!("Signaling channel closed");
                        break;
                    }
                },

                changed = self.media.changed(), if media_alive => match changed {
                    Ok(()) => {
                        self.media.mark_unchanged();
                        self.renegotiate_all();
                    }
                    Err(_) => media_alive = false,
                },

                Some(closed) = self.closed_rx.recv() => self.forget(closed),
            }
        }

        self.shutdown().await;
    }

    async fn handle_server_message(&mut self, message: ServerMessage) {
        match message {
            ServerMessage::JoinSuccess { self_id, member_ids } => {
                info!(%self_id, members = member_ids.len(), "Joined room");
                self.local_id = Some(self_id);
                self.directory.set_local_id(self_id);

                for member_id in member_ids {
                    self.ensure_session(member_id);
                }

                // Everyone already present offers to us.
                self.ctx
                    .signals
                    .send(ClientMessage::Call { target_id: self_id })
                    .await;
            }
            ServerMessage::NewMember { member_id } => {
                info!(%member_id, "Member joined");
                self.ensure_session(member_id);
            }
            ServerMessage::BeginOffer { target_id } => {
                self.dispatch(target_id, SessionInput::StartAsCaller);
            }
            ServerMessage::IncomingOffer { from, sdp } => {
                self.dispatch(from, SessionInput::Offer(sdp));
            }
            ServerMessage::IncomingAnswer { from, sdp } => {
                self.dispatch(from, SessionInput::Answer(sdp));
            }
            ServerMessage::IncomingCandidate { from, payload } => {
                if let Some(local_id) = self.local_id
                    && !payload.is_for(&local_id)
                {
                    debug!(%from, "Ignoring candidate meant for another member");
                    return;
                }
                self.dispatch(from, SessionInput::Candidate(payload));
            }
        }
    }

    fn dispatch(&mut self, remote_id: ParticipantId, input: SessionInput) {
        if self.local_id == Some(remote_id) {
            warn!(op = input.name(), "Ignoring signal addressed from ourselves");
            return;
        }

        let op = input.name();
        if let Err(input) = self.ensure_session(remote_id).send(input) {
            debug!(%remote_id, op, "Session stopping, holding signal");
            self.stranded.entry(remote_id).or_default().push(input);
        }
    }

    fn ensure_session(&mut self, remote_id: ParticipantId) -> &SessionHandle {
        if !self.sessions.contains_key(&remote_id) {
            self.next_generation += 1;
            let handle = SessionHandle::spawn(
                remote_id,
                self.next_generation,
                self.ctx.clone(),
                self.closed_tx.clone(),
            );
            self.directory.insert(PeerView::new(
                remote_id,
                handle.status_receiver(),
                handle.remote_stream(),
            ));
            self.sessions.insert(remote_id, handle);
            debug!(%remote_id, "Session placeholder created");
        }

        &self.sessions[&remote_id]
    }

    fn renegotiate_all(&self) {
        for handle in self.sessions.values() {
            if handle.status().state.is_active() {
                debug!(remote_id = %handle.remote_id(), "Renegotiating after media change");
                let _ = handle.send(SessionInput::StartAsCaller);
            }
        }
    }

    fn forget(&mut self, closed: SessionClosed) {
        let SessionClosed {
            remote_id,
            generation,
            unprocessed,
        } = closed;

        let current = self
            .sessions
            .get(&remote_id)
            .is_some_and(|handle| handle.generation() == generation);
        if !current {
            return;
        }

        self.sessions.remove(&remote_id);
        self.directory.remove(&remote_id);
        info!(%remote_id, "Session removed");

        // Transport events belong to the stopped session's rounds.
        let mut replay: Vec<SessionInput> = unprocessed
            .into_iter()
            .filter(SessionInput::is_signal)
            .collect();
        replay.extend(self.stranded.remove(&remote_id).unwrap_or_default());
        if replay.is_empty() {
            return;
        }

        info!(%remote_id, count = replay.len(), "Replaying signals on a fresh session");
        for input in replay {
            self.dispatch(remote_id, input);
        }
    }

    async fn shutdown(&mut self) {
        for (remote_id, handle) in self.sessions.drain() {
            handle.close().await;
            self.directory.remove(&remote_id);
        }
        self.stranded.clear();
        info!("Negotiation manager stopped");
    }
}
