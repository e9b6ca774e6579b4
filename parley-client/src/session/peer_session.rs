use crate::error::{NegotiationError, TransportError};
use crate::media::{LocalMediaSnapshot, RemoteTrack};
use crate::session::{
    NegotiationState, PendingStep, RemoteStream, Role, SessionInput, SessionStatus,
};
use crate::signaling::SignalSink;
use crate::transport::{
    PeerTransport, SessionDescription, TransportEvent, TransportEvents, TransportFactory,
    TransportState,
};
use parley_core::{ClientMessage, IceCandidate, ParticipantId};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Collaborators shared by every session of one client.
#[derive(Clone)]
pub struct SessionContext {
    pub factory: Arc<dyn TransportFactory>,
    pub signals: Arc<dyn SignalSink>,
    pub media: watch::Receiver<LocalMediaSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFlow {
    Continue,
    Close,
}

struct ActiveTransport {
    round: u64,
    handle: Box<dyn PeerTransport>,
}

/// Negotiation with one remote participant.
///
/// At most one transport is open at a time. Every new round (our own offer
/// or the peer's) closes the previous transport before opening the next.
pub struct PeerSession {
    remote_id: ParticipantId,
    ctx: SessionContext,
    inputs: mpsc::UnboundedSender<SessionInput>,
    current: SessionStatus,
    status: watch::Sender<SessionStatus>,
    remote_tracks: watch::Sender<Vec<RemoteTrack>>,
    transport: Option<ActiveTransport>,
    remote_description_set: bool,
    transport_connected: bool,
    // Candidates that arrived before a remote description could take them.
    pending_candidates: Vec<IceCandidate>,
}

impl PeerSession {
    pub fn new(
        remote_id: ParticipantId,
        ctx: SessionContext,
        inputs: mpsc::UnboundedSender<SessionInput>,
    ) -> (Self, watch::Receiver<SessionStatus>, RemoteStream) {
        let (status, status_rx) = watch::channel(SessionStatus::default());
        let (remote_tracks, remote_stream) = RemoteStream::channel();

        let session = Self {
            remote_id,
            ctx,
            inputs,
            current: SessionStatus::default(),
            status,
            remote_tracks,
            transport: None,
            remote_description_set: false,
            transport_connected: false,
            pending_candidates: Vec::new(),
        };

        (session, status_rx, remote_stream)
    }

    pub fn remote_id(&self) -> ParticipantId {
        self.remote_id
    }

    pub fn state(&self) -> NegotiationState {
        self.current.state
    }

    pub async fn start_as_caller(&mut self) -> Result<(), NegotiationError> {
        let prior = self.current;
        self.begin_round(Role::Caller).await;
        self.set_state(NegotiationState::Awaiting(PendingStep::CreateOffer));

        match self.create_offer().await {
            Ok(sdp) => {
                self.ctx
                    .signals
                    .send(ClientMessage::Offer {
                        to: self.remote_id,
                        sdp,
                    })
                    .await;
                self.set_state(NegotiationState::OfferCreated);
                Ok(())
            }
            Err(e) => {
                self.abandon_round(prior).await;
                Err(e)
            }
        }
    }

    /// An incoming offer always wins: whatever round we had in flight is
    /// dropped and we answer theirs.
    pub async fn accept_offer(&mut self, sdp: String) -> Result<(), NegotiationError> {
        let prior = self.current;
        if self.transport.is_some() {
            info!(remote_id = %self.remote_id, state = ?prior.state, "Yielding to incoming offer");
        }

        self.begin_round(Role::Callee).await;
        self.set_state(NegotiationState::Awaiting(PendingStep::ApplyOffer));

        if let Err(e) = self.apply_offer(sdp).await {
            self.abandon_round(prior).await;
            return Err(e);
        }
        self.set_state(NegotiationState::OfferReceived);
        self.set_state(NegotiationState::Awaiting(PendingStep::CreateAnswer));

        match self.create_answer().await {
            Ok(sdp) => {
                self.ctx
                    .signals
                    .send(ClientMessage::Answer {
                        to: self.remote_id,
                        sdp,
                    })
                    .await;
                self.settle_answered();
                Ok(())
            }
            Err(e) => {
                self.abandon_round(prior).await;
                Err(e)
            }
        }
    }

    pub async fn accept_answer(&mut self, sdp: String) -> Result<(), NegotiationError> {
        if self.current.state != NegotiationState::OfferCreated {
            return Err(NegotiationError::UnexpectedAnswer {
                from: self.remote_id,
                state: self.current.state,
            });
        }

        self.set_state(NegotiationState::Awaiting(PendingStep::ApplyAnswer));

        match self.apply_answer(sdp).await {
            Ok(()) => {
                self.settle_answered();
                Ok(())
            }
            Err(e) => {
                self.set_state(NegotiationState::OfferCreated);
                Err(e)
            }
        }
    }

    pub async fn add_remote_candidate(&mut self, candidate: IceCandidate) -> Result<(), NegotiationError> {
        match &self.transport {
            Some(active) if self.remote_description_set => {
                active.handle.add_ice_candidate(candidate).await?;
            }
            _ => {
                debug!(remote_id = %self.remote_id, "Queued early candidate");
                self.pending_candidates.push(candidate);
            }
        }
        Ok(())
    }

    pub async fn handle_transport_event(&mut self, round: u64, event: TransportEvent) -> SessionFlow {
        if self.transport.as_ref().is_none_or(|active| active.round != round) {
            debug!(remote_id = %self.remote_id, round, "Dropping event from retired transport");
            return SessionFlow::Continue;
        }

        match event {
            TransportEvent::CandidateGathered(mut candidate) => {
                candidate.target = Some(self.remote_id);
                self.ctx
                    .signals
                    .send(ClientMessage::Candidate { payload: candidate })
                    .await;
            }
            TransportEvent::TrackAdded(track) => {
                self.remote_tracks.send_if_modified(|tracks| {
                    if tracks.iter().any(|t| t.id == track.id) {
                        return false;
                    }
                    tracks.push(track);
                    true
                });
            }
            TransportEvent::StateChanged(TransportState::Connected) => {
                self.transport_connected = true;
                if self.current.state == NegotiationState::AnswerExchanged {
                    self.set_state(NegotiationState::Connected);
                }
            }
            TransportEvent::StateChanged(state) if state.is_terminal() => {
                info!(remote_id = %self.remote_id, ?state, "Transport lost");
                return SessionFlow::Close;
            }
            TransportEvent::StateChanged(_) => {}
        }

        SessionFlow::Continue
    }

    /// Tears down the transport and discards the remote stream.
    pub async fn close(&mut self) {
        if self.current.state.is_closed() {
            return;
        }

        self.retire_transport().await;
        self.pending_candidates.clear();
        self.remote_tracks.send_replace(Vec::new());
        self.set_state(NegotiationState::Closed);
        info!(remote_id = %self.remote_id, "Session closed");
    }

    async fn create_offer(&mut self) -> Result<String, NegotiationError> {
        self.open_transport().await?;

        let transport = self.transport()?;
        let offer = transport.create_offer(true).await?;
        let sdp = offer.sdp.clone();
        transport.set_local_description(offer).await?;
        Ok(sdp)
    }

    async fn apply_offer(&mut self, sdp: String) -> Result<(), NegotiationError> {
        self.open_transport().await?;

        self.transport()?
            .set_remote_description(SessionDescription::offer(sdp))
            .await?;
        self.remote_description_set = true;
        self.flush_candidates().await;
        Ok(())
    }

    async fn create_answer(&mut self) -> Result<String, NegotiationError> {
        let transport = self.transport()?;
        let answer = transport.create_answer().await?;
        let sdp = answer.sdp.clone();
        transport.set_local_description(answer).await?;
        Ok(sdp)
    }

    async fn apply_answer(&mut self, sdp: String) -> Result<(), NegotiationError> {
        self.transport()?
            .set_remote_description(SessionDescription::answer(sdp))
            .await?;
        self.remote_description_set = true;
        self.flush_candidates().await;
        Ok(())
    }

    async fn flush_candidates(&mut self) {
        let pending = std::mem::take(&mut self.pending_candidates);
        let Some(active) = &self.transport else {
            return;
        };

        for candidate in pending {
            if let Err(e) = active.handle.add_ice_candidate(candidate).await {
                warn!(remote_id = %self.remote_id, "Queued candidate rejected: {}", e);
            }
        }
    }

    async fn open_transport(&mut self) -> Result<(), NegotiationError> {
        let round = self.current.round;
        let events = TransportEvents::new(self.remote_id, round, self.inputs.clone());
        let handle = self.ctx.factory.create(events).await?;
        self.transport = Some(ActiveTransport { round, handle });
        self.set_transport_open(true);

        let tracks = self.ctx.media.borrow().live_tracks();
        let transport = self.transport()?;
        for track in &tracks {
            transport.add_track(track).await?;
        }
        Ok(())
    }

    fn transport(&self) -> Result<&dyn PeerTransport, TransportError> {
        self.transport
            .as_ref()
            .map(|active| active.handle.as_ref())
            .ok_or(TransportError::NotOpen)
    }

    async fn begin_round(&mut self, role: Role) {
        self.retire_transport().await;

        self.current.round += 1;
        self.current.role = Some(role);
        self.remote_description_set = false;
        self.transport_connected = false;
        // Queued candidates are kept: the peer may trickle ahead of its offer.
        self.remote_tracks.send_replace(Vec::new());
    }

    /// Drops a half-built round, leaving the session as it was before.
    async fn abandon_round(&mut self, prior: SessionStatus) {
        self.retire_transport().await;
        self.remote_description_set = false;
        self.current.role = prior.role;
        self.set_state(prior.state);
    }

    async fn retire_transport(&mut self) {
        if let Some(active) = self.transport.take() {
            self.set_transport_open(false);
            if let Err(e) = active.handle.close().await {
                warn!(remote_id = %self.remote_id, round = active.round, "Transport close failed: {}", e);
            }
        }
    }

    fn settle_answered(&mut self) {
        if self.transport_connected {
            self.set_state(NegotiationState::Connected);
        } else {
            self.set_state(NegotiationState::AnswerExchanged);
        }
    }

    fn set_transport_open(&mut self, open: bool) {
        self.current.transport_open = open;
        self.status.send_replace(self.current);
    }

    fn set_state(&mut self, state: NegotiationState) {
        self.current.state = state;
        self.status.send_replace(self.current);
        debug!(remote_id = %self.remote_id, ?state, "Negotiation state");
    }
}
