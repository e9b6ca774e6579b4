use crate::session::{NegotiationState, RemoteStream, Role, SessionStatus};
use dashmap::DashMap;
use parley_core::ParticipantId;
use std::sync::Arc;
use tokio::sync::watch;

/// Read-only window onto one session.
#[derive(Debug, Clone)]
pub struct PeerView {
    remote_id: ParticipantId,
    status: watch::Receiver<SessionStatus>,
    remote_stream: RemoteStream,
}

impl PeerView {
    pub(crate) fn new(
        remote_id: ParticipantId,
        status: watch::Receiver<SessionStatus>,
        remote_stream: RemoteStream,
    ) -> Self {
        Self {
            remote_id,
            status,
            remote_stream,
        }
    }

    pub fn remote_id(&self) -> ParticipantId {
        self.remote_id
    }

    pub fn status(&self) -> SessionStatus {
        *self.status.borrow()
    }

    pub fn state(&self) -> NegotiationState {
        self.status().state
    }

    pub fn role(&self) -> Option<Role> {
        self.status().role
    }

    /// False while no transport backs the session, including after a failed
    /// renegotiation that left an earlier state in place.
    pub fn has_transport(&self) -> bool {
        self.status().transport_open
    }

    pub fn remote_stream(&self) -> RemoteStream {
        self.remote_stream.clone()
    }

    /// Resolves with the first status matching `predicate`, or `None` if the
    /// session ends without ever reaching one.
    pub async fn wait_for<F>(&self, mut predicate: F) -> Option<SessionStatus>
    where
        F: FnMut(&SessionStatus) -> bool,
    {
        let mut rx = self.status.clone();
        rx.wait_for(|status| predicate(status))
            .await
            .ok()
            .map(|status| *status)
    }
}

/// Every session the manager currently holds, keyed by remote participant.
#[derive(Clone)]
pub struct PeerDirectory {
    inner: Arc<DirectoryInner>,
}

struct DirectoryInner {
    local_id: watch::Sender<Option<ParticipantId>>,
    peers: DashMap<ParticipantId, PeerView>,
}

impl Default for PeerDirectory {
    fn default() -> Self {
        let (local_id, _) = watch::channel(None);
        Self {
            inner: Arc::new(DirectoryInner {
                local_id,
                peers: DashMap::new(),
            }),
        }
    }
}

impl PeerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the relay assigned us, once joined.
    pub fn local_id(&self) -> Option<ParticipantId> {
        *self.inner.local_id.borrow()
    }

    pub async fn joined(&self) -> Option<ParticipantId> {
        let mut rx = self.inner.local_id.subscribe();
        rx.wait_for(Option::is_some).await.ok().and_then(|id| *id)
    }

    pub fn get(&self, remote_id: &ParticipantId) -> Option<PeerView> {
        self.inner.peers.get(remote_id).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, remote_id: &ParticipantId) -> bool {
        self.inner.peers.contains_key(remote_id)
    }

    /// Sorted, so callers get a stable order.
    pub fn remote_ids(&self) -> Vec<ParticipantId> {
        let mut ids: Vec<_> = self.inner.peers.iter().map(|entry| *entry.key()).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.inner.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.peers.is_empty()
    }

    pub(crate) fn set_local_id(&self, id: ParticipantId) {
        self.inner.local_id.send_replace(Some(id));
    }

    pub(crate) fn insert(&self, view: PeerView) {
        self.inner.peers.insert(view.remote_id(), view);
    }

    pub(crate) fn remove(&self, remote_id: &ParticipantId) {
        self.inner.peers.remove(remote_id);
    }
}
