use crate::config::HeartbeatConfig;
use crate::room::RoomCommand;
use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use parley_core::{ParticipantId, ServerMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, warn};

struct SignalingInner {
    peers: DashMap<ParticipantId, mpsc::UnboundedSender<Message>>,
    heartbeat: HeartbeatConfig,
}

/// Registry of open signaling sockets plus the handle into the room task.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
    pub(crate) room_cmd_tx: mpsc::Sender<RoomCommand>,
}

impl SignalingService {
    pub fn new(room_cmd_tx: mpsc::Sender<RoomCommand>, heartbeat: HeartbeatConfig) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                peers: DashMap::new(),
                heartbeat,
            }),
            room_cmd_tx,
        }
    }

    pub fn heartbeat(&self) -> HeartbeatConfig {
        self.inner.heartbeat
    }

    pub fn add_peer(&self, participant_id: ParticipantId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.peers.insert(participant_id, tx);
    }

    pub fn remove_peer(&self, participant_id: &ParticipantId) {
        self.inner.peers.remove(participant_id);
    }

    pub fn connected(&self) -> usize {
        self.inner.peers.len()
    }

    /// Hands a command to the room task. Returns `false` once the room has
    /// shut down.
    pub async fn submit(&self, cmd: RoomCommand) -> bool {
        self.room_cmd_tx.send(cmd).await.is_ok()
    }

    pub fn send_signal(&self, participant_id: ParticipantId, msg: &ServerMessage) {
        let Some(peer) = self.inner.peers.get(&participant_id) else {
            warn!(
                %participant_id,
                "Attempted to send signal to disconnected participant"
            );
            return;
        };

        match serde_json::to_string(msg) {
            Ok(json) => {
                if let Err(e) = peer.send(Message::Text(json.into())) {
                    error!(%participant_id, "Failed to send WS message: {:?}", e);
                }
            }
            Err(e) => error!("Failed to serialize signal message: {}", e),
        }
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn deliver(&self, to: ParticipantId, message: ServerMessage) {
        self.send_signal(to, &message);
    }
}
