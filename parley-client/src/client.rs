use crate::config::ClientConfig;
use crate::error::{ChannelError, MediaError};
use crate::manager::{NegotiationManager, PeerDirectory};
use crate::media::{LocalMedia, LocalMediaSnapshot, MediaCapture};
use crate::signaling::{SignalSink, SignalingChannel};
use crate::transport::{RtcTransportFactory, TransportFactory};
use parley_core::ClientMessage;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// A connected participant: relay connection, local media and one session
/// per remote member.
pub struct ParleyClient {
    media: Mutex<LocalMedia>,
    media_rx: watch::Receiver<LocalMediaSnapshot>,
    peers: PeerDirectory,
    channel: SignalingChannel,
    manager: JoinHandle<()>,
}

impl ParleyClient {
    /// Connects with webrtc transports built from `config.ice_servers`.
    pub async fn connect(config: ClientConfig, capture: Arc<dyn MediaCapture>) -> Result<Self, ChannelError> {
        let factory = Arc::new(RtcTransportFactory::new(config.ice_servers.clone()));
        Self::connect_with(config, capture, factory).await
    }

    pub async fn connect_with(
        config: ClientConfig,
        capture: Arc<dyn MediaCapture>,
        factory: Arc<dyn TransportFactory>,
    ) -> Result<Self, ChannelError> {
        let mut media = LocalMedia::new(capture, config.camera_enabled, config.microphone_enabled);
        if let Err(e) = media.start().await {
            // Joining without media is still useful: we can receive.
            warn!("Starting without local media: {}", e);
        }
        let media_rx = media.subscribe();

        let (channel, inbound) = SignalingChannel::connect(&config.server_url).await?;
        let signals = Arc::new(channel.sink());

        let manager = NegotiationManager::new(factory, signals.clone(), media_rx.clone(), inbound);
        let peers = manager.directory();
        let manager = tokio::spawn(manager.run());

        signals
            .send(ClientMessage::Join {
                name: config.display_name.clone(),
            })
            .await;
        info!(server = %config.server_url, "Join requested");

        Ok(Self {
            media: Mutex::new(media),
            media_rx,
            peers,
            channel,
            manager,
        })
    }

    pub fn peers(&self) -> PeerDirectory {
        self.peers.clone()
    }

    pub fn local_media(&self) -> watch::Receiver<LocalMediaSnapshot> {
        self.media_rx.clone()
    }

    /// Returns the new camera flag. Open sessions renegotiate on success.
    pub async fn toggle_camera(&self) -> Result<bool, MediaError> {
        self.media.lock().await.toggle_camera().await
    }

    /// Returns the new microphone flag. Open sessions renegotiate on success.
    pub async fn toggle_microphone(&self) -> Result<bool, MediaError> {
        self.media.lock().await.toggle_microphone().await
    }

    /// Leaves the room: drops the relay connection, closes every session and
    /// stops local capture.
    pub async fn shutdown(self) {
        self.channel.close();
        if let Err(e) = self.manager.await {
            warn!("Negotiation manager failed: {}", e);
        }
        self.media.lock().await.release();
        info!("Client stopped");
    }
}
