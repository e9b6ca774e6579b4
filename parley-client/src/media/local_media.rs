use crate::error::MediaError;
use crate::media::{LocalStream, LocalTrack, MediaCapture, MediaConstraints, TrackKind};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

/// What the rest of the client sees of local media.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocalMediaSnapshot {
    pub camera_enabled: bool,
    pub microphone_enabled: bool,
    pub stream: Option<LocalStream>,
}

impl LocalMediaSnapshot {
    /// Tracks to attach to an outgoing transport.
    pub fn live_tracks(&self) -> Vec<LocalTrack> {
        let Some(stream) = &self.stream else {
            return Vec::new();
        };

        stream
            .tracks
            .iter()
            .filter(|track| match track.kind {
                TrackKind::Audio => self.microphone_enabled,
                TrackKind::Video => self.camera_enabled,
            })
            .cloned()
            .collect()
    }
}

pub struct LocalMedia {
    capture: Arc<dyn MediaCapture>,
    camera_enabled: bool,
    microphone_enabled: bool,
    stream: Option<LocalStream>,
    publisher: watch::Sender<LocalMediaSnapshot>,
}

impl LocalMedia {
    pub fn new(capture: Arc<dyn MediaCapture>, camera_enabled: bool, microphone_enabled: bool) -> Self {
        let (publisher, _) = watch::channel(LocalMediaSnapshot {
            camera_enabled,
            microphone_enabled,
            stream: None,
        });

        Self {
            capture,
            camera_enabled,
            microphone_enabled,
            stream: None,
            publisher,
        }
    }

    /// Every change to the flags or the stream is published here.
    pub fn subscribe(&self) -> watch::Receiver<LocalMediaSnapshot> {
        self.publisher.subscribe()
    }

    pub fn snapshot(&self) -> LocalMediaSnapshot {
        LocalMediaSnapshot {
            camera_enabled: self.camera_enabled,
            microphone_enabled: self.microphone_enabled,
            stream: self.stream.clone(),
        }
    }

    pub fn camera_enabled(&self) -> bool {
        self.camera_enabled
    }

    pub fn microphone_enabled(&self) -> bool {
        self.microphone_enabled
    }

    /// Captures whatever the current flags ask for. A no-op when both are off.
    pub async fn start(&mut self) -> Result<(), MediaError> {
        let constraints = self.constraints();
        if constraints.is_empty() {
            return Ok(());
        }

        let stream = self.capture.acquire(constraints).await?;
        self.replace_stream(stream);
        self.publish();
        Ok(())
    }

    /// Returns the new camera flag.
    pub async fn toggle_camera(&mut self) -> Result<bool, MediaError> {
        self.toggle(TrackKind::Video).await
    }

    /// Returns the new microphone flag.
    pub async fn toggle_microphone(&mut self) -> Result<bool, MediaError> {
        self.toggle(TrackKind::Audio).await
    }

    /// Stops every track and forgets the stream. Flags are kept.
    pub fn release(&mut self) {
        if let Some(stream) = self.stream.take() {
            for track in &stream.tracks {
                self.capture.stop(track);
            }
            self.publish();
        }
    }

    async fn toggle(&mut self, kind: TrackKind) -> Result<bool, MediaError> {
        if self.enabled(kind) {
            self.set_enabled(kind, false);

            if let Some(stream) = &mut self.stream {
                for track in stream.tracks.iter().filter(|t| t.kind == kind) {
                    self.capture.stop(track);
                }
                stream.tracks.retain(|t| t.kind != kind);
            }

            info!(?kind, "capture off");
            self.publish();
            return Ok(false);
        }

        let mut constraints = self.constraints();
        match kind {
            TrackKind::Audio => constraints.audio = true,
            TrackKind::Video => constraints.video = true,
        }

        // The flag only flips once the device actually delivered.
        let stream = match self.capture.acquire(constraints).await {
            Ok(stream) => stream,
            Err(e) => {
                warn!(?kind, "capture failed: {}", e);
                return Err(e);
            }
        };

        self.set_enabled(kind, true);
        self.replace_stream(stream);

        info!(?kind, "capture on");
        self.publish();
        Ok(true)
    }

    fn replace_stream(&mut self, stream: LocalStream) {
        if let Some(old) = self.stream.take() {
            for track in old.tracks.iter().filter(|t| !stream.tracks.contains(t)) {
                self.capture.stop(track);
            }
        }
        self.stream = Some(stream);
    }

    fn constraints(&self) -> MediaConstraints {
        MediaConstraints {
            video: self.camera_enabled,
            audio: self.microphone_enabled,
        }
    }

    fn enabled(&self, kind: TrackKind) -> bool {
        match kind {
            TrackKind::Audio => self.microphone_enabled,
            TrackKind::Video => self.camera_enabled,
        }
    }

    fn set_enabled(&mut self, kind: TrackKind, enabled: bool) {
        match kind {
            TrackKind::Audio => self.microphone_enabled = enabled,
            TrackKind::Video => self.camera_enabled = enabled,
        }
    }

    fn publish(&self) {
        self.publisher.send_replace(self.snapshot());
    }
}
