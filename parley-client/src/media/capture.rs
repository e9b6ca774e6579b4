use crate::error::MediaError;
use crate::media::{LocalStream, LocalTrack, MediaConstraints};
use async_trait::async_trait;

/// Source of local camera and microphone tracks.
///
/// `acquire` always returns a fresh stream; previously returned tracks
/// stay live until passed to `stop`.
#[async_trait]
pub trait MediaCapture: Send + Sync {
    async fn acquire(&self, constraints: MediaConstraints) -> Result<LocalStream, MediaError>;

    fn stop(&self, track: &LocalTrack);
}
