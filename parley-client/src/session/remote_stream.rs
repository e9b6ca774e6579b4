use crate::media::RemoteTrack;
use tokio::sync::watch;

/// Read side of the tracks a remote participant sends us.
///
/// Once the session ends the stream is discarded: its track list is emptied
/// and `is_discarded` turns true.
#[derive(Debug, Clone)]
pub struct RemoteStream {
    rx: watch::Receiver<Vec<RemoteTrack>>,
}

impl RemoteStream {
    pub(crate) fn channel() -> (watch::Sender<Vec<RemoteTrack>>, Self) {
        let (tx, rx) = watch::channel(Vec::new());
        (tx, Self { rx })
    }

    pub fn tracks(&self) -> Vec<RemoteTrack> {
        self.rx.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.borrow().is_empty()
    }

    pub fn is_discarded(&self) -> bool {
        self.rx.has_changed().is_err()
    }

    /// Waits for the track list to change. Returns false once discarded.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}
