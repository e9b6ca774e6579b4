use async_trait::async_trait;
use parley_client::{LocalStream, LocalTrack, MediaCapture, MediaConstraints, MediaError, TrackKind};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Hands out numbered fake tracks and remembers which were stopped.
#[derive(Default)]
pub struct MockCapture {
    counter: AtomicUsize,
    stopped: Mutex<Vec<String>>,
    unavailable: Mutex<Option<TrackKind>>,
}

impl MockCapture {
    pub fn stopped(&self) -> Vec<String> {
        self.stopped.lock().unwrap().clone()
    }

    pub fn set_unavailable(&self, kind: Option<TrackKind>) {
        *self.unavailable.lock().unwrap() = kind;
    }
}

#[async_trait]
impl MediaCapture for MockCapture {
    async fn acquire(&self, constraints: MediaConstraints) -> Result<LocalStream, MediaError> {
        if let Some(kind) = *self.unavailable.lock().unwrap()
            && constraints.wants(kind)
        {
            return Err(MediaError::DeviceUnavailable(kind));
        }

        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let stream_id = format!("local-{n}");
        let tracks = [TrackKind::Audio, TrackKind::Video]
            .into_iter()
            .filter(|kind| constraints.wants(*kind))
            .map(|kind| LocalTrack {
                id: format!("{stream_id}-{kind:?}"),
                stream_id: stream_id.clone(),
                kind,
            })
            .collect();

        Ok(LocalStream {
            id: stream_id,
            tracks,
        })
    }

    fn stop(&self, track: &LocalTrack) {
        self.stopped.lock().unwrap().push(track.id.clone());
    }
}
