use async_trait::async_trait;
use parley::model::IceCandidate;
use parley_client::{
    LocalStream, LocalTrack, MediaCapture, MediaConstraints, MediaError, PeerTransport,
    SessionDescription, TrackKind, TransportError, TransportEvents, TransportFactory,
};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A transport that agrees to everything and never reports anything.
struct NullTransport {
    label: String,
}

#[async_trait]
impl PeerTransport for NullTransport {
    async fn add_track(&self, _track: &LocalTrack) -> Result<(), TransportError> {
        Ok(())
    }

    async fn create_offer(&self, _ice_restart: bool) -> Result<SessionDescription, TransportError> {
        Ok(SessionDescription::offer(format!("offer {}", self.label)))
    }

    async fn create_answer(&self) -> Result<SessionDescription, TransportError> {
        Ok(SessionDescription::answer(format!("answer {}", self.label)))
    }

    async fn set_local_description(&self, _description: SessionDescription) -> Result<(), TransportError> {
        Ok(())
    }

    async fn set_remote_description(&self, _description: SessionDescription) -> Result<(), TransportError> {
        Ok(())
    }

    async fn add_ice_candidate(&self, _candidate: IceCandidate) -> Result<(), TransportError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), TransportError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct NullTransportFactory;

#[async_trait]
impl TransportFactory for NullTransportFactory {
    async fn create(&self, events: TransportEvents) -> Result<Box<dyn PeerTransport>, TransportError> {
        Ok(Box::new(NullTransport {
            label: format!("{}#{}", events.remote_id(), events.round()),
        }))
    }
}

#[derive(Default)]
pub struct FakeCapture {
    counter: AtomicUsize,
}

#[async_trait]
impl MediaCapture for FakeCapture {
    async fn acquire(&self, constraints: MediaConstraints) -> Result<LocalStream, MediaError> {
        let id = format!("cam-{}", self.counter.fetch_add(1, Ordering::SeqCst));
        let tracks = [TrackKind::Audio, TrackKind::Video]
            .into_iter()
            .filter(|kind| constraints.wants(*kind))
            .map(|kind| LocalTrack {
                id: format!("{id}/{kind:?}"),
                stream_id: id.clone(),
                kind,
            })
            .collect();
        Ok(LocalStream { id, tracks })
    }

    fn stop(&self, _track: &LocalTrack) {}
}
