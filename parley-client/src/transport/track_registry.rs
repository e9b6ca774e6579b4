use crate::media::{LocalTrack, TrackKind};
use dashmap::DashMap;
use std::sync::Arc;
use webrtc::api::media_engine::{MIME_TYPE_OPUS, MIME_TYPE_VP8};
use webrtc::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

/// Shared sample tracks, one per local track id. Every transport publishing
/// the same local track writes from the same sample source.
#[derive(Clone, Default)]
pub struct TrackRegistry {
    tracks: Arc<DashMap<String, Arc<TrackLocalStaticSample>>>,
}

impl TrackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&self, track: &LocalTrack) -> Arc<TrackLocalStaticSample> {
        self.tracks
            .entry(track.id.clone())
            .or_insert_with(|| {
                Arc::new(TrackLocalStaticSample::new(
                    codec_for(track.kind),
                    track.id.clone(),
                    track.stream_id.clone(),
                ))
            })
            .value()
            .clone()
    }

    /// Where a capture pipeline writes its samples.
    pub fn get(&self, track_id: &str) -> Option<Arc<TrackLocalStaticSample>> {
        self.tracks.get(track_id).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, track_id: &str) {
        self.tracks.remove(track_id);
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

fn codec_for(kind: TrackKind) -> RTCRtpCodecCapability {
    match kind {
        TrackKind::Audio => RTCRtpCodecCapability {
            mime_type: MIME_TYPE_OPUS.to_owned(),
            clock_rate: 48000,
            channels: 2,
            ..Default::default()
        },
        TrackKind::Video => RTCRtpCodecCapability {
            mime_type: MIME_TYPE_VP8.to_owned(),
            clock_rate: 90000,
            ..Default::default()
        },
    }
}
