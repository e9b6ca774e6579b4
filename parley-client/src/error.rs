use crate::media::TrackKind;
use crate::session::NegotiationState;
use parley_core::ParticipantId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Rtc(#[from] webrtc::Error),

    #[error("transport rejected the operation: {0}")]
    Rejected(String),

    #[error("no transport is open for this session")]
    NotOpen,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("no capture device available for {0:?}")]
    DeviceUnavailable(TrackKind),

    #[error("capture failed: {0}")]
    Capture(String),
}

#[derive(Debug, Error)]
pub enum NegotiationError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// An answer for a round that is no longer ours, typically after
    /// yielding to the peer's own offer.
    #[error("answer from {from} arrived while {state:?}")]
    UnexpectedAnswer {
        from: ParticipantId,
        state: NegotiationState,
    },
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("failed to connect to signaling server")]
    Connect(#[source] tokio_tungstenite::tungstenite::Error),
}
