use axum::http::header::InvalidHeaderValue;
use parley_core::ParticipantId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("participant {0} has already joined")]
    AlreadyMember(ParticipantId),
}

/// Reasons the router refuses to forward a message. None of these are sent
/// back to the sender; the room logs them and moves on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("sender {0} has not joined the room")]
    SenderNotMember(ParticipantId),

    #[error("target {0} is not in the room")]
    TargetNotMember(ParticipantId),

    #[error("call needs at least two members, room has {0}")]
    NotEnoughMembers(usize),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ping interval must be greater than zero")]
    ZeroPingInterval,

    #[error("invalid allowed origin `{origin}`")]
    InvalidOrigin {
        origin: String,
        #[source]
        source: InvalidHeaderValue,
    },
}
