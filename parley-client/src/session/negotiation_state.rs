/// The async step a session is blocked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingStep {
    CreateOffer,
    ApplyOffer,
    CreateAnswer,
    ApplyAnswer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NegotiationState {
    #[default]
    Idle,
    Awaiting(PendingStep),
    OfferCreated,
    OfferReceived,
    AnswerExchanged,
    Connected,
    Closed,
}

impl NegotiationState {
    /// A round has started and the session has not been torn down.
    pub fn is_active(&self) -> bool {
        !matches!(self, NegotiationState::Idle | NegotiationState::Closed)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, NegotiationState::Closed)
    }
}

/// Which side of the current round this client plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Caller,
    Callee,
}

/// Published by every session on each transition.
///
/// A failed renegotiation puts `state` and `role` back to what they were
/// before the round, but the previous transport is already gone by then.
/// `transport_open` tells the two apart: a `Connected` session without a
/// transport has no media flowing until the next round succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStatus {
    pub state: NegotiationState,
    pub role: Option<Role>,
    /// Increments each time a new transport is opened.
    pub round: u64,
    pub transport_open: bool,
}
