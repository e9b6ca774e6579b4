use crate::error::RouteError;
use crate::room::directory::RoomDirectory;
use crate::room::member_store::Participant;
use parley_core::{ClientMessage, ParticipantId, ServerMessage};

/// One outbound message produced by routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub to: ParticipantId,
    pub message: ServerMessage,
}

impl Delivery {
    fn new(to: ParticipantId, message: ServerMessage) -> Self {
        Self { to, message }
    }
}

/// Relay logic on top of the directory. Routes by id only; offer, answer
/// and candidate payloads pass through untouched.
pub struct SignalingRouter {
    directory: RoomDirectory,
}

impl SignalingRouter {
    pub fn new(directory: RoomDirectory) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &RoomDirectory {
        &self.directory
    }

    pub fn route(
        &mut self,
        from: ParticipantId,
        message: ClientMessage,
    ) -> Result<Vec<Delivery>, RouteError> {
        if !matches!(message, ClientMessage::Join { .. }) && !self.directory.contains(&from) {
            return Err(RouteError::SenderNotMember(from));
        }

        match message {
            ClientMessage::Join { name } => self.join(from, name),

            ClientMessage::Call { target_id } => {
                let members = self.directory.len();
                if members < 2 {
                    return Err(RouteError::NotEnoughMembers(members));
                }
                self.ensure_member(target_id)?;

                Ok(self
                    .directory
                    .others(&target_id)
                    .into_iter()
                    .map(|member| Delivery::new(member, ServerMessage::BeginOffer { target_id }))
                    .collect())
            }

            ClientMessage::Offer { to, sdp } => {
                self.ensure_member(to)?;
                Ok(vec![Delivery::new(
                    to,
                    ServerMessage::IncomingOffer { from, sdp },
                )])
            }

            ClientMessage::Answer { to, sdp } => {
                self.ensure_member(to)?;
                Ok(vec![Delivery::new(
                    to,
                    ServerMessage::IncomingAnswer { from, sdp },
                )])
            }

            ClientMessage::Candidate { payload } => Ok(self
                .directory
                .others(&from)
                .into_iter()
                .map(|member| {
                    Delivery::new(
                        member,
                        ServerMessage::IncomingCandidate {
                            from,
                            payload: payload.clone(),
                        },
                    )
                })
                .collect()),
        }
    }

    fn join(
        &mut self,
        from: ParticipantId,
        name: Option<String>,
    ) -> Result<Vec<Delivery>, RouteError> {
        let existing = self.directory.join(from, name)?;

        let mut deliveries = Vec::with_capacity(existing.len() + 1);
        for member in &existing {
            deliveries.push(Delivery::new(
                *member,
                ServerMessage::NewMember { member_id: from },
            ));
        }
        deliveries.push(Delivery::new(
            from,
            ServerMessage::JoinSuccess {
                self_id: from,
                member_ids: existing,
            },
        ));
        Ok(deliveries)
    }

    /// Channel-level disconnect. Nobody is told; peers find out when their
    /// transport to `id` fails.
    pub fn disconnect(&mut self, id: &ParticipantId) -> Option<Participant> {
        self.directory.leave(id)
    }

    fn ensure_member(&self, id: ParticipantId) -> Result<(), RouteError> {
        if self.directory.contains(&id) {
            Ok(())
        } else {
            Err(RouteError::TargetNotMember(id))
        }
    }
}
