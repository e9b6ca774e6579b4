use crate::error::RouteError;
use crate::room::directory::RoomDirectory;
use crate::room::room_command::RoomCommand;
use crate::room::router::SignalingRouter;
use crate::signaling::SignalingOutput;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Owns the directory and processes commands one at a time, so membership
/// never needs a lock.
pub struct Room {
    router: SignalingRouter,
    command_rx: mpsc::Receiver<RoomCommand>,
    signaling: Arc<dyn SignalingOutput>,
}

impl Room {
    pub fn new(
        directory: RoomDirectory,
        command_rx: mpsc::Receiver<RoomCommand>,
        signaling: Arc<dyn SignalingOutput>,
    ) -> Self {
        Self {
            router: SignalingRouter::new(directory),
            command_rx,
            signaling,
        }
    }

    pub async fn run(mut self) {
        info!("Room event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }

        info!("Command channel closed. Room event loop finished");
    }

    async fn handle_command(&mut self, cmd: RoomCommand) {
        match cmd {
            RoomCommand::Signal {
                participant_id,
                message,
            } => {
                let op = message.name();
                match self.router.route(participant_id, message) {
                    Ok(deliveries) => {
                        for delivery in deliveries {
                            self.signaling
                                .deliver(delivery.to, delivery.message)
                                .await;
                        }
                    }
                    Err(RouteError::TargetNotMember(target)) => {
                        warn!(from = %participant_id, %target, "Dropping {op}: target is not in the room");
                    }
                    Err(e) => warn!(from = %participant_id, "Dropping {op}: {e}"),
                }
            }

            RoomCommand::Disconnect { participant_id } => {
                if self.router.disconnect(&participant_id).is_some() {
                    info!(%participant_id, members = self.router.directory().len(), "Participant removed");
                }
            }

            RoomCommand::ListMembers { reply } => {
                let _ = reply.send(self.router.directory().member_ids());
            }
        }
    }
}
