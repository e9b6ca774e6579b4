use crate::{RoomCommand, SignalingService};
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use parley_core::{ClientMessage, ParticipantId};
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<SignalingService>,
) -> impl IntoResponse {
    // The channel, not the client, names the participant.
    let participant_id = ParticipantId::new();

    ws.on_upgrade(move |socket| handle_socket(socket, participant_id, service))
}

async fn handle_socket(socket: WebSocket, participant_id: ParticipantId, service: SignalingService) {
    info!(%participant_id, "connect");

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    service.add_peer(participant_id, tx.clone());

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let service = service.clone();
        let heartbeat = service.heartbeat();

        async move {
            let mut ticker = time::interval(heartbeat.ping_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last_seen = Instant::now();

            loop {
                tokio::select! {
                    frame = receiver.next() => {
                        let Some(Ok(msg)) = frame else { break };
                        last_seen = Instant::now();

                        match msg {
                            Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                                Ok(message) => {
                                    debug!(%participant_id, op = message.name(), "inbound");
                                    let cmd = RoomCommand::Signal { participant_id, message };
                                    if !service.submit(cmd).await {
                                        error!("Room died, closing {}", participant_id);
                                        break;
                                    }
                                }
                                Err(e) => warn!(%participant_id, "Invalid client message: {:?}", e),
                            },
                            Message::Close(_) => break,
                            _ => {}
                        }
                    }

                    _ = ticker.tick() => {
                        if last_seen.elapsed() > heartbeat.deadline() {
                            warn!(%participant_id, "Ping timeout");
                            break;
                        }
                        if tx.send(Message::Ping(Bytes::new())).is_err() {
                            break;
                        }
                    }
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    service.remove_peer(&participant_id);
    let _ = service
        .submit(RoomCommand::Disconnect { participant_id })
        .await;
    info!(%participant_id, "WebSocket disconnected");
}
