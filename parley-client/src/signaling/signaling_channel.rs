use crate::error::ChannelError;
use crate::signaling::ChannelSignalSink;
use futures::{SinkExt, StreamExt};
use parley_core::ServerMessage;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

/// WebSocket connection to the relay, split into a writer task draining a
/// [`ChannelSignalSink`] and a reader task decoding server messages.
pub struct SignalingChannel {
    sink: ChannelSignalSink,
    writer: JoinHandle<()>,
    reader: JoinHandle<()>,
}

impl SignalingChannel {
    pub async fn connect(
        url: &str,
    ) -> Result<(Self, mpsc::UnboundedReceiver<ServerMessage>), ChannelError> {
        let (ws_stream, _) = connect_async(url).await.map_err(ChannelError::Connect)?;
        info!(url, "Connected to signaling server");

        let (mut ws_write, mut ws_read) = ws_stream.split();
        let (sink, mut outbound) = ChannelSignalSink::new();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();

        let writer = tokio::spawn(async move {
            while let Some(message) = outbound.recv().await {
                let text = match serde_json::to_string(&message) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!("Failed to encode {}: {}", message.name(), e);
                        continue;
                    }
                };
                debug!(op = message.name(), "outbound");
                if let Err(e) = ws_write.send(Message::Text(text.into())).await {
                    warn!("Signaling write failed: {}", e);
                    break;
                }
            }
            let _ = ws_write.close().await;
        });

        let reader = tokio::spawn(async move {
            while let Some(frame) = ws_read.next().await {
                match frame {
                    Ok(Message::Text(text)) => match serde_json::from_str::<ServerMessage>(&text) {
                        Ok(message) => {
                            if inbound_tx.send(message).is_err() {
                                break;
                            }
                        }
                        Err(e) => warn!("Invalid server message: {:?}", e),
                    },
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(e) => {
                        warn!("Signaling read failed: {}", e);
                        break;
                    }
                }
            }
            info!("Signaling connection closed");
        });

        Ok((
            Self {
                sink,
                writer,
                reader,
            },
            inbound_rx,
        ))
    }

    pub fn sink(&self) -> ChannelSignalSink {
        self.sink.clone()
    }

    /// Stops both socket tasks. The inbound receiver then yields `None`.
    pub fn close(&self) {
        self.reader.abort();
        self.writer.abort();
    }
}
