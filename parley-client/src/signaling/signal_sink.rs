use async_trait::async_trait;
use parley_core::ClientMessage;
use tokio::sync::mpsc;
use tracing::warn;

/// Outbound half of the relay connection.
#[async_trait]
pub trait SignalSink: Send + Sync {
    async fn send(&self, message: ClientMessage);
}

/// Queues messages for whatever drains the paired receiver.
#[derive(Debug, Clone)]
pub struct ChannelSignalSink {
    tx: mpsc::UnboundedSender<ClientMessage>,
}

impl ChannelSignalSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ClientMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn from_sender(tx: mpsc::UnboundedSender<ClientMessage>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl SignalSink for ChannelSignalSink {
    async fn send(&self, message: ClientMessage) {
        let op = message.name();
        if self.tx.send(message).is_err() {
            warn!(op, "Signaling channel closed, dropping message");
        }
    }
}
