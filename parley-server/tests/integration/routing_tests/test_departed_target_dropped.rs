use parley_core::{ClientMessage, ParticipantId};

use crate::integration::{create_test_room, init_tracing};
use crate::utils::{assert_quiet, collect_deliveries, disconnect, join, send};

#[tokio::test]
async fn test_departed_target_dropped() {
    init_tracing();

    let (room_cmd_tx, mut signal_rx, signaling) = create_test_room();

    let (a, b) = (ParticipantId::new(), ParticipantId::new());
    join(&room_cmd_tx, a).await.unwrap();
    join(&room_cmd_tx, b).await.unwrap();
    collect_deliveries(&mut signal_rx, 3).await.unwrap();

    disconnect(&room_cmd_tx, b).await.unwrap();
    let before = signaling.total().await;

    for message in [
        ClientMessage::Offer {
            to: b,
            sdp: "offer".into(),
        },
        ClientMessage::Answer {
            to: b,
            sdp: "answer".into(),
        },
        ClientMessage::Call { target_id: b },
    ] {
        send(&room_cmd_tx, a, message).await.unwrap();
    }

    // Dropped without a crash and without telling the sender.
    assert_quiet(&mut signal_rx).await;
    assert_eq!(signaling.total().await, before);

    // The room is still alive.
    let c = ParticipantId::new();
    join(&room_cmd_tx, c).await.unwrap();
    collect_deliveries(&mut signal_rx, 2).await.unwrap();
}
