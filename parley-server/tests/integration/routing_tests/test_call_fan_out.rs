use parley_core::{ClientMessage, ParticipantId, ServerMessage};

use crate::integration::{create_test_room, init_tracing};
use crate::utils::{assert_quiet, collect_deliveries, join, send};

#[tokio::test]
async fn test_call_fan_out() {
    init_tracing();

    let (room_cmd_tx, mut signal_rx, signaling) = create_test_room();

    let ids: Vec<ParticipantId> = (0..4).map(|_| ParticipantId::new()).collect();
    for id in &ids {
        join(&room_cmd_tx, *id).await.unwrap();
    }
    collect_deliveries(&mut signal_rx, 1 + 2 + 3 + 4).await.unwrap();

    let target = ids[3];
    send(&room_cmd_tx, target, ClientMessage::Call { target_id: target })
        .await
        .unwrap();

    let deliveries = collect_deliveries(&mut signal_rx, 3).await.unwrap();
    for (delivery, expected_to) in deliveries.iter().zip(&ids[..3]) {
        assert_eq!(&delivery.to, expected_to);
        assert_eq!(
            delivery.message,
            ServerMessage::BeginOffer { target_id: target }
        );
    }
    assert_quiet(&mut signal_rx).await;

    // The target itself gets no obligation.
    assert!(
        !signaling
            .messages_for(&target)
            .await
            .iter()
            .any(|m| matches!(m, ServerMessage::BeginOffer { .. }))
    );
}
