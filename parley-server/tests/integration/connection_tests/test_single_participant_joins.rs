use parley_core::{ParticipantId, ServerMessage};

use crate::integration::{create_test_room, init_tracing};
use crate::utils::{assert_quiet, join, list_members, next_delivery};

#[tokio::test]
async fn test_single_participant_joins() {
    init_tracing();

    let (room_cmd_tx, mut signal_rx, _signaling) = create_test_room();

    let a = ParticipantId::new();
    join(&room_cmd_tx, a).await.expect("join failed");

    let delivery = next_delivery(&mut signal_rx).await.expect("no joinSuccess");
    assert_eq!(delivery.to, a);
    assert_eq!(
        delivery.message,
        ServerMessage::JoinSuccess {
            self_id: a,
            member_ids: vec![],
        }
    );
    assert_quiet(&mut signal_rx).await;

    assert_eq!(list_members(&room_cmd_tx).await.unwrap(), vec![a]);
}
