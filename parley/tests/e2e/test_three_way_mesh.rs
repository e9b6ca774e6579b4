use parley_client::{NegotiationState, Role, SessionStatus};

use crate::e2e::init_tracing;
use crate::utils::{join, start_relay, wait_status};

fn answered(role: Role) -> impl FnMut(&SessionStatus) -> bool {
    move |s: &SessionStatus| s.state == NegotiationState::AnswerExchanged && s.role == Some(role)
}

/// Three clients over a real relay end up fully meshed: every earlier
/// member offers to each newcomer.
#[tokio::test]
async fn test_three_way_mesh() {
    init_tracing();

    let url = start_relay().await.unwrap();

    let (alice, a) = join(&url, "alice").await.unwrap();
    let (bob, b) = join(&url, "bob").await.unwrap();

    wait_status(&alice, b, answered(Role::Caller)).await.unwrap();
    wait_status(&bob, a, answered(Role::Callee)).await.unwrap();

    let (carol, c) = join(&url, "carol").await.unwrap();

    wait_status(&alice, c, answered(Role::Caller)).await.unwrap();
    wait_status(&bob, c, answered(Role::Caller)).await.unwrap();
    wait_status(&carol, a, answered(Role::Callee)).await.unwrap();
    wait_status(&carol, b, answered(Role::Callee)).await.unwrap();

    assert_eq!(carol.peers().remote_ids().len(), 2);
    assert_eq!(alice.peers().remote_ids().len(), 2);

    // Carol turns her camera off and becomes the caller towards both.
    assert!(!carol.toggle_camera().await.unwrap());
    assert!(!carol.local_media().borrow().camera_enabled);

    for remote in [a, b] {
        let status = wait_status(&carol, remote, |s| {
            s.round == 2 && s.state == NegotiationState::AnswerExchanged
        })
        .await
        .unwrap();
        assert_eq!(status.role, Some(Role::Caller));
    }
    wait_status(&alice, c, |s| s.round == 2 && s.role == Some(Role::Callee))
        .await
        .unwrap();

    for client in [alice, bob, carol] {
        client.shutdown().await;
    }
}
