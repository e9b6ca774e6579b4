use parley_client::{NegotiationState, Role, TrackKind};
use parley_core::{ClientMessage, ParticipantId, ServerMessage};

use crate::integration::{establish_as_caller, init_tracing};
use crate::utils::TestClient;

/// Only sessions that have negotiated at least once are renegotiated.
#[tokio::test]
async fn test_toggle_renegotiates_active_sessions() {
    init_tracing();

    let mut client = TestClient::start().await;
    let (a, b, c) = (ParticipantId::new(), ParticipantId::new(), ParticipantId::new());
    client.join(c, vec![a, b]).await.unwrap();

    client.deliver(ServerMessage::IncomingOffer {
        from: a,
        sdp: "offer-a".into(),
    });
    let ClientMessage::Answer { .. } = client.next_outbound().await.unwrap() else {
        panic!("Expected an answer");
    };
    client
        .wait_status(a, |s| s.state == NegotiationState::AnswerExchanged)
        .await
        .unwrap();

    assert!(!client.media.toggle_camera().await.unwrap());

    assert_eq!(
        client.next_outbound().await.unwrap(),
        ClientMessage::Offer {
            to: a,
            sdp: format!("offer-{a}-2"),
        }
    );
    let status = client
        .wait_status(a, |s| s.round == 2 && s.state == NegotiationState::OfferCreated)
        .await
        .unwrap();
    assert_eq!(status.role, Some(Role::Caller));
    assert_eq!(
        client.factory.latest_for(a).unwrap().added_kinds(),
        vec![TrackKind::Audio]
    );

    client.assert_quiet().await;
    assert_eq!(client.wait_peer(b).await.unwrap().state(), NegotiationState::Idle);
    assert!(client.factory.transports_for(b).is_empty());
    assert_eq!(client.factory.overlaps(), 0);
}

#[tokio::test]
async fn test_microphone_off_then_on_restores_tracks() {
    init_tracing();

    let mut client = TestClient::start().await;
    let (a, b) = (ParticipantId::new(), ParticipantId::new());
    client.join(a, vec![]).await.unwrap();
    client.deliver(ServerMessage::NewMember { member_id: b });
    establish_as_caller(&mut client, b).await.unwrap();
    let initial = client.factory.latest_for(b).unwrap().added_kinds();

    assert!(!client.media.toggle_microphone().await.unwrap());
    let ClientMessage::Offer { .. } = client.next_outbound().await.unwrap() else {
        panic!("Expected a renegotiation offer");
    };
    assert_eq!(
        client.factory.latest_for(b).unwrap().added_kinds(),
        vec![TrackKind::Video]
    );
    assert_eq!(client.capture.stopped(), vec!["local-0-Audio".to_string()]);

    client.deliver(ServerMessage::IncomingAnswer {
        from: b,
        sdp: "answer-2".into(),
    });
    client
        .wait_status(b, |s| s.round == 2 && s.state == NegotiationState::AnswerExchanged)
        .await
        .unwrap();

    assert!(client.media.toggle_microphone().await.unwrap());
    assert_eq!(
        client.next_outbound().await.unwrap(),
        ClientMessage::Offer {
            to: b,
            sdp: format!("offer-{b}-3"),
        }
    );

    assert_eq!(client.factory.latest_for(b).unwrap().added_kinds(), initial);
    assert_eq!(client.factory.overlaps(), 0);
}
