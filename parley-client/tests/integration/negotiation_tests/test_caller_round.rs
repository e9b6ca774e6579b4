use parley_client::{
    NegotiationState, Role, SessionDescription, TrackKind, TransportEvent, TransportState,
};
use parley_core::{ClientMessage, ParticipantId, ServerMessage};

use crate::integration::init_tracing;
use crate::utils::{TestClient, TransportCall};

#[tokio::test]
async fn test_caller_round_reaches_connected() {
    init_tracing();

    let mut client = TestClient::start().await;
    let (a, b) = (ParticipantId::new(), ParticipantId::new());
    client.join(a, vec![]).await.unwrap();
    client.deliver(ServerMessage::NewMember { member_id: b });

    client.deliver(ServerMessage::BeginOffer { target_id: b });

    let offer_sdp = format!("offer-{b}-1");
    assert_eq!(
        client.next_outbound().await.unwrap(),
        ClientMessage::Offer {
            to: b,
            sdp: offer_sdp.clone(),
        }
    );

    let status = client
        .wait_status(b, |s| s.state == NegotiationState::OfferCreated)
        .await
        .unwrap();
    assert_eq!(status.role, Some(Role::Caller));

    let transport = client.factory.latest_for(b).unwrap();
    assert_eq!(
        transport.calls(),
        vec![
            TransportCall::AddTrack(TrackKind::Audio),
            TransportCall::AddTrack(TrackKind::Video),
            TransportCall::CreateOffer { ice_restart: true },
            TransportCall::SetLocal(SessionDescription::offer(offer_sdp)),
        ]
    );

    client.deliver(ServerMessage::IncomingAnswer {
        from: b,
        sdp: "answer-b".into(),
    });
    client
        .wait_status(b, |s| s.state == NegotiationState::AnswerExchanged)
        .await
        .unwrap();
    assert_eq!(
        transport.calls().last(),
        Some(&TransportCall::SetRemote(SessionDescription::answer("answer-b")))
    );

    assert!(transport.emit(TransportEvent::StateChanged(TransportState::Connected)));
    client
        .wait_status(b, |s| s.state == NegotiationState::Connected)
        .await
        .unwrap();

    client.assert_quiet().await;
}

#[tokio::test]
async fn test_answer_without_offer_is_ignored() {
    init_tracing();

    let mut client = TestClient::start().await;
    let (a, b) = (ParticipantId::new(), ParticipantId::new());
    client.join(a, vec![b]).await.unwrap();

    client.deliver(ServerMessage::IncomingAnswer {
        from: b,
        sdp: "unsolicited".into(),
    });
    client.assert_quiet().await;

    let view = client.wait_peer(b).await.unwrap();
    assert_eq!(view.state(), NegotiationState::Idle);
    assert!(client.factory.transports_for(b).is_empty());
}
