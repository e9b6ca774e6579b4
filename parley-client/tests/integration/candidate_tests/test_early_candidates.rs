use parley_client::{NegotiationState, SessionDescription};
use parley_core::{ClientMessage, ParticipantId, ServerMessage};

use super::candidate;
use crate::integration::init_tracing;
use crate::utils::{TestClient, TransportCall, eventually};

/// Candidates that beat the answer are held, then applied once it lands.
#[tokio::test]
async fn test_early_candidates_flushed_after_answer() {
    init_tracing();

    let mut client = TestClient::start().await;
    let (a, b) = (ParticipantId::new(), ParticipantId::new());
    client.join(a, vec![]).await.unwrap();
    client.deliver(ServerMessage::NewMember { member_id: b });

    client.deliver(ServerMessage::BeginOffer { target_id: b });
    let ClientMessage::Offer { .. } = client.next_outbound().await.unwrap() else {
        panic!("Expected an offer");
    };

    client.deliver(ServerMessage::IncomingCandidate {
        from: b,
        payload: candidate("early", Some(a)),
    });
    client.assert_quiet().await;

    let transport = client.factory.latest_for(b).unwrap();
    assert!(transport.added_candidates().is_empty());

    client.deliver(ServerMessage::IncomingAnswer {
        from: b,
        sdp: "answer-b".into(),
    });
    client
        .wait_status(b, |s| s.state == NegotiationState::AnswerExchanged)
        .await
        .unwrap();

    let calls = transport.calls();
    let remote_at = calls
        .iter()
        .position(|c| *c == TransportCall::SetRemote(SessionDescription::answer("answer-b")))
        .unwrap();
    let candidate_at = calls
        .iter()
        .position(|c| *c == TransportCall::AddCandidate("early".into()))
        .unwrap();
    assert!(remote_at < candidate_at);

    // Once the description is in, candidates go straight through.
    client.deliver(ServerMessage::IncomingCandidate {
        from: b,
        payload: candidate("late", Some(a)),
    });
    eventually(|| transport.added_candidates().len() == 2)
        .await
        .unwrap();
    assert_eq!(transport.added_candidates(), vec!["early", "late"]);
}

/// Candidates arriving before any session exists are not lost either.
#[tokio::test]
async fn test_candidate_before_offer_is_kept() {
    init_tracing();

    let mut client = TestClient::start().await;
    let (a, c) = (ParticipantId::new(), ParticipantId::new());
    client.join(c, vec![a]).await.unwrap();

    client.deliver(ServerMessage::IncomingCandidate {
        from: a,
        payload: candidate("too-early", Some(c)),
    });
    client.assert_quiet().await;
    assert!(client.factory.transports_for(a).is_empty());

    client.deliver(ServerMessage::IncomingOffer {
        from: a,
        sdp: "offer-a".into(),
    });
    let ClientMessage::Answer { .. } = client.next_outbound().await.unwrap() else {
        panic!("Expected an answer");
    };

    let transport = client.factory.latest_for(a).unwrap();
    assert_eq!(transport.added_candidates(), vec!["too-early"]);
}
