pub mod negotiation_tests;

use parley_client::NegotiationState;
use parley_core::{ClientMessage, ParticipantId, ServerMessage};
use tracing::Level;

use crate::utils::TestClient;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Drives a caller round against `remote` through to `AnswerExchanged`.
pub async fn establish_as_caller(client: &mut TestClient, remote: ParticipantId) -> anyhow::Result<()> {
    client.deliver(ServerMessage::BeginOffer { target_id: remote });

    let ClientMessage::Offer { to, .. } = client.next_outbound().await? else {
        anyhow::bail!("Expected an offer");
    };
    assert_eq!(to, remote);

    client.deliver(ServerMessage::IncomingAnswer {
        from: remote,
        sdp: format!("answer-from-{remote}"),
    });
    client
        .wait_status(remote, |s| s.state == NegotiationState::AnswerExchanged)
        .await?;
    Ok(())
}
