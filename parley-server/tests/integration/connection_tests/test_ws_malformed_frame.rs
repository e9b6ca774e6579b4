use parley_core::{ClientMessage, ServerMessage};
use parley_server::HeartbeatConfig;

use crate::integration::init_tracing;
use crate::utils::{TestWsClient, start_server};

#[tokio::test]
async fn test_ws_malformed_frame() {
    init_tracing();

    let addr = start_server(HeartbeatConfig::default()).await.unwrap();
    let mut client = TestWsClient::connect(addr).await.unwrap();

    client.send_raw("{not json").await.unwrap();
    client
        .send_raw(r#"{"op":"teleport","d":{}}"#)
        .await
        .unwrap();

    // The socket survives and keeps working.
    client.send(&ClientMessage::Join { name: None }).await.unwrap();
    assert!(matches!(
        client.recv().await.unwrap(),
        ServerMessage::JoinSuccess { .. }
    ));

    client.close().await.unwrap();
}
