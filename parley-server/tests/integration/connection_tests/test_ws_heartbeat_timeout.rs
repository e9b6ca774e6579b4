use parley_core::{ClientMessage, ServerMessage};
use parley_server::HeartbeatConfig;
use std::time::Duration;

use crate::integration::init_tracing;
use crate::utils::{TestWsClient, start_server};

#[tokio::test]
async fn test_ws_heartbeat_timeout() {
    init_tracing();

    let heartbeat = HeartbeatConfig {
        ping_interval: Duration::from_millis(50),
        ping_timeout: Duration::from_millis(50),
    };
    let addr = start_server(heartbeat).await.unwrap();

    // Joins, then never reads again, so pings go unanswered.
    let mut silent = TestWsClient::connect(addr).await.unwrap();
    silent.send(&ClientMessage::Join { name: None }).await.unwrap();

    tokio::time::sleep(Duration::from_millis(600)).await;

    let mut watcher = TestWsClient::connect(addr).await.unwrap();
    watcher.send(&ClientMessage::Join { name: None }).await.unwrap();
    let ServerMessage::JoinSuccess { member_ids, .. } = watcher.recv().await.unwrap() else {
        panic!("expected joinSuccess");
    };
    assert!(member_ids.is_empty(), "silent socket should have been dropped");

    drop(silent);
    watcher.close().await.unwrap();
}
