// chatsync/chatsync-core-integration-tests
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use pretty_assertions::assert_eq;

use chatsync_core::domain::realtime::models::{ConnectionError, ConnectionState};
use chatsync_core::test::{mock_data, MessageBuilder};
use chatsync_core::{ClientEvent, ConnectionEvent};

use crate::tests::helpers::{conversation, TestEngine};

fn engine_with_team_conversation() -> TestEngine {
    TestEngine::new(|chat_service| {
        chat_service
            .expect_get_user_chat_previews()
            .once()
            .return_once(|_| Box::pin(async { Ok(vec![conversation("c-1", "Team", 5)]) }));
        chat_service
            .expect_get_chat_all_messages()
            .once()
            .return_once(|_| {
                Box::pin(async { Ok(vec![MessageBuilder::new_with_index(1).build_message()]) })
            });
    })
}

#[tokio::test]
async fn test_dropped_connection_keeps_state_until_reconnected() -> Result<()> {
    let engine = engine_with_team_conversation();
    engine.initialize(mock_data::account_identity()).await?;
    engine.take_events();

    let error = ConnectionError::Generic {
        msg: "Connection reset by peer".to_string(),
    };
    engine.connector.drop_connection(Some(error.clone())).await;

    assert_eq!(engine.connection_state(), ConnectionState::Disconnected);
    assert_eq!(
        engine.take_events(),
        vec![ClientEvent::ConnectionStatusChanged {
            event: ConnectionEvent::Disconnect { error: Some(error) }
        }]
    );
    assert_eq!(engine.active_conversation(), Some("c-1".into()));
    assert_eq!(engine.message_contents(), vec!["Message 1"]);

    // Nothing arrives while the channel is down.
    engine.receive_broadcast("u-bob", "c-1", "Lost").await;
    assert_eq!(engine.message_contents(), vec!["Message 1"]);

    engine.reconnect().await?;

    assert_eq!(engine.connection_state(), ConnectionState::Connected);
    assert_eq!(
        engine.connector.connected_users(),
        vec![mock_data::account_user_id(), mock_data::account_user_id()]
    );

    engine.receive_broadcast("u-bob", "c-1", "Back again").await;
    assert_eq!(engine.message_contents(), vec!["Message 1", "Back again"]);

    Ok(())
}

#[tokio::test]
async fn test_reconnect_while_connected_does_nothing() -> Result<()> {
    let engine = engine_with_team_conversation();
    engine.initialize(mock_data::account_identity()).await?;

    engine.reconnect().await?;

    assert_eq!(engine.connector.connected_users().len(), 1);
    assert_eq!(engine.connector.disconnect_count(), 0);

    // The engine handler must not have been installed twice.
    engine.receive_broadcast("u-bob", "c-1", "Only once").await;
    assert_eq!(engine.message_contents(), vec!["Message 1", "Only once"]);

    Ok(())
}

#[tokio::test]
async fn test_reconnect_after_failed_initial_connect() -> Result<()> {
    let engine = engine_with_team_conversation();
    engine.connector.fail_next_connect(ConnectionError::HandshakeFailed {
        msg: "503 Service Unavailable".to_string(),
    });

    assert!(engine
        .initialize(mock_data::account_identity())
        .await
        .is_err());
    assert_eq!(engine.connection_state(), ConnectionState::Disconnected);

    engine.reconnect().await?;
    engine.receive_broadcast("u-bob", "c-1", "Finally").await;

    assert_eq!(engine.connection_state(), ConnectionState::Connected);
    assert_eq!(engine.message_contents(), vec!["Message 1", "Finally"]);

    Ok(())
}
