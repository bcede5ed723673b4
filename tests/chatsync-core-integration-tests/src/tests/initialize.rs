// chatsync/chatsync-core-integration-tests
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use mockall::predicate;
use pretty_assertions::assert_eq;

use chatsync_core::domain::conversations::models::Conversation;
use chatsync_core::domain::general::models::EngineState;
use chatsync_core::domain::messaging::services::ChatServiceError;
use chatsync_core::domain::realtime::models::{ConnectionError, ConnectionState};
use chatsync_core::domain::selection::SelectionState;
use chatsync_core::domain::shared::models::{ConversationId, UserId};
use chatsync_core::test::{mock_data, MessageBuilder};
use chatsync_core::{ClientEvent, ConnectionEvent, MessagesEventType, SyncError, ValidationError};

use crate::tests::helpers::{conversation, TestEngine};

#[tokio::test]
async fn test_initialize_selects_most_recent_conversation_and_connects() -> Result<()> {
    let engine = TestEngine::new(|chat_service| {
        chat_service
            .expect_get_user_chat_previews()
            .once()
            .with(predicate::eq(UserId::from("u-jane")))
            .return_once(|_| {
                Box::pin(async {
                    Ok(vec![
                        conversation("c-old", "Book club", 60),
                        conversation("c-1", "Team", 5),
                        Conversation::new("c-empty", "Empty"),
                    ])
                })
            });
        chat_service
            .expect_get_chat_all_messages()
            .once()
            .with(predicate::eq(ConversationId::from("c-1")))
            .return_once(|_| {
                Box::pin(async {
                    Ok(vec![
                        MessageBuilder::new_with_index(2).build_message(),
                        MessageBuilder::new_with_index(1).build_message(),
                    ])
                })
            });
    });

    engine.initialize(mock_data::account_identity()).await?;

    assert_eq!(engine.identity(), Some(mock_data::account_identity()));
    assert_eq!(engine.state(), EngineState::Ready);
    assert_eq!(
        engine.conversation_ids(),
        vec![
            ConversationId::from("c-1"),
            ConversationId::from("c-old"),
            ConversationId::from("c-empty")
        ]
    );
    assert_eq!(engine.active_conversation(), Some("c-1".into()));
    assert_eq!(engine.selection_state(), SelectionState::Live);
    assert_eq!(engine.message_contents(), vec!["Message 1", "Message 2"]);
    assert_eq!(engine.connection_state(), ConnectionState::Connected);
    assert_eq!(
        engine.connector.connected_users(),
        vec![mock_data::account_user_id()]
    );

    assert_eq!(
        engine.take_events(),
        vec![
            ClientEvent::EngineStateChanged {
                state: EngineState::LoadingPreviews
            },
            ClientEvent::ConversationsChanged,
            ClientEvent::EngineStateChanged {
                state: EngineState::Ready
            },
            ClientEvent::SelectionChanged {
                conversation_id: Some("c-1".into())
            },
            ClientEvent::ConversationsChanged,
            ClientEvent::MessagesChanged {
                conversation_id: "c-1".into(),
                r#type: MessagesEventType::Loaded
            },
            ClientEvent::ConnectionStatusChanged {
                event: ConnectionEvent::Connect
            },
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_initialize_without_conversations_selects_nothing() -> Result<()> {
    let engine = TestEngine::new(|chat_service| {
        chat_service
            .expect_get_user_chat_previews()
            .once()
            .return_once(|_| Box::pin(async { Ok(vec![]) }));
        chat_service.expect_get_chat_all_messages().never();
    });

    engine.initialize(mock_data::account_identity()).await?;

    assert_eq!(engine.state(), EngineState::Ready);
    assert_eq!(engine.active_conversation(), None);
    assert_eq!(engine.selection_state(), SelectionState::None);
    assert!(engine.messages().is_empty());
    assert_eq!(engine.connection_state(), ConnectionState::Connected);

    Ok(())
}

#[tokio::test]
async fn test_initialize_continues_without_realtime_channel() -> Result<()> {
    let engine = TestEngine::new(|chat_service| {
        chat_service
            .expect_get_user_chat_previews()
            .once()
            .return_once(|_| Box::pin(async { Ok(vec![conversation("c-1", "Team", 5)]) }));
        chat_service
            .expect_get_chat_all_messages()
            .once()
            .return_once(|_| Box::pin(async { Ok(vec![]) }));
        chat_service
            .expect_send_sync()
            .once()
            .return_once(|_, _| Box::pin(async { Ok(()) }));
    });

    engine.connector.fail_next_connect(ConnectionError::HandshakeFailed {
        msg: "Connection refused".to_string(),
    });

    let result = engine.initialize(mock_data::account_identity()).await;

    assert_eq!(
        result,
        Err(SyncError::Connection(ConnectionError::HandshakeFailed {
            msg: "Connection refused".to_string()
        }))
    );
    assert_eq!(engine.state(), EngineState::Ready);
    assert_eq!(engine.connection_state(), ConnectionState::Disconnected);
    assert_eq!(engine.active_conversation(), Some("c-1".into()));

    // Sending only needs the REST service.
    engine.send_message("Anyone there?").await?;
    assert_eq!(engine.message_contents(), vec!["Anyone there?"]);

    Ok(())
}

#[tokio::test]
async fn test_initialize_connects_even_if_previews_are_unavailable() -> Result<()> {
    let engine = TestEngine::new(|chat_service| {
        chat_service
            .expect_get_user_chat_previews()
            .once()
            .return_once(|_| {
                Box::pin(async {
                    Err(ChatServiceError::Network {
                        msg: "timed out".to_string(),
                    })
                })
            });
        chat_service.expect_get_chat_all_messages().never();
    });

    let result = engine.initialize(mock_data::account_identity()).await;

    assert!(matches!(result, Err(SyncError::Network { .. })));
    assert_eq!(engine.state(), EngineState::PreviewsUnavailable);
    assert!(engine.conversations().is_empty());
    assert_eq!(engine.active_conversation(), None);
    assert_eq!(engine.connection_state(), ConnectionState::Connected);

    Ok(())
}

#[tokio::test]
async fn test_refresh_recovers_from_unavailable_previews() -> Result<()> {
    let engine = TestEngine::new(|chat_service| {
        let mut seq = mockall::Sequence::new();
        chat_service
            .expect_get_user_chat_previews()
            .once()
            .in_sequence(&mut seq)
            .return_once(|_| {
                Box::pin(async {
                    Err(ChatServiceError::Network {
                        msg: "timed out".to_string(),
                    })
                })
            });
        chat_service
            .expect_get_user_chat_previews()
            .once()
            .in_sequence(&mut seq)
            .return_once(|_| Box::pin(async { Ok(vec![conversation("c-1", "Team", 5)]) }));
        chat_service
            .expect_get_chat_all_messages()
            .once()
            .with(predicate::eq(ConversationId::from("c-1")))
            .return_once(|_| {
                Box::pin(async { Ok(vec![MessageBuilder::new_with_index(1).build_message()]) })
            });
    });

    assert!(engine
        .initialize(mock_data::account_identity())
        .await
        .is_err());
    assert_eq!(engine.state(), EngineState::PreviewsUnavailable);

    engine.refresh_previews().await?;

    assert_eq!(engine.state(), EngineState::Ready);
    assert_eq!(engine.active_conversation(), Some("c-1".into()));
    assert_eq!(engine.message_contents(), vec!["Message 1"]);

    Ok(())
}

#[tokio::test]
async fn test_initialize_twice_fails() -> Result<()> {
    let engine = TestEngine::new(|chat_service| {
        chat_service
            .expect_get_user_chat_previews()
            .once()
            .return_once(|_| Box::pin(async { Ok(vec![]) }));
    });

    engine.initialize(mock_data::account_identity()).await?;

    assert_eq!(
        engine.initialize(mock_data::account_identity()).await,
        Err(SyncError::Validation(ValidationError::AlreadyInitialized))
    );
    assert_eq!(engine.connector.connected_users().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_operations_require_initialization() {
    let engine = TestEngine::new(|chat_service| {
        chat_service.expect_get_user_chat_previews().never();
        chat_service.expect_send_sync().never();
    });

    assert_eq!(
        engine.send_message("Hello").await,
        Err(SyncError::Validation(ValidationError::NotInitialized))
    );
    assert_eq!(
        engine.refresh_previews().await,
        Err(SyncError::Validation(ValidationError::NotInitialized))
    );
    assert_eq!(
        engine.reconnect().await,
        Err(SyncError::Validation(ValidationError::NotInitialized))
    );
    assert_eq!(engine.state(), EngineState::Idle);
}
