// chatsync/chatsync-core-integration-tests
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use anyhow::Result;
use chrono::Duration;
use mockall::predicate;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;

use chatsync_core::domain::messaging::services::mocks::MockChatService;
use chatsync_core::domain::realtime::models::{OutboundEvent, RealtimeEvent};
use chatsync_core::domain::shared::models::ConversationId;
use chatsync_core::test::mock_data;
use chatsync_core::{ClientEvent, MessagesEventType};
use chatsync_utils::PinnedFuture;

use crate::tests::helpers::{conversation, TestEngine};

/// Signs in with "c-1" (active, empty history) and "c-2".
async fn signed_in_engine(setup: impl FnOnce(&mut MockChatService)) -> Result<TestEngine> {
    let engine = TestEngine::new(|chat_service| {
        chat_service
            .expect_get_user_chat_previews()
            .once()
            .return_once(|_| {
                Box::pin(async {
                    Ok(vec![
                        conversation("c-1", "Team", 5),
                        conversation("c-2", "Family", 30),
                    ])
                })
            });
        chat_service
            .expect_get_chat_all_messages()
            .once()
            .with(predicate::eq(ConversationId::from("c-1")))
            .return_once(|_| Box::pin(async { Ok(vec![]) }));
        setup(chat_service);
    });

    engine.initialize(mock_data::account_identity()).await?;
    engine.take_events();

    Ok(engine)
}

#[tokio::test]
async fn test_broadcast_to_active_conversation_is_appended_once() -> Result<()> {
    let engine = signed_in_engine(|_| {}).await?;
    engine.time_provider.advance(Duration::minutes(1));

    engine.receive_broadcast("u-bob", "c-1", "Hi Jane").await;
    engine.receive_broadcast("u-bob", "c-1", "Hi Jane").await;

    assert_eq!(engine.message_contents(), vec!["Hi Jane"]);
    assert_eq!(engine.unread_count("c-1"), Some(0));

    let message = &engine.messages()[0];
    assert!(!message.is_mine);
    assert_eq!(
        message.message.timestamp,
        mock_data::reference_date() + Duration::minutes(1)
    );

    assert_eq!(
        engine.take_events(),
        vec![
            ClientEvent::MessagesChanged {
                conversation_id: "c-1".into(),
                r#type: MessagesEventType::Appended
            },
            ClientEvent::ConversationsChanged,
            ClientEvent::ConversationsChanged,
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_broadcast_to_inactive_conversation_counts_as_unread() -> Result<()> {
    let engine = signed_in_engine(|chat_service| {
        chat_service
            .expect_get_chat_all_messages()
            .once()
            .with(predicate::eq(ConversationId::from("c-2")))
            .return_once(|_| Box::pin(async { Ok(vec![]) }));
    })
    .await?;

    engine.receive_broadcast("u-bob", "c-2", "Dinner?").await;
    engine
        .receive_broadcast("u-bob", "c-2", "At seven maybe")
        .await;

    assert!(engine.messages().is_empty());
    assert_eq!(engine.unread_count("c-2"), Some(2));
    assert_eq!(
        engine.conversation_ids(),
        vec![ConversationId::from("c-2"), ConversationId::from("c-1")]
    );

    let preview = engine.conversations()[0].clone();
    assert_eq!(
        preview.last_message.map(|message| message.content),
        Some("At seven maybe".to_string())
    );

    engine.select_conversation(&"c-2".into()).await?;
    assert_eq!(engine.unread_count("c-2"), Some(0));

    Ok(())
}

#[tokio::test]
async fn test_echo_of_own_message_is_not_duplicated() -> Result<()> {
    let engine = signed_in_engine(|chat_service| {
        chat_service
            .expect_send_sync()
            .once()
            .return_once(|_, _| Box::pin(async { Ok(()) }));
    })
    .await?;

    engine.send_message("On my way").await?;
    engine.receive_broadcast("u-jane", "c-1", "On my way").await;

    assert_eq!(engine.message_contents(), vec!["On my way"]);
    assert!(engine.messages()[0].is_mine);

    Ok(())
}

#[tokio::test]
async fn test_broadcast_for_unknown_conversation_refreshes_previews() -> Result<()> {
    let engine = TestEngine::new(|chat_service| {
        let mut seq = mockall::Sequence::new();
        chat_service
            .expect_get_user_chat_previews()
            .once()
            .in_sequence(&mut seq)
            .return_once(|_| Box::pin(async { Ok(vec![conversation("c-1", "Team", 5)]) }));
        chat_service
            .expect_get_user_chat_previews()
            .once()
            .in_sequence(&mut seq)
            .return_once(|_| {
                Box::pin(async {
                    Ok(vec![
                        conversation("c-1", "Team", 5),
                        conversation("c-3", "New project", 0),
                    ])
                })
            });
        chat_service
            .expect_get_chat_all_messages()
            .once()
            .with(predicate::eq(ConversationId::from("c-1")))
            .return_once(|_| Box::pin(async { Ok(vec![]) }));
    });

    engine.initialize(mock_data::account_identity()).await?;
    engine
        .receive_broadcast("u-bob", "c-3", "Welcome to the project")
        .await;

    assert_eq!(
        engine.conversation_ids(),
        vec![ConversationId::from("c-3"), ConversationId::from("c-1")]
    );
    assert_eq!(engine.active_conversation(), Some("c-1".into()));
    assert!(engine.messages().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_unknown_frames_are_ignored() -> Result<()> {
    let engine = signed_in_engine(|_| {}).await?;

    engine.connector.push_frame("not json at all").await;
    engine
        .connector
        .push_frame(r#"{"operation_type":"typing","data":{}}"#)
        .await;
    engine
        .connector
        .push_frame(r#"{"operation_type":"send_message"}"#)
        .await;

    assert!(engine.messages().is_empty());
    assert!(engine.take_events().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_external_subscribers_receive_decoded_events() -> Result<()> {
    let engine = signed_in_engine(|_| {}).await?;

    let received = Arc::new(Mutex::new(Vec::<RealtimeEvent>::new()));
    let subscription = engine.subscribe_to_realtime_events({
        let received = received.clone();
        Arc::new(move |event: RealtimeEvent| {
            received.lock().push(event);
            Box::pin(async {}) as PinnedFuture<()>
        })
    });

    engine.receive_broadcast("u-bob", "c-1", "First").await;
    engine.unsubscribe_from_realtime_events(subscription);
    engine.receive_broadcast("u-bob", "c-1", "Second").await;

    assert_eq!(
        received.lock().clone(),
        vec![RealtimeEvent::Broadcast {
            sender_id: "u-bob".into(),
            conversation_id: "c-1".into(),
            content: "First".to_string(),
        }]
    );
    // The engine itself keeps receiving.
    assert_eq!(engine.message_contents(), vec!["First", "Second"]);

    Ok(())
}

#[tokio::test]
async fn test_send_realtime_event_writes_frame() -> Result<()> {
    let engine = signed_in_engine(|_| {}).await?;

    engine.send_realtime_event(OutboundEvent::SendMessage {
        sender_id: mock_data::account_user_id(),
        conversation_id: "c-1".into(),
        content: "Hello".to_string(),
    })?;

    assert_eq!(
        engine.connector.sent_frames(),
        vec![
            r#"{"id":1,"operation":"send_message","body":{"user_id":"u-jane","chat_id":"c-1","content":"Hello"}}"#
                .to_string()
        ]
    );

    Ok(())
}
