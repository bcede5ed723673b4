// chatsync/chatsync-core-integration-tests
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use anyhow::Result;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;

use chatsync_core::domain::general::models::EngineState;
use chatsync_core::domain::messaging::services::mocks::MockChatService;
use chatsync_core::test::{mock_data, ConstantTimeProvider, ScriptedConnector};
use chatsync_core::{
    AppConfig, ClientDelegate, ClientEvent, ConnectionEvent, MessagesEventType, SyncEngine,
};

use crate::tests::helpers::conversation;

/// Records every event together with the number of conversations the engine reported when
/// the event arrived.
#[derive(Default, Clone)]
struct RecordingDelegate {
    events: Arc<Mutex<Vec<(ClientEvent, usize)>>>,
}

impl ClientDelegate for RecordingDelegate {
    fn handle_event(&self, engine: SyncEngine, event: ClientEvent) {
        let conversation_count = engine.conversations().len();
        self.events.lock().push((event, conversation_count));
    }
}

#[tokio::test]
async fn test_delegate_observes_engine_through_events() -> Result<()> {
    let mut chat_service = MockChatService::new();
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
        .return_once(|_| Box::pin(async { Ok(vec![]) }));

    let connector = ScriptedConnector::new();
    let delegate = RecordingDelegate::default();

    let engine = SyncEngine::builder()
        .set_chat_service(chat_service)
        .set_connector(connector.clone())
        .set_time_provider(ConstantTimeProvider::new(mock_data::reference_date()))
        .set_config(AppConfig { dedup_window: 5 })
        .set_delegate(Some(Box::new(delegate.clone())))
        .build();

    engine.initialize(mock_data::account_identity()).await?;
    connector
        .push_frame(mock_data::broadcast_frame("u-bob", "c-1", "Hello"))
        .await;

    assert_eq!(engine.messages().len(), 1);
    assert_eq!(
        delegate.events.lock().clone(),
        vec![
            (
                ClientEvent::EngineStateChanged {
                    state: EngineState::LoadingPreviews
                },
                0
            ),
            (ClientEvent::ConversationsChanged, 2),
            (
                ClientEvent::EngineStateChanged {
                    state: EngineState::Ready
                },
                2
            ),
            (
                ClientEvent::SelectionChanged {
                    conversation_id: Some("c-1".into())
                },
                2
            ),
            (ClientEvent::ConversationsChanged, 2),
            (
                ClientEvent::MessagesChanged {
                    conversation_id: "c-1".into(),
                    r#type: MessagesEventType::Loaded
                },
                2
            ),
            (
                ClientEvent::ConnectionStatusChanged {
                    event: ConnectionEvent::Connect
                },
                2
            ),
            (
                ClientEvent::MessagesChanged {
                    conversation_id: "c-1".into(),
                    r#type: MessagesEventType::Appended
                },
                2
            ),
            (ClientEvent::ConversationsChanged, 2),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_engine_without_delegate_still_works() -> Result<()> {
    let mut chat_service = MockChatService::new();
    chat_service
        .expect_get_user_chat_previews()
        .once()
        .return_once(|_| Box::pin(async { Ok(vec![]) }));

    let engine = SyncEngine::builder()
        .set_chat_service(chat_service)
        .set_connector(ScriptedConnector::new())
        .build();

    engine.initialize(mock_data::account_identity()).await?;

    assert_eq!(engine.state(), EngineState::Ready);
    assert!(engine.conversations().is_empty());

    Ok(())
}
