// chatsync/chatsync-core-integration-tests
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::ops::Deref;
use std::sync::Arc;

use chrono::Duration;

use chatsync_core::domain::conversations::models::{Conversation, Participant};
use chatsync_core::domain::messaging::services::mocks::MockChatService;
use chatsync_core::domain::shared::models::{ConversationId, UserId};
use chatsync_core::test::{
    mock_data, ConstantTimeProvider, MockAppDependencies, RecordingClientEventDispatcher,
    ScriptedConnector,
};
use chatsync_core::{ClientEvent, SyncEngine};

/// An engine wired to a mocked `ChatService` and a `ScriptedConnector`, signed out.
pub struct TestEngine {
    engine: SyncEngine,
    pub connector: ScriptedConnector,
    pub dispatcher: Arc<RecordingClientEventDispatcher>,
    pub time_provider: Arc<ConstantTimeProvider>,
}

impl TestEngine {
    pub fn new(setup_chat_service: impl FnOnce(&mut MockChatService)) -> Self {
        let mut deps = MockAppDependencies::signed_out();
        setup_chat_service(&mut deps.chat_service);

        let connector = deps.connector.clone();
        let dispatcher = deps.client_event_dispatcher.clone();
        let time_provider = deps.time_provider.clone();

        TestEngine {
            engine: deps.into_engine(),
            connector,
            dispatcher,
            time_provider,
        }
    }

    pub async fn receive_broadcast(
        &self,
        sender_id: impl Into<UserId>,
        conversation_id: impl Into<ConversationId>,
        content: &str,
    ) {
        self.connector
            .push_frame(mock_data::broadcast_frame(sender_id, conversation_id, content))
            .await
    }

    pub fn conversation_ids(&self) -> Vec<ConversationId> {
        self.engine
            .conversations()
            .into_iter()
            .map(|conversation| conversation.id)
            .collect()
    }

    pub fn unread_count(&self, conversation_id: impl Into<ConversationId>) -> Option<u32> {
        let conversation_id = conversation_id.into();
        self.engine
            .conversations()
            .into_iter()
            .find(|conversation| conversation.id == conversation_id)
            .map(|conversation| conversation.unread_count)
    }

    pub fn message_contents(&self) -> Vec<String> {
        self.engine
            .messages()
            .into_iter()
            .map(|item| item.message.content)
            .collect()
    }

    pub fn take_events(&self) -> Vec<ClientEvent> {
        self.dispatcher.take_events()
    }
}

impl Deref for TestEngine {
    type Target = SyncEngine;

    fn deref(&self) -> &Self::Target {
        &self.engine
    }
}

/// A conversation with the contact whose last message was sent `minutes_ago` before the
/// reference date.
pub fn conversation(id: &str, name: &str, minutes_ago: i64) -> Conversation {
    Conversation::new(id, name)
        .with_last_message(
            mock_data::contact_user_id(),
            format!("Last message in {name}"),
            mock_data::reference_date() - Duration::minutes(minutes_ago),
        )
        .with_participants(vec![
            Participant::new(mock_data::account_user_id(), "jane"),
            Participant::new(mock_data::contact_user_id(), "bob"),
        ])
}
