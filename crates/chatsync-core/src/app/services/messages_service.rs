// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use tracing::{error, info, warn};

use chatsync_proc_macros::InjectDependencies;

use crate::app::deps::{
    DynAppContext, DynChatService, DynClientEventDispatcher, DynConversationStore,
    DynMessageStream, DynSelectionController, DynTimeProvider,
};
use crate::client_event::MessagesEventType;
use crate::domain::messaging::models::{Message, MessageItem};
use crate::domain::selection::SelectionState;
use crate::domain::shared::models::ConversationId;
use crate::error::{SyncError, ValidationError};
use crate::ClientEvent;

/// How a selection ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The history was loaded into the message stream.
    Applied,
    /// Another selection started while the history was loading. Its result was discarded.
    Superseded,
}

#[derive(InjectDependencies)]
pub struct MessagesService {
    #[inject]
    chat_service: DynChatService,
    #[inject]
    client_event_dispatcher: DynClientEventDispatcher,
    #[inject]
    conversation_store: DynConversationStore,
    #[inject]
    ctx: DynAppContext,
    #[inject]
    message_stream: DynMessageStream,
    #[inject]
    selection: DynSelectionController,
    #[inject]
    time_provider: DynTimeProvider,
}

impl MessagesService {
    pub fn messages(&self) -> Vec<MessageItem> {
        self.message_stream.get_all()
    }

    pub fn active_conversation(&self) -> Option<ConversationId> {
        self.selection.active()
    }

    pub fn selection_state(&self) -> SelectionState {
        self.selection.state()
    }

    pub async fn select_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<SelectionOutcome, SyncError> {
        let user_id = self.ctx.current_user_id()?;

        if self.conversation_store.get(conversation_id).is_none() {
            return Err(ValidationError::UnknownConversation(conversation_id.clone()).into());
        }

        let ticket = self.selection.begin(conversation_id.clone());
        self.message_stream.reset(Some(conversation_id.clone()));
        self.conversation_store.mark_read(conversation_id);

        self.client_event_dispatcher
            .dispatch_event(ClientEvent::SelectionChanged {
                conversation_id: Some(conversation_id.clone()),
            });
        self.client_event_dispatcher
            .dispatch_event(ClientEvent::ConversationsChanged);

        self.selection
            .transition(&ticket, SelectionState::LoadingMessages);

        let result = self
            .chat_service
            .get_chat_all_messages(conversation_id)
            .await;

        if !self.selection.is_current(&ticket) {
            info!("Discarding messages of {conversation_id} since the selection changed.");
            return Ok(SelectionOutcome::Superseded);
        }

        match result {
            Ok(messages) => {
                self.message_stream
                    .load(conversation_id, messages, &user_id);
                self.selection.transition(&ticket, SelectionState::Live);
                self.client_event_dispatcher
                    .dispatch_event(ClientEvent::MessagesChanged {
                        conversation_id: conversation_id.clone(),
                        r#type: MessagesEventType::Loaded,
                    });
                Ok(SelectionOutcome::Applied)
            }
            Err(err) => {
                warn!("Failed to load messages of {conversation_id}. {}", err);
                self.selection
                    .transition(&ticket, SelectionState::LoadFailed);
                Err(err.into())
            }
        }
    }

    /// Appends `text` optimistically to the active conversation and sends it. The optimistic
    /// entry is removed again if the server does not accept the message.
    pub async fn send_message(&self, text: &str) -> Result<(), SyncError> {
        let user_id = self.ctx.current_user_id()?;

        if text.trim().is_empty() {
            return Err(ValidationError::EmptyMessage.into());
        }

        let Some(conversation_id) = self.selection.active() else {
            return Err(ValidationError::NoActiveConversation.into());
        };

        let message = Message::new(
            user_id.clone(),
            Some(conversation_id.clone()),
            text,
            self.time_provider.now(),
        );

        let handle = self.message_stream.append_local(message.clone(), &user_id);
        self.client_event_dispatcher
            .dispatch_event(ClientEvent::MessagesChanged {
                conversation_id: conversation_id.clone(),
                r#type: MessagesEventType::Appended,
            });

        self.conversation_store.apply_inbound_activity(
            &conversation_id,
            &user_id,
            &message.content,
            message.timestamp,
        );
        self.client_event_dispatcher
            .dispatch_event(ClientEvent::ConversationsChanged);

        match self.chat_service.send_sync(&message, &conversation_id).await {
            Ok(()) => {
                if self.message_stream.mark_confirmed(handle) {
                    self.client_event_dispatcher
                        .dispatch_event(ClientEvent::MessagesChanged {
                            conversation_id,
                            r#type: MessagesEventType::DeliveryConfirmed,
                        });
                }
                Ok(())
            }
            Err(err) => {
                error!("Failed to send message to {conversation_id}. {}", err);

                if self.message_stream.rollback(handle) {
                    self.client_event_dispatcher
                        .dispatch_event(ClientEvent::MessagesChanged {
                            conversation_id,
                            r#type: MessagesEventType::RolledBack,
                        });
                }
                Err(SyncError::from_send_error(err))
            }
        }
    }

    /// Forgets the selection and invalidates any pending load.
    pub fn clear(&self) {
        self.selection.clear();
        self.message_stream.reset(None);
        self.client_event_dispatcher
            .dispatch_event(ClientEvent::SelectionChanged {
                conversation_id: None,
            });
    }
}
