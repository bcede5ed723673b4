// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use tracing::{info, warn};

use chatsync_proc_macros::InjectDependencies;

use crate::app::deps::{
    DynAppContext, DynChatService, DynClientEventDispatcher, DynConversationStore,
};
use crate::domain::conversations::models::{Conversation, Participant};
use crate::domain::general::models::EngineState;
use crate::domain::shared::models::{ConversationId, UserId};
use crate::error::{SyncError, ValidationError};
use crate::ClientEvent;

#[derive(InjectDependencies)]
pub struct ConversationsService {
    #[inject]
    chat_service: DynChatService,
    #[inject]
    client_event_dispatcher: DynClientEventDispatcher,
    #[inject]
    conversation_store: DynConversationStore,
    #[inject]
    ctx: DynAppContext,
}

impl ConversationsService {
    pub fn conversations(&self) -> Vec<Conversation> {
        self.conversation_store.get_all()
    }

    pub fn most_recent(&self) -> Option<Conversation> {
        self.conversation_store.most_recent()
    }

    /// Replaces the stored previews with the ones on the server.
    pub async fn load_previews(&self) -> Result<(), SyncError> {
        let user_id = self.ctx.current_user_id()?;
        self.set_engine_state(EngineState::LoadingPreviews);

        let result = self.chat_service.get_user_chat_previews(&user_id).await;

        // The user might have signed out while we were waiting.
        if !self.ctx.is_current_user(&user_id) {
            return Err(ValidationError::NotInitialized.into());
        }

        match result {
            Ok(conversations) => {
                info!("Loaded {} conversation previews.", conversations.len());
                self.conversation_store.set_all(conversations);
                self.client_event_dispatcher
                    .dispatch_event(ClientEvent::ConversationsChanged);
                self.set_engine_state(EngineState::Ready);
                Ok(())
            }
            Err(err) => {
                warn!("Failed to load conversation previews. {}", err);
                self.set_engine_state(EngineState::PreviewsUnavailable);
                Err(err.into())
            }
        }
    }

    /// Creates a conversation on the server and seeds it locally with an empty history. The
    /// current user is added to `member_ids` if missing.
    pub async fn create_conversation(
        &self,
        name: &str,
        mut member_ids: Vec<UserId>,
    ) -> Result<ConversationId, SyncError> {
        let identity = self.ctx.identity()?;
        let name = name.trim();

        if name.is_empty() || member_ids.is_empty() {
            return Err(ValidationError::InvalidChatRequest.into());
        }

        if !member_ids.contains(&identity.user_id) {
            member_ids.push(identity.user_id.clone());
        }

        let conversation_id = self.chat_service.create_chat(name, &member_ids).await?;
        info!("Created conversation {conversation_id}.");

        let participants = member_ids
            .into_iter()
            .map(|member_id| {
                if member_id == identity.user_id {
                    Participant::new(member_id, identity.username.clone())
                } else {
                    let name = member_id.to_string();
                    Participant::new(member_id, name)
                }
            })
            .collect();

        self.conversation_store.upsert_preview(
            Conversation::new(conversation_id.clone(), name).with_participants(participants),
        );
        self.client_event_dispatcher
            .dispatch_event(ClientEvent::ConversationsChanged);

        Ok(conversation_id)
    }

    pub fn clear(&self) {
        self.conversation_store.clear();
        self.client_event_dispatcher
            .dispatch_event(ClientEvent::ConversationsChanged);
    }

    pub fn set_engine_state(&self, state: EngineState) {
        if self.ctx.set_engine_state(state) {
            self.client_event_dispatcher
                .dispatch_event(ClientEvent::EngineStateChanged { state });
        }
    }
}
