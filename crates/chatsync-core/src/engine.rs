// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Debug, Formatter};
use std::ops::Deref;
use std::sync::{Arc, Weak};

use tracing::{info, instrument, warn};

use chatsync_utils::PinnedFuture;

use crate::app::deps::DynAppContext;
use crate::app::event_handlers::{InboundEventOutcome, RealtimeEventHandler};
use crate::app::services::{
    ConnectionService, ConversationsService, MessagesService, SelectionOutcome,
};
use crate::domain::conversations::models::Conversation;
use crate::domain::general::models::EngineState;
use crate::domain::messaging::models::MessageItem;
use crate::domain::realtime::models::{
    ConnectionState, OutboundEvent, RealtimeEvent, SubscriptionId,
};
use crate::domain::realtime::services::RealtimeSubscriber;
use crate::domain::selection::SelectionState;
use crate::domain::shared::models::{ConversationId, UserId, UserIdentity};
use crate::engine_builder::{SyncEngineBuilder, UndefinedChatService, UndefinedConnector};
use crate::error::SyncError;

/// Keeps the conversation list and the messages of the active conversation in sync with the
/// server.
///
/// Cloning a `SyncEngine` is cheap, all clones share the same state.
#[derive(Clone)]
pub struct SyncEngine {
    inner: Arc<SyncEngineInner>,
}

pub struct SyncEngineInner {
    pub(crate) connection: ConnectionService,
    pub(crate) conversations: ConversationsService,
    pub(crate) ctx: DynAppContext,
    pub(crate) messages: MessagesService,
    pub(crate) realtime_event_handler: RealtimeEventHandler,
}

impl From<Arc<SyncEngineInner>> for SyncEngine {
    fn from(inner: Arc<SyncEngineInner>) -> Self {
        SyncEngine { inner }
    }
}

impl Deref for SyncEngine {
    type Target = SyncEngineInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Debug for SyncEngine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("state", &self.state())
            .field("active_conversation", &self.active_conversation())
            .finish()
    }
}

impl SyncEngine {
    pub fn builder() -> SyncEngineBuilder<UndefinedChatService, UndefinedConnector> {
        SyncEngineBuilder::new()
    }
}

impl SyncEngine {
    /// Signs `identity` in. Loads the conversation previews, selects the most recent
    /// conversation and connects the realtime channel.
    ///
    /// A failing realtime connection is reported but leaves the engine usable without live
    /// updates. `reconnect` can be used to try again later.
    #[instrument(skip(self), fields(user_id = %identity.user_id))]
    pub async fn initialize(&self, identity: UserIdentity) -> Result<(), SyncError> {
        self.ctx.set_identity(identity)?;
        info!("Initializing…");

        let previews = self.conversations.load_previews().await;
        if previews.is_ok() {
            self.select_most_recent_conversation().await;
        }

        let connection = self.connection.connect(self.realtime_subscriber()).await;

        previews?;
        connection?;
        Ok(())
    }

    /// Makes `conversation_id` the active conversation and loads its history. If another
    /// conversation gets selected before the history arrives the result is discarded and
    /// `SelectionOutcome::Superseded` is returned.
    #[instrument(skip(self))]
    pub async fn select_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<SelectionOutcome, SyncError> {
        self.messages.select_conversation(conversation_id).await
    }

    #[instrument(skip(self, text))]
    pub async fn send_message(&self, text: &str) -> Result<(), SyncError> {
        self.messages.send_message(text).await
    }

    /// Applies a decoded realtime event. Events for unknown conversations trigger a refresh of
    /// the previews.
    #[instrument(skip(self))]
    pub async fn handle_inbound_event(&self, event: RealtimeEvent) {
        let InboundEventOutcome::UnknownConversation(conversation_id) =
            self.realtime_event_handler.handle_event(event)
        else {
            return;
        };

        info!("Refreshing previews to pick up {conversation_id}.");
        if let Err(err) = self.refresh_previews().await {
            warn!("Failed to refresh previews. {}", err);
        }
    }

    /// Reloads the conversation previews from the server.
    #[instrument(skip(self))]
    pub async fn refresh_previews(&self) -> Result<(), SyncError> {
        self.conversations.load_previews().await?;
        self.select_most_recent_conversation().await;
        Ok(())
    }

    /// Creates a conversation with `member_ids` and selects it.
    #[instrument(skip(self))]
    pub async fn create_conversation(
        &self,
        name: &str,
        member_ids: Vec<UserId>,
    ) -> Result<ConversationId, SyncError> {
        let conversation_id = self
            .conversations
            .create_conversation(name, member_ids)
            .await?;
        self.messages.select_conversation(&conversation_id).await?;
        Ok(conversation_id)
    }

    /// Connects the realtime channel again after it dropped or failed to connect.
    #[instrument(skip(self))]
    pub async fn reconnect(&self) -> Result<(), SyncError> {
        self.connection.connect(self.realtime_subscriber()).await
    }

    /// Disconnects and forgets everything about the current user.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        info!("Logging out…");
        self.messages.clear();
        self.connection.disconnect();
        self.conversations.clear();
        self.ctx.reset_identity();
        self.conversations.set_engine_state(EngineState::Idle);
    }

    pub fn subscribe_to_realtime_events(&self, subscriber: RealtimeSubscriber) -> SubscriptionId {
        self.connection.subscribe(subscriber)
    }

    pub fn unsubscribe_from_realtime_events(&self, id: SubscriptionId) {
        self.connection.unsubscribe(id)
    }

    pub fn send_realtime_event(&self, event: OutboundEvent) -> Result<(), SyncError> {
        self.connection.send(event)
    }
}

impl SyncEngine {
    pub fn identity(&self) -> Option<UserIdentity> {
        self.ctx.identity().ok()
    }

    pub fn state(&self) -> EngineState {
        self.ctx.engine_state()
    }

    /// Conversations ordered by their last activity, most recent first.
    pub fn conversations(&self) -> Vec<Conversation> {
        self.conversations.conversations()
    }

    pub fn active_conversation(&self) -> Option<ConversationId> {
        self.messages.active_conversation()
    }

    pub fn selection_state(&self) -> SelectionState {
        self.messages.selection_state()
    }

    /// Messages of the active conversation, oldest first.
    pub fn messages(&self) -> Vec<MessageItem> {
        self.messages.messages()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection.connection_state()
    }
}

impl SyncEngine {
    async fn select_most_recent_conversation(&self) {
        if self.messages.active_conversation().is_some() {
            return;
        }

        let Some(conversation) = self.conversations.most_recent() else {
            return;
        };

        if let Err(err) = self.messages.select_conversation(&conversation.id).await {
            warn!("Failed to select conversation {}. {}", conversation.id, err);
        }
    }

    fn realtime_subscriber(&self) -> RealtimeSubscriber {
        let inner = Arc::downgrade(&self.inner);

        Arc::new(move |event| {
            let inner = inner.clone();
            Box::pin(async move {
                let Some(inner) = Weak::upgrade(&inner) else {
                    return;
                };
                SyncEngine::from(inner).handle_inbound_event(event).await
            }) as PinnedFuture<_>
        })
    }
}
