// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use crate::app::deps::AppContext;
use crate::app::event_handlers::ClientEventDispatcherTrait;
use crate::domain::conversations::repos::ConversationStore;
use crate::domain::general::services::TimeProvider;
use crate::domain::messaging::repos::MessageStream;
use crate::domain::messaging::services::ChatService;
use crate::domain::realtime::services::RealtimeChannel;
use crate::domain::selection::SelectionController;

pub(crate) type DynAppContext = Arc<AppContext>;
pub(crate) type DynChatService = Arc<dyn ChatService>;
pub(crate) type DynClientEventDispatcher = Arc<dyn ClientEventDispatcherTrait>;
pub(crate) type DynConversationStore = Arc<dyn ConversationStore>;
pub(crate) type DynMessageStream = Arc<dyn MessageStream>;
pub(crate) type DynRealtimeChannel = Arc<dyn RealtimeChannel>;
pub(crate) type DynSelectionController = Arc<SelectionController>;
pub(crate) type DynTimeProvider = Arc<dyn TimeProvider>;

pub struct AppDependencies {
    pub chat_service: DynChatService,
    pub client_event_dispatcher: DynClientEventDispatcher,
    pub conversation_store: DynConversationStore,
    pub ctx: DynAppContext,
    pub message_stream: DynMessageStream,
    pub realtime_channel: DynRealtimeChannel,
    pub selection: DynSelectionController,
    pub time_provider: DynTimeProvider,
}
