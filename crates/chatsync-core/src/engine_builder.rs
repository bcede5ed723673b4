// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use crate::app::deps::{AppConfig, AppContext, AppDependencies, DynTimeProvider};
use crate::app::event_handlers::RealtimeEventHandler;
use crate::app::services::{ConnectionService, ConversationsService, MessagesService};
use crate::domain::general::services::{SystemTimeProvider, TimeProvider};
use crate::domain::messaging::services::ChatService;
use crate::domain::realtime::services::Connector;
use crate::domain::selection::SelectionController;
use crate::engine::SyncEngineInner;
use crate::infra::conversations::InMemoryConversationStore;
use crate::infra::events::ImmediateClientEventDispatcher;
use crate::infra::messaging::InMemoryMessageStream;
use crate::infra::realtime::SocketRealtimeChannel;
use crate::{ClientDelegate, SyncEngine};

pub struct UndefinedChatService;
pub struct UndefinedConnector;

pub struct SyncEngineBuilder<S, C> {
    app_config: AppConfig,
    chat_service: S,
    connector: C,
    delegate: Option<Box<dyn ClientDelegate>>,
    time_provider: DynTimeProvider,
}

impl SyncEngineBuilder<UndefinedChatService, UndefinedConnector> {
    pub(crate) fn new() -> Self {
        SyncEngineBuilder {
            app_config: Default::default(),
            chat_service: UndefinedChatService,
            connector: UndefinedConnector,
            delegate: None,
            time_provider: Arc::new(SystemTimeProvider::default()),
        }
    }
}

impl<C> SyncEngineBuilder<UndefinedChatService, C> {
    pub fn set_chat_service<S: ChatService + 'static>(
        self,
        chat_service: S,
    ) -> SyncEngineBuilder<Arc<dyn ChatService>, C> {
        SyncEngineBuilder {
            app_config: self.app_config,
            chat_service: Arc::new(chat_service),
            connector: self.connector,
            delegate: self.delegate,
            time_provider: self.time_provider,
        }
    }
}

impl<S> SyncEngineBuilder<S, UndefinedConnector> {
    pub fn set_connector<C: Connector + 'static>(
        self,
        connector: C,
    ) -> SyncEngineBuilder<S, Box<dyn Connector>> {
        SyncEngineBuilder {
            app_config: self.app_config,
            chat_service: self.chat_service,
            connector: Box::new(connector),
            delegate: self.delegate,
            time_provider: self.time_provider,
        }
    }
}

impl<S, C> SyncEngineBuilder<S, C> {
    pub fn set_time_provider<T: TimeProvider + 'static>(mut self, time_provider: T) -> Self {
        self.time_provider = Arc::new(time_provider);
        self
    }

    pub fn set_config(mut self, config: AppConfig) -> Self {
        self.app_config = config;
        self
    }

    pub fn set_delegate(mut self, delegate: Option<Box<dyn ClientDelegate>>) -> Self {
        self.delegate = delegate;
        self
    }
}

impl SyncEngineBuilder<Arc<dyn ChatService>, Box<dyn Connector>> {
    pub fn build(self) -> SyncEngine {
        let event_dispatcher = Arc::new(ImmediateClientEventDispatcher::new(self.delegate));

        let dependencies = AppDependencies {
            chat_service: self.chat_service,
            client_event_dispatcher: event_dispatcher.clone(),
            conversation_store: Arc::new(InMemoryConversationStore::new()),
            message_stream: Arc::new(InMemoryMessageStream::new(self.app_config.dedup_window)),
            ctx: Arc::new(AppContext::new(self.app_config)),
            realtime_channel: Arc::new(SocketRealtimeChannel::new(
                self.connector,
                event_dispatcher.clone(),
            )),
            selection: Arc::new(SelectionController::new()),
            time_provider: self.time_provider,
        };

        let inner = Arc::new(SyncEngineInner::from(&dependencies));
        event_dispatcher.set_engine_inner(Arc::downgrade(&inner));

        SyncEngine::from(inner)
    }
}

impl From<&AppDependencies> for SyncEngineInner {
    fn from(deps: &AppDependencies) -> Self {
        SyncEngineInner {
            connection: ConnectionService::from(deps),
            conversations: ConversationsService::from(deps),
            ctx: deps.ctx.clone(),
            messages: MessagesService::from(deps),
            realtime_event_handler: RealtimeEventHandler::from(deps),
        }
    }
}
