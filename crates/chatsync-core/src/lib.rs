// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use app::deps::AppConfig;
pub use app::services::SelectionOutcome;
pub use client_event::{ClientDelegate, ClientEvent, ConnectionEvent, MessagesEventType};
pub use engine::SyncEngine;
pub use engine_builder::{SyncEngineBuilder, UndefinedChatService, UndefinedConnector};
pub use error::{SyncError, ValidationError};

pub use domain::general::services::{SystemTimeProvider, TimeProvider};
pub use domain::messaging::services::{ChatService, ChatServiceError};
pub use domain::realtime::services::{
    Connection, ConnectionEvent as TransportEvent, ConnectionEventHandler, Connector,
    RealtimeSubscriber,
};

pub mod transports {
    //! Ready-made implementations of the network ports.

    pub use crate::infra::rest::{RestChatService, RestConfig};
    #[cfg(not(target_arch = "wasm32"))]
    pub use crate::infra::realtime::WebSocketConnector;
}


pub mod app;
mod client_event;
mod engine;
mod engine_builder;
mod error;

#[cfg(feature = "test")]
pub mod domain;
#[cfg(not(feature = "test"))]
pub(crate) mod domain;

#[cfg(feature = "test")]
pub mod infra;
#[cfg(not(feature = "test"))]
pub(crate) mod infra;
