// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use chatsync_utils::{SendUnlessWasm, SyncUnlessWasm};

use crate::domain::general::models::EngineState;
use crate::domain::realtime::models::ConnectionError;
use crate::domain::shared::models::ConversationId;
use crate::SyncEngine;

pub trait ClientDelegate: SendUnlessWasm + SyncUnlessWasm {
    fn handle_event(&self, engine: SyncEngine, event: ClientEvent);
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// The status of the realtime connection has changed.
    ConnectionStatusChanged { event: ConnectionEvent },

    EngineStateChanged { state: EngineState },

    /// The list of conversations, their order or their previews have changed.
    ConversationsChanged,

    /// Another conversation was selected or the selection was cleared.
    SelectionChanged {
        conversation_id: Option<ConversationId>,
    },

    MessagesChanged {
        conversation_id: ConversationId,
        r#type: MessagesEventType,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagesEventType {
    /// The history of the conversation replaced the contents of the message stream.
    Loaded,
    /// A message was appended, either optimistically or received from somebody else.
    Appended,
    /// An optimistic message was removed since sending it failed.
    RolledBack,
    DeliveryConfirmed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionEvent {
    Connect,
    Disconnect { error: Option<ConnectionError> },
}
