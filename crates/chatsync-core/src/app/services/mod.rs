// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use connection_service::ConnectionService;
pub use conversations_service::ConversationsService;
pub use messages_service::{MessagesService, SelectionOutcome};

mod connection_service;
mod conversations_service;
mod messages_service;
