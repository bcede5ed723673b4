// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use chat_service::{ChatService, ChatServiceError};

mod chat_service;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::chat_service::MockChatService;
}
