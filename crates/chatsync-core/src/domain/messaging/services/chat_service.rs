// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;

use chatsync_utils::{SendUnlessWasm, SyncUnlessWasm};

use crate::domain::conversations::models::Conversation;
use crate::domain::messaging::models::Message;
use crate::domain::shared::models::{ConversationId, UserId};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ChatServiceError {
    #[error("Request failed: {msg}")]
    Network { msg: String },
    #[error("Server rejected the request with status {status}: {msg}")]
    Rejected { status: u16, msg: String },
    #[error("Unexpected response: {msg}")]
    InvalidResponse { msg: String },
}

/// REST backend owning conversations and their messages.
#[cfg_attr(target_arch = "wasm32", async_trait(? Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait ChatService: SendUnlessWasm + SyncUnlessWasm {
    async fn get_user_chat_previews(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Conversation>, ChatServiceError>;

    /// Returns all messages of the conversation, newest first.
    async fn get_chat_all_messages(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<Message>, ChatServiceError>;

    async fn send_sync(
        &self,
        message: &Message,
        conversation_id: &ConversationId,
    ) -> Result<(), ChatServiceError>;

    async fn create_chat(
        &self,
        name: &str,
        member_ids: &[UserId],
    ) -> Result<ConversationId, ChatServiceError>;
}
