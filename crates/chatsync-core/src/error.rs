// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::messaging::services::ChatServiceError;
use crate::domain::realtime::models::ConnectionError;
use crate::domain::shared::models::ConversationId;

/// Errors surfaced by `SyncEngine`. All of them are recoverable, none of them discards state
/// that is unrelated to the failed operation.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum SyncError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Network error: {msg}")]
    Network { msg: String },
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error("The server rejected the request: {msg}")]
    Conflict { msg: String },
}

/// Raised before any network call is made.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Cannot send an empty message.")]
    EmptyMessage,
    #[error("No conversation is selected.")]
    NoActiveConversation,
    #[error("Unknown conversation {0}.")]
    UnknownConversation(ConversationId),
    #[error("The engine is not initialized.")]
    NotInitialized,
    #[error("The engine is initialized already.")]
    AlreadyInitialized,
    #[error("A conversation needs a name and at least one member.")]
    InvalidChatRequest,
}

impl From<ChatServiceError> for SyncError {
    fn from(value: ChatServiceError) -> Self {
        SyncError::Network {
            msg: value.to_string(),
        }
    }
}

impl SyncError {
    /// Maps the failure of a send. A rejection by the server is a conflict, everything else
    /// means the message did not make it.
    pub(crate) fn from_send_error(error: ChatServiceError) -> Self {
        match error {
            ChatServiceError::Rejected { msg, .. } => SyncError::Conflict { msg },
            error => error.into(),
        }
    }
}
