// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};

use crate::domain::shared::models::{ConversationId, UserId};

/// A chat message as exchanged with the server.
///
/// Messages have no server-assigned identifier. Whether a message belongs to the current user
/// is not part of the message itself but derived by comparing `sender_id` with the id of the
/// logged-in user wherever it is needed.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub sender_id: UserId,
    pub conversation_id: Option<ConversationId>,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(
        sender_id: impl Into<UserId>,
        conversation_id: Option<ConversationId>,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            sender_id: sender_id.into(),
            conversation_id,
            content: content.into(),
            timestamp,
        }
    }

    pub fn is_sent_by(&self, user_id: &UserId) -> bool {
        &self.sender_id == user_id
    }

    /// Compares the (sender, content, timestamp) triple, which is the best notion of identity
    /// available without a server-assigned id. Two distinct messages with the same content sent
    /// by the same user within the same timestamp are indistinguishable by this key.
    pub fn has_same_identity(&self, other: &Message) -> bool {
        self.sender_id == other.sender_id
            && self.timestamp == other.timestamp
            && self.content == other.content
    }
}
