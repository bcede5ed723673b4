// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};

use chatsync_utils::{SendUnlessWasm, SyncUnlessWasm};

use crate::domain::conversations::models::Conversation;
use crate::domain::shared::models::{ConversationId, UserId};

/// Result of feeding a new message into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundActivity {
    /// The conversation's summary was updated and the list re-sorted.
    Applied,
    /// The conversation is not known. Nothing was changed; the caller should re-fetch the
    /// previews instead of guessing what the conversation looks like.
    UnknownConversation,
}

/// Ordered collection of conversation previews.
///
/// Implementations keep their items sorted by `Conversation::last_activity` in descending
/// order at all times. Sorting is stable, so conversations with equal activity keep their
/// previous relative order.
pub trait ConversationStore: SendUnlessWasm + SyncUnlessWasm {
    fn get(&self, id: &ConversationId) -> Option<Conversation>;
    fn get_all(&self) -> Vec<Conversation>;
    fn most_recent(&self) -> Option<Conversation>;
    fn is_empty(&self) -> bool;

    /// Replaces all items with `conversations`.
    fn set_all(&self, conversations: Vec<Conversation>);
    /// Replaces the conversation with the same id or inserts it at the head, then re-sorts.
    fn upsert_preview(&self, conversation: Conversation);
    fn apply_inbound_activity(
        &self,
        conversation_id: &ConversationId,
        sender_id: &UserId,
        content: &str,
        timestamp: DateTime<Utc>,
    ) -> InboundActivity;

    fn increment_unread(&self, conversation_id: &ConversationId);
    fn mark_read(&self, conversation_id: &ConversationId);

    fn clear(&self);
}
