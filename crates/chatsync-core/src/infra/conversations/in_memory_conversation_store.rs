// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::domain::conversations::models::{Conversation, LastMessage};
use crate::domain::conversations::repos::{ConversationStore, InboundActivity};
use crate::domain::shared::models::{ConversationId, UserId};

#[derive(Default)]
pub struct InMemoryConversationStore {
    conversations: RwLock<Vec<Conversation>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sort_by_activity(conversations: &mut [Conversation]) {
    // `sort_by` is stable, ties keep their relative order.
    conversations.sort_by(|lhs, rhs| rhs.last_activity().cmp(&lhs.last_activity()));
}

impl ConversationStore for InMemoryConversationStore {
    fn get(&self, id: &ConversationId) -> Option<Conversation> {
        self.conversations
            .read()
            .iter()
            .find(|conversation| &conversation.id == id)
            .cloned()
    }

    fn get_all(&self) -> Vec<Conversation> {
        self.conversations.read().clone()
    }

    fn most_recent(&self) -> Option<Conversation> {
        self.conversations.read().first().cloned()
    }

    fn is_empty(&self) -> bool {
        self.conversations.read().is_empty()
    }

    fn set_all(&self, conversations: Vec<Conversation>) {
        let mut conversations = conversations;
        sort_by_activity(&mut conversations);
        *self.conversations.write() = conversations;
    }

    fn upsert_preview(&self, conversation: Conversation) {
        let mut conversations = self.conversations.write();

        match conversations
            .iter_mut()
            .find(|existing| existing.id == conversation.id)
        {
            Some(existing) => *existing = conversation,
            None => conversations.insert(0, conversation),
        }

        sort_by_activity(&mut conversations);
    }

    fn apply_inbound_activity(
        &self,
        conversation_id: &ConversationId,
        sender_id: &UserId,
        content: &str,
        timestamp: DateTime<Utc>,
    ) -> InboundActivity {
        let mut conversations = self.conversations.write();

        let Some(conversation) = conversations
            .iter_mut()
            .find(|conversation| &conversation.id == conversation_id)
        else {
            return InboundActivity::UnknownConversation;
        };

        conversation.last_message = Some(LastMessage {
            sender_id: sender_id.clone(),
            content: content.to_string(),
            timestamp,
        });

        sort_by_activity(&mut conversations);
        InboundActivity::Applied
    }

    fn increment_unread(&self, conversation_id: &ConversationId) {
        if let Some(conversation) = self
            .conversations
            .write()
            .iter_mut()
            .find(|conversation| &conversation.id == conversation_id)
        {
            conversation.unread_count = conversation.unread_count.saturating_add(1);
        }
    }

    fn mark_read(&self, conversation_id: &ConversationId) {
        if let Some(conversation) = self
            .conversations
            .write()
            .iter_mut()
            .find(|conversation| &conversation.id == conversation_id)
        {
            conversation.unread_count = 0;
        }
    }

    fn clear(&self) {
        self.conversations.write().clear();
    }
}
