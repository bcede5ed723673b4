// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::debug;

use crate::domain::messaging::models::{DeliveryState, Message, MessageHandle, MessageItem};
use crate::domain::messaging::repos::{MessageStream, RemoteAppend};
use crate::domain::shared::models::{ConversationId, UserId};

pub struct InMemoryMessageStream {
    /// Number of trailing entries `append_remote` inspects for duplicates.
    dedup_window: usize,
    next_handle: AtomicU64,
    inner: RwLock<StreamInner>,
}

#[derive(Default)]
struct StreamInner {
    conversation_id: Option<ConversationId>,
    entries: Vec<Entry>,
}

struct Entry {
    handle: Option<MessageHandle>,
    item: MessageItem,
}

impl InMemoryMessageStream {
    pub fn new(dedup_window: usize) -> Self {
        Self {
            dedup_window,
            next_handle: AtomicU64::new(1),
            inner: Default::default(),
        }
    }
}

impl Entry {
    fn confirmed(message: Message, current_user: &UserId) -> Self {
        Entry {
            handle: None,
            item: MessageItem {
                is_mine: message.is_sent_by(current_user),
                message,
                delivery: DeliveryState::Confirmed,
            },
        }
    }
}

impl MessageStream for InMemoryMessageStream {
    fn conversation_id(&self) -> Option<ConversationId> {
        self.inner.read().conversation_id.clone()
    }

    fn get_all(&self) -> Vec<MessageItem> {
        self.inner
            .read()
            .entries
            .iter()
            .map(|entry| entry.item.clone())
            .collect()
    }

    fn reset(&self, conversation_id: Option<ConversationId>) {
        let mut inner = self.inner.write();
        inner.conversation_id = conversation_id;
        inner.entries.clear();
    }

    fn load(
        &self,
        conversation_id: &ConversationId,
        messages: Vec<Message>,
        current_user: &UserId,
    ) {
        let mut entries = messages
            .into_iter()
            .map(|message| Entry::confirmed(message, current_user))
            .collect::<Vec<_>>();
        // Stable, so messages sharing a timestamp keep the server's relative order.
        entries.sort_by_key(|entry| entry.item.message.timestamp);

        let mut inner = self.inner.write();

        // Entries appended to this binding while the history was in flight go after it,
        // unless the snapshot already contains them.
        if inner.conversation_id.as_ref() == Some(conversation_id) {
            let appended = std::mem::take(&mut inner.entries);
            let history_len = entries.len();
            for entry in appended {
                let loaded = entries[..history_len]
                    .iter_mut()
                    .find(|loaded| loaded.item.message.has_same_identity(&entry.item.message));
                match loaded {
                    // The server already has it. Keep the handle so the sender can still settle it.
                    Some(loaded) => loaded.handle = loaded.handle.or(entry.handle),
                    None => entries.push(entry),
                }
            }
        }

        inner.conversation_id = Some(conversation_id.clone());
        inner.entries = entries;
    }

    fn append_local(&self, message: Message, current_user: &UserId) -> MessageHandle {
        let handle = MessageHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));

        self.inner.write().entries.push(Entry {
            handle: Some(handle),
            item: MessageItem {
                is_mine: message.is_sent_by(current_user),
                message,
                delivery: DeliveryState::Pending,
            },
        });

        handle
    }

    fn append_remote(&self, message: Message, current_user: &UserId) -> RemoteAppend {
        let mut inner = self.inner.write();

        if inner.conversation_id.is_none() || message.conversation_id != inner.conversation_id {
            return RemoteAppend::Rejected;
        }

        // Messages carry no unique id, so this can only compare (sender, content, timestamp).
        // Two genuinely different messages matching on all three would be dropped here.
        let is_duplicate = inner
            .entries
            .iter()
            .rev()
            .take(self.dedup_window)
            .any(|entry| entry.item.message.has_same_identity(&message));

        if is_duplicate {
            debug!(
                "Dropping message from {} that is already in the stream.",
                message.sender_id
            );
            return RemoteAppend::Duplicate;
        }

        inner.entries.push(Entry::confirmed(message, current_user));
        RemoteAppend::Appended
    }

    fn rollback(&self, handle: MessageHandle) -> bool {
        let mut inner = self.inner.write();
        let Some(idx) = inner
            .entries
            .iter()
            .position(|entry| entry.handle == Some(handle))
        else {
            return false;
        };
        inner.entries.remove(idx);
        true
    }

    fn mark_confirmed(&self, handle: MessageHandle) -> bool {
        let mut inner = self.inner.write();
        let Some(entry) = inner
            .entries
            .iter_mut()
            .find(|entry| entry.handle == Some(handle))
        else {
            return false;
        };
        entry.item.delivery = DeliveryState::Confirmed;
        true
    }
}
