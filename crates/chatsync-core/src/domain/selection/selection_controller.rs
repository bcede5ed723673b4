// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use parking_lot::Mutex;

use crate::domain::shared::models::ConversationId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    None,
    /// The active conversation changed, its history is not requested yet.
    Switching,
    LoadingMessages,
    Live,
    /// Loading the history of the active conversation failed.
    LoadFailed,
}

/// Proof of a selection, handed out when a selection begins and checked when its asynchronous
/// results come back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTicket {
    pub conversation_id: ConversationId,
    generation: u64,
}

/// Tracks the active conversation and decides which message load is allowed to land.
///
/// Every selection bumps a monotonic generation counter. A result may only be applied if the
/// generation captured in its ticket is still the current one.
#[derive(Default)]
pub struct SelectionController {
    inner: Mutex<SelectionInner>,
}

#[derive(Default)]
struct SelectionInner {
    active: Option<ConversationId>,
    generation: u64,
    state: SelectionState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<ConversationId> {
        self.inner.lock().active.clone()
    }

    pub fn state(&self) -> SelectionState {
        self.inner.lock().state
    }

    pub fn generation(&self) -> u64 {
        self.inner.lock().generation
    }

    pub fn begin(&self, conversation_id: ConversationId) -> SelectionTicket {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        inner.active = Some(conversation_id.clone());
        inner.state = SelectionState::Switching;

        SelectionTicket {
            conversation_id,
            generation: inner.generation,
        }
    }

    pub fn is_current(&self, ticket: &SelectionTicket) -> bool {
        self.inner.lock().generation == ticket.generation
    }

    /// Moves the selection identified by `ticket` into `state`. Returns false and leaves
    /// everything untouched if the ticket is stale.
    pub fn transition(&self, ticket: &SelectionTicket, state: SelectionState) -> bool {
        let mut inner = self.inner.lock();
        if inner.generation != ticket.generation {
            return false;
        }
        inner.state = state;
        true
    }

    /// Drops the active conversation and invalidates all outstanding tickets.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        inner.active = None;
        inner.state = SelectionState::None;
    }
}
