// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use chatsync_utils::{SendUnlessWasm, SyncUnlessWasm};

use crate::domain::messaging::models::{Message, MessageHandle, MessageItem};
use crate::domain::shared::models::{ConversationId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteAppend {
    Appended,
    /// An entry with the same identity exists among the most recent entries.
    Duplicate,
    /// The message does not belong to the conversation the stream is bound to.
    Rejected,
}

/// Message history of exactly one conversation, oldest message first.
pub trait MessageStream: SendUnlessWasm + SyncUnlessWasm {
    fn conversation_id(&self) -> Option<ConversationId>;
    fn get_all(&self) -> Vec<MessageItem>;

    /// Binds the stream to `conversation_id` and drops all entries.
    fn reset(&self, conversation_id: Option<ConversationId>);

    /// Replaces all entries with `messages` (which arrive newest first) sorted by ascending
    /// timestamp. If the stream is already bound to `conversation_id`, entries appended since
    /// the `reset` follow the history unless the history contains them already.
    fn load(&self, conversation_id: &ConversationId, messages: Vec<Message>, current_user: &UserId);

    fn append_local(&self, message: Message, current_user: &UserId) -> MessageHandle;
    fn append_remote(&self, message: Message, current_user: &UserId) -> RemoteAppend;

    /// Removes the entry identified by `handle`. Returns false if it is gone already.
    fn rollback(&self, handle: MessageHandle) -> bool;
    fn mark_confirmed(&self, handle: MessageHandle) -> bool;
}
