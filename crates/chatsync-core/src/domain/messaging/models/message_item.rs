// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use super::Message;

/// Opaque reference to an optimistically appended message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageHandle(pub(crate) u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryState {
    /// Appended locally, the server did not accept it yet.
    Pending,
    Confirmed,
}

/// A message as presented in the message list of the active conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageItem {
    pub message: Message,
    pub is_mine: bool,
    pub delivery: DeliveryState,
}
