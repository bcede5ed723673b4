// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use message::Message;
pub use message_item::{DeliveryState, MessageHandle, MessageItem};

mod message;
mod message_item;
