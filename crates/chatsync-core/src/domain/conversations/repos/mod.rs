// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use conversation_store::{ConversationStore, InboundActivity};

mod conversation_store;
