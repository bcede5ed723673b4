// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use rest_chat_service::{RestChatService, RestConfig};

mod dtos;
mod rest_chat_service;
