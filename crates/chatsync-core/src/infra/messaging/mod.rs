// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use in_memory_message_stream::InMemoryMessageStream;

mod in_memory_message_stream;
