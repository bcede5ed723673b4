// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

pub mod conversations;
pub mod general;
pub mod messaging;
pub mod realtime;
pub mod selection;
pub mod shared;
