// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use conversation_id::ConversationId;
pub use user_id::UserId;
pub use user_identity::UserIdentity;

mod conversation_id;
mod user_id;
mod user_identity;
