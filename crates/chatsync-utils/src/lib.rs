// chatsync/chatsync-utils
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use platform::{PinnedFuture, SendUnlessWasm, SyncUnlessWasm};

mod id_string_macro;
mod platform;
