// chatsync/chatsync-core-integration-tests
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

mod delegate;
mod initialize;
mod live_updates;
mod reconnect;
