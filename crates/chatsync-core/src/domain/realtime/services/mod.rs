// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use connector::{Connection, ConnectionEvent, ConnectionEventHandler, Connector};
pub use realtime_channel::{RealtimeChannel, RealtimeSubscriber};

mod connector;
mod realtime_channel;
