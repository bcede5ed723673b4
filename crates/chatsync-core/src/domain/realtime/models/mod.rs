// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use connection_error::ConnectionError;
pub use connection_state::ConnectionState;
pub use realtime_event::{OutboundEvent, RealtimeEvent, SubscriptionId};

mod connection_error;
mod connection_state;
mod realtime_event;
