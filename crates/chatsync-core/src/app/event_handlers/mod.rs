// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use chatsync_utils::{SendUnlessWasm, SyncUnlessWasm};

pub use realtime_event_handler::{InboundEventOutcome, RealtimeEventHandler};

use crate::ClientEvent;

mod realtime_event_handler;

#[cfg_attr(feature = "test", mockall::automock)]
pub trait ClientEventDispatcherTrait: SendUnlessWasm + SyncUnlessWasm {
    fn dispatch_event(&self, event: ClientEvent);
}
