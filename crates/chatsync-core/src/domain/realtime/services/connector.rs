// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

use chatsync_utils::{PinnedFuture, SendUnlessWasm, SyncUnlessWasm};

use crate::domain::realtime::models::ConnectionError;
use crate::domain::shared::models::UserId;

/// Events a transport reports for an established connection.
///
/// Transports must deliver events one at a time and await the returned future before
/// delivering the next one. This is what keeps inbound frames in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionEvent {
    Frame(String),
    Disconnected { error: Option<ConnectionError> },
}

#[cfg(target_arch = "wasm32")]
pub type ConnectionEventHandler = Box<dyn Fn(ConnectionEvent) -> PinnedFuture<()>>;
#[cfg(not(target_arch = "wasm32"))]
pub type ConnectionEventHandler =
    Box<dyn Fn(ConnectionEvent) -> PinnedFuture<()> + Send + Sync>;

/// Opens push connections keyed by user identity.
#[cfg_attr(target_arch = "wasm32", async_trait(? Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Connector: SendUnlessWasm + SyncUnlessWasm {
    async fn connect(
        &self,
        user_id: &UserId,
        event_handler: ConnectionEventHandler,
    ) -> Result<Box<dyn Connection>, ConnectionError>;
}

pub trait Connection: SendUnlessWasm + SyncUnlessWasm {
    fn send_frame(&self, frame: String) -> Result<()>;
    fn disconnect(&self);
}
