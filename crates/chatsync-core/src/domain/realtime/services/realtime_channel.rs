// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use async_trait::async_trait;

use chatsync_utils::{PinnedFuture, SendUnlessWasm, SyncUnlessWasm};

use crate::domain::realtime::models::{
    ConnectionError, ConnectionState, OutboundEvent, RealtimeEvent, SubscriptionId,
};
use crate::domain::shared::models::UserId;

#[cfg(target_arch = "wasm32")]
pub type RealtimeSubscriber = Arc<dyn Fn(RealtimeEvent) -> PinnedFuture<()>>;
#[cfg(not(target_arch = "wasm32"))]
pub type RealtimeSubscriber = Arc<dyn Fn(RealtimeEvent) -> PinnedFuture<()> + Send + Sync>;

/// A single push connection per session that fans decoded events out to its subscribers.
///
/// Subscribers are invoked one after another in subscription order and each one is awaited
/// before the next event is delivered.
#[cfg_attr(target_arch = "wasm32", async_trait(? Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RealtimeChannel: SendUnlessWasm + SyncUnlessWasm {
    /// Connects on behalf of `user_id`. Calling this while connected for the same user does
    /// nothing; connecting for another user tears down the existing connection first.
    async fn connect(&self, user_id: &UserId) -> Result<(), ConnectionError>;

    /// Tears down the connection and forgets all subscribers.
    fn disconnect(&self);

    fn subscribe(&self, handler: RealtimeSubscriber) -> SubscriptionId;
    fn unsubscribe(&self, id: SubscriptionId);

    fn send(&self, event: OutboundEvent) -> Result<(), ConnectionError>;

    fn connection_state(&self) -> ConnectionState;
}
