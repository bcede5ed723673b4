// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use parking_lot::Mutex;
use tracing::{info, warn};

use chatsync_proc_macros::InjectDependencies;

use crate::app::deps::{DynAppContext, DynRealtimeChannel};
use crate::domain::realtime::models::{ConnectionState, OutboundEvent, SubscriptionId};
use crate::domain::realtime::services::RealtimeSubscriber;
use crate::error::SyncError;

/// Owns the engine's subscription on the realtime channel.
#[derive(InjectDependencies)]
pub struct ConnectionService {
    #[inject]
    ctx: DynAppContext,
    #[inject]
    realtime_channel: DynRealtimeChannel,
    subscription: Mutex<Option<SubscriptionId>>,
}

impl ConnectionService {
    /// Connects the realtime channel for the current user and installs `subscriber` as the
    /// engine's handler. Does nothing if the channel is connected already.
    pub async fn connect(&self, subscriber: RealtimeSubscriber) -> Result<(), SyncError> {
        let user_id = self.ctx.current_user_id()?;

        if self.realtime_channel.connection_state() == ConnectionState::Connected {
            return Ok(());
        }

        // Subscribe before connecting so that no frame slips through in between.
        let subscription = self.realtime_channel.subscribe(subscriber);
        if let Some(previous) = self.subscription.lock().replace(subscription) {
            self.realtime_channel.unsubscribe(previous);
        }

        match self.realtime_channel.connect(&user_id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!("Realtime channel unavailable, continuing without live updates. {err}");
                Err(err.into())
            }
        }
    }

    pub fn disconnect(&self) {
        info!("Disconnecting realtime channel…");
        self.subscription.lock().take();
        self.realtime_channel.disconnect();
    }

    pub fn subscribe(&self, subscriber: RealtimeSubscriber) -> SubscriptionId {
        self.realtime_channel.subscribe(subscriber)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.realtime_channel.unsubscribe(id)
    }

    pub fn send(&self, event: OutboundEvent) -> Result<(), SyncError> {
        Ok(self.realtime_channel.send(event)?)
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.realtime_channel.connection_state()
    }
}
