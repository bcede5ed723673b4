// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::mem;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use chatsync_utils::PinnedFuture;

use crate::app::deps::DynClientEventDispatcher;
use crate::client_event::ConnectionEvent as ClientConnectionEvent;
use crate::domain::realtime::models::{
    ConnectionError, ConnectionState, OutboundEvent, RealtimeEvent, SubscriptionId,
};
use crate::domain::realtime::services::{
    Connection, ConnectionEvent, Connector, RealtimeChannel, RealtimeSubscriber,
};
use crate::domain::shared::models::UserId;
use crate::infra::realtime::{decode_frame, encode_outbound_event};
use crate::ClientEvent;

/// `RealtimeChannel` on top of a `Connector`. Owns at most one connection at a time.
pub struct SocketRealtimeChannel {
    inner: Arc<ChannelInner>,
}

struct ChannelInner {
    connector: Box<dyn Connector>,
    client_event_dispatcher: DynClientEventDispatcher,
    state: Mutex<ChannelState>,
    subscribers: RwLock<Vec<(SubscriptionId, RealtimeSubscriber)>>,
    next_session: AtomicU64,
    next_subscription_id: AtomicU64,
    next_frame_id: AtomicU64,
}

enum ChannelState {
    Disconnected,
    Connecting {
        user_id: UserId,
        session: u64,
    },
    Connected {
        user_id: UserId,
        session: u64,
        connection: Box<dyn Connection>,
    },
}

impl ChannelState {
    fn session(&self) -> Option<u64> {
        match self {
            Self::Disconnected => None,
            Self::Connecting { session, .. } | Self::Connected { session, .. } => Some(*session),
        }
    }
}

impl SocketRealtimeChannel {
    pub fn new(
        connector: Box<dyn Connector>,
        client_event_dispatcher: DynClientEventDispatcher,
    ) -> Self {
        Self {
            inner: Arc::new(ChannelInner {
                connector,
                client_event_dispatcher,
                state: Mutex::new(ChannelState::Disconnected),
                subscribers: Default::default(),
                next_session: AtomicU64::new(1),
                next_subscription_id: AtomicU64::new(1),
                next_frame_id: AtomicU64::new(1),
            }),
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(? Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RealtimeChannel for SocketRealtimeChannel {
    async fn connect(&self, user_id: &UserId) -> Result<(), ConnectionError> {
        let session = {
            let mut state = self.inner.state.lock();

            match &*state {
                ChannelState::Connected { user_id: current, .. } if current == user_id => {
                    return Ok(())
                }
                ChannelState::Connecting { user_id: current, .. } if current == user_id => {
                    return Err(ConnectionError::InProgress)
                }
                _ => (),
            }

            if let ChannelState::Connected { connection, .. } =
                mem::replace(&mut *state, ChannelState::Disconnected)
            {
                info!("Switching realtime connection to {user_id}.");
                connection.disconnect();
            }

            let session = self.inner.next_session.fetch_add(1, Ordering::SeqCst);
            *state = ChannelState::Connecting {
                user_id: user_id.clone(),
                session,
            };
            session
        };

        let inner = Arc::downgrade(&self.inner);
        let result = self
            .inner
            .connector
            .connect(
                user_id,
                Box::new(move |event| {
                    let inner = inner.clone();
                    Box::pin(async move {
                        let Some(inner) = Weak::upgrade(&inner) else {
                            return;
                        };
                        inner.handle_connection_event(session, event).await
                    }) as PinnedFuture<_>
                }),
            )
            .await;

        {
            let mut state = self.inner.state.lock();
            let is_current_attempt = state.session() == Some(session);

            match result {
                Ok(connection) if is_current_attempt => {
                    *state = ChannelState::Connected {
                        user_id: user_id.clone(),
                        session,
                        connection,
                    };
                }
                Ok(connection) => {
                    connection.disconnect();
                    return Err(ConnectionError::Aborted);
                }
                Err(err) => {
                    if is_current_attempt {
                        *state = ChannelState::Disconnected;
                    }
                    return Err(err);
                }
            }
        }

        info!("Realtime channel connected for {user_id}.");
        self.inner
            .client_event_dispatcher
            .dispatch_event(ClientEvent::ConnectionStatusChanged {
                event: ClientConnectionEvent::Connect,
            });

        Ok(())
    }

    fn disconnect(&self) {
        let previous = mem::replace(&mut *self.inner.state.lock(), ChannelState::Disconnected);
        self.inner.subscribers.write().clear();

        match previous {
            ChannelState::Disconnected => (),
            ChannelState::Connecting { .. } => {
                debug!("Realtime channel disconnected while connecting.")
            }
            ChannelState::Connected { connection, .. } => {
                connection.disconnect();
                self.inner
                    .client_event_dispatcher
                    .dispatch_event(ClientEvent::ConnectionStatusChanged {
                        event: ClientConnectionEvent::Disconnect { error: None },
                    });
            }
        }
    }

    fn subscribe(&self, handler: RealtimeSubscriber) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_subscription_id.fetch_add(1, Ordering::SeqCst));
        self.inner.subscribers.write().push((id, handler));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.inner
            .subscribers
            .write()
            .retain(|(subscription_id, _)| subscription_id != &id);
    }

    fn send(&self, event: OutboundEvent) -> Result<(), ConnectionError> {
        let state = self.inner.state.lock();
        let ChannelState::Connected { connection, .. } = &*state else {
            return Err(ConnectionError::NotConnected);
        };

        let id = self.inner.next_frame_id.fetch_add(1, Ordering::SeqCst);
        let frame = encode_outbound_event(id, &event).map_err(|err| ConnectionError::Generic {
            msg: err.to_string(),
        })?;

        connection
            .send_frame(frame)
            .map_err(|err| ConnectionError::Generic {
                msg: err.to_string(),
            })
    }

    fn connection_state(&self) -> ConnectionState {
        match &*self.inner.state.lock() {
            ChannelState::Disconnected => ConnectionState::Disconnected,
            ChannelState::Connecting { .. } => ConnectionState::Connecting,
            ChannelState::Connected { .. } => ConnectionState::Connected,
        }
    }
}

impl ChannelInner {
    async fn handle_connection_event(&self, session: u64, event: ConnectionEvent) {
        if self.state.lock().session() != Some(session) {
            debug!("Ignoring event from a stale realtime connection.");
            return;
        }

        match event {
            ConnectionEvent::Frame(raw) => {
                let event = decode_frame(&raw);

                if let RealtimeEvent::Unknown { raw } = &event {
                    warn!("Dropping unrecognized realtime frame: {raw}");
                    return;
                }

                let handlers = self
                    .subscribers
                    .read()
                    .iter()
                    .map(|(_, handler)| handler.clone())
                    .collect::<Vec<_>>();

                for handler in handlers {
                    handler(event.clone()).await;
                }
            }
            ConnectionEvent::Disconnected { error } => {
                {
                    let mut state = self.state.lock();
                    if state.session() != Some(session) {
                        return;
                    }
                    *state = ChannelState::Disconnected;
                }
                self.subscribers.write().clear();

                match &error {
                    Some(error) => warn!("Realtime connection dropped: {error}"),
                    None => info!("Realtime connection closed."),
                }

                self.client_event_dispatcher
                    .dispatch_event(ClientEvent::ConnectionStatusChanged {
                        event: ClientConnectionEvent::Disconnect { error },
                    });
            }
        }
    }
}
