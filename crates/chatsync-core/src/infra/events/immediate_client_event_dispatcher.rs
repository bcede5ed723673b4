// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::{OnceLock, Weak};

use tracing::warn;

use crate::app::event_handlers::ClientEventDispatcherTrait;
use crate::engine::SyncEngineInner;
use crate::{ClientDelegate, ClientEvent, SyncEngine};

/// Forwards events to the delegate on the calling task.
pub struct ImmediateClientEventDispatcher {
    engine_inner: OnceLock<Weak<SyncEngineInner>>,
    delegate: Option<Box<dyn ClientDelegate>>,
}

impl ImmediateClientEventDispatcher {
    pub fn new(delegate: Option<Box<dyn ClientDelegate>>) -> Self {
        Self {
            engine_inner: Default::default(),
            delegate,
        }
    }

    pub(crate) fn set_engine_inner(&self, engine_inner: Weak<SyncEngineInner>) {
        if self.engine_inner.set(engine_inner).is_err() {
            warn!("Tried to set the engine on ImmediateClientEventDispatcher more than once.");
        }
    }
}

impl ClientEventDispatcherTrait for ImmediateClientEventDispatcher {
    fn dispatch_event(&self, event: ClientEvent) {
        let Some(delegate) = &self.delegate else {
            return;
        };

        let Some(engine_inner) = self.engine_inner.get().and_then(Weak::upgrade) else {
            return;
        };

        delegate.handle_event(SyncEngine::from(engine_inner), event);
    }
}
