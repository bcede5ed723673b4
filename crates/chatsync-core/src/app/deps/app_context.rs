// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use parking_lot::RwLock;

use crate::domain::general::models::EngineState;
use crate::domain::shared::models::{UserId, UserIdentity};
use crate::error::ValidationError;

pub struct AppConfig {
    /// The number of trailing stream entries that are checked for duplicates when a remote
    /// message comes in.
    pub dedup_window: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { dedup_window: 20 }
    }
}

/// Session scoped state shared by all services.
pub struct AppContext {
    identity: RwLock<Option<UserIdentity>>,
    engine_state: RwLock<EngineState>,
    pub config: AppConfig,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            identity: Default::default(),
            engine_state: Default::default(),
            config,
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(Default::default())
    }
}

impl AppContext {
    pub fn identity(&self) -> Result<UserIdentity, ValidationError> {
        self.identity
            .read()
            .clone()
            .ok_or(ValidationError::NotInitialized)
    }

    pub fn current_user_id(&self) -> Result<UserId, ValidationError> {
        self.identity
            .read()
            .as_ref()
            .map(|identity| identity.user_id.clone())
            .ok_or(ValidationError::NotInitialized)
    }

    pub fn is_current_user(&self, user_id: &UserId) -> bool {
        self.identity
            .read()
            .as_ref()
            .map(|identity| &identity.user_id == user_id)
            .unwrap_or(false)
    }

    /// Fails if another identity is set already.
    pub fn set_identity(&self, identity: UserIdentity) -> Result<(), ValidationError> {
        let mut current = self.identity.write();
        if current.is_some() {
            return Err(ValidationError::AlreadyInitialized);
        }
        current.replace(identity);
        Ok(())
    }

    pub fn reset_identity(&self) {
        self.identity.write().take();
    }

    pub fn engine_state(&self) -> EngineState {
        *self.engine_state.read()
    }

    /// Returns true if `state` differs from the previous state.
    pub fn set_engine_state(&self, state: EngineState) -> bool {
        let mut current = self.engine_state.write();
        if *current == state {
            return false;
        }
        *current = state;
        true
    }
}
