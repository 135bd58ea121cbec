use std::sync::Arc;

use newsdesk_core::content::status::Role;
use newsdesk_core::events::bus::EventBus;
use newsdesk_core::store::ContentStore;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::users::{UserDirectory, UserError};

/// Shared application state, passed to all handlers via Axum's `State`
/// extractor. Wrapped in `Arc` so cloning is cheap. The store is the
/// single writer-serialized system of record for this instance.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    store: RwLock<ContentStore>,
    users: RwLock<UserDirectory>,
    config: AppConfig,
    event_bus: EventBus,
}

impl AppState {
    pub fn new(config: AppConfig, event_bus: EventBus) -> Self {
        Self {
            inner: Arc::new(InnerState {
                store: RwLock::new(ContentStore::new()),
                users: RwLock::new(UserDirectory::new()),
                config,
                event_bus,
            }),
        }
    }

    pub fn store(&self) -> &RwLock<ContentStore> {
        &self.inner.store
    }

    pub fn users(&self) -> &RwLock<UserDirectory> {
        &self.inner.users
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.inner.event_bus
    }

    /// Create the admin account named in the config. Called once at boot.
    pub async fn seed_admin(&self) -> Result<Uuid, UserError> {
        let config = self.config();
        let mut users = self.users().write().await;
        users.create(&config.admin_username, &config.admin_password, Role::Admin)
    }
}
