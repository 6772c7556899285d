use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::AppConfig;
use crate::db::Store;

pub struct AppState {
    pub store: Mutex<Store>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(store: Store, config: AppConfig) -> Self {
        Self {
            store: Mutex::new(store),
            config,
        }
    }

    /// Every request runs to completion while holding this guard.
    pub fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
