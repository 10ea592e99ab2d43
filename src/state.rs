//! Shared application state for all routes. Built once at startup and read-only afterwards.

use crate::config::Settings;
use crate::db::Database;
use crate::response::ApiVersion;
use axum::extract::FromRef;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub db: Arc<dyn Database>,
    pub version: ApiVersion,
}

impl AppState {
    pub fn new(settings: Settings, db: Arc<dyn Database>, version: ApiVersion) -> Self {
        AppState {
            settings: Arc::new(settings),
            db,
            version,
        }
    }
}

impl FromRef<AppState> for ApiVersion {
    fn from_ref(state: &AppState) -> Self {
        state.version.clone()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("settings", &self.settings)
            .field("version", &self.version)
            .field("db_placeholder", &self.db.is_placeholder())
            .finish()
    }
}
