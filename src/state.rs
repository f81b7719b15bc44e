// src/state.rs
use crate::{config::Config, services::auth_service::TokenKeys};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub config: Arc<Config>,
    pub token_keys: TokenKeys,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, config: Config) -> Self {
        let token_keys = TokenKeys::new(&config.jwt_secret, config.token_ttl_hours);
        Self {
            db_pool,
            config: Arc::new(config),
            token_keys,
        }
    }
}

// Lets handlers extract the pool directly
impl axum::extract::FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> SqlitePool {
        state.db_pool.clone()
    }
}

impl axum::extract::FromRef<AppState> for TokenKeys {
    fn from_ref(state: &AppState) -> TokenKeys {
        state.token_keys.clone()
    }
}
