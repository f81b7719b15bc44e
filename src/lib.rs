// src/lib.rs
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod templates;
pub mod web;

use crate::{config::Config, error::AppResult, state::AppState};

/// Connects the pool, runs migrations, bootstraps the admin and builds the state.
pub async fn create_app_state(config: Config) -> AppResult<AppState> {
    let db_pool = db::create_db_pool(&config.database_url).await?;

    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        services::user_service::ensure_admin(&db_pool, email, password, config.bcrypt_cost).await?;
    }

    Ok(AppState::new(db_pool, config))
}
