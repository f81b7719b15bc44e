// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{LoginForm, UserSummary},
    services::{auth_service, user_service},
    state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Json},
};
use serde_json::json;

// POST /api/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    payload: Result<Json<LoginForm>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(form) = payload?;
    tracing::info!("Login attempt for: {}", form.email);

    let Some(user) = user_service::find_user_by_email(&state.db_pool, form.email.trim()).await? else {
        tracing::warn!("Login failed: unknown email {}", form.email);
        return Err(AppError::InvalidCredentials);
    };

    if !auth_service::verify_password(&form.password, &user.password_hash).await? {
        tracing::warn!("Login failed: wrong password for {}", form.email);
        return Err(AppError::InvalidCredentials);
    }

    let token = state.token_keys.issue(&user.id, user.is_admin)?;
    tracing::info!("✅ Login succeeded for: {}", user.id);

    Ok(Json(json!({
        "success": true,
        "token": token,
        "user": UserSummary::from(&user),
    })))
}
