// src/web/hostel_handlers.rs
use crate::{
    error::AppResult,
    models::hostel::CreateHostelForm,
    services::hostel_service,
    state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

// GET /api/hostel
pub async fn handle_list_hostels(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let hostels = hostel_service::find_all_hostels(&state.db_pool).await?;
    Ok(Json(json!({ "success": true, "hostels": hostels })))
}

// POST /api/hostel/create
pub async fn handle_create_hostel(
    State(state): State<AppState>,
    payload: Result<Json<CreateHostelForm>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(form) = payload?;
    tracing::info!("Creating hostel '{}'", form.name);

    let hostel = hostel_service::create_hostel(&state.db_pool, &form.name, form.capacity).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "hostel": hostel })),
    ))
}
