// src/web/stats_handlers.rs
use crate::{
    error::AppResult,
    models::stats::StatsSnapshot,
    services::stats_service,
    state::AppState,
    templates::AnalyticsPage,
};
use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Json},
};
use serde::Serialize;

#[derive(Serialize)]
struct StatsResponse {
    success: bool,
    #[serde(flatten)]
    stats: StatsSnapshot,
}

// GET /api/student/stats
pub async fn handle_get_stats(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let stats = stats_service::get_stats(&state.db_pool).await?;
    Ok(Json(StatsResponse { success: true, stats }))
}

// GET /dashboard/analytics
pub async fn show_analytics_page(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    tracing::debug!("GET /dashboard/analytics: rendering charts...");
    let stats = stats_service::get_stats(&state.db_pool).await?;
    let page = AnalyticsPage::from_snapshot(&stats);
    Ok(Html(page.render()?))
}
