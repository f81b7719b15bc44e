// src/web/routes.rs
use crate::{
    state::AppState,
    web::{auth_handlers, hostel_handlers, mw_admin, mw_auth, stats_handlers, student_handlers},
};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub fn create_router(app_state: AppState) -> Router {
    // --- Public routes ---
    // The dashboard reads stats without a token
    let public_routes = Router::new()
        .route("/api/auth/login", post(auth_handlers::handle_login))
        .route("/api/student/stats", get(stats_handlers::handle_get_stats))
        .route("/dashboard/analytics", get(stats_handlers::show_analytics_page));

    // --- Admin routes ---
    // require_admin only; require_auth is applied by the parent router
    let admin_routes = Router::new()
        .route("/api/student/register-student", post(student_handlers::handle_register_student))
        .route("/api/student/get-all-students", post(student_handlers::handle_get_all_students))
        .route("/api/student/update-student", post(student_handlers::handle_update_student))
        .route("/api/student/delete-student", post(student_handlers::handle_delete_student))
        .route("/api/student/csv", post(student_handlers::handle_csv_student))
        .route("/api/hostel/create", post(hostel_handlers::handle_create_hostel))
        .route_layer(middleware::from_fn(mw_admin::require_admin));

    // --- Authenticated routes (admin routes merged in) ---
    let authenticated_routes = Router::new()
        .route("/api/student/get-student", post(student_handlers::handle_get_student))
        .route("/api/hostel", get(hostel_handlers::handle_list_hostels))
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            mw_auth::require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .with_state(app_state)
}
