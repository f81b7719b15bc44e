// src/web/student_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        hostel::HostelRef,
        student::{RegisterStudentForm, StudentIdForm, UpdateStudentForm},
    },
    services::{export_service, hostel_service, student_service},
    state::AppState,
    web::{mw_auth::CurrentUser, validation},
};
use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

// POST /api/student/register-student
pub async fn handle_register_student(
    State(state): State<AppState>,
    payload: Result<Json<RegisterStudentForm>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(form) = payload?;

    let mut errors = validation::student_fields(&form.fields);
    errors.extend(validation::password(&form.password));
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let student = student_service::register_student(
        &state.db_pool,
        &form.fields,
        &form.password,
        state.config.bcrypt_cost,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "student": student })),
    ))
}

// POST /api/student/get-student (record of the token's own identity)
pub async fn handle_get_student(
    State(state): State<AppState>,
    Extension(CurrentUser(claims)): Extension<CurrentUser>,
) -> AppResult<impl IntoResponse> {
    if claims.is_admin {
        return Err(AppError::BadRequest("Admin cannot access this route".into()));
    }

    let student = student_service::find_student_by_user_id(&state.db_pool, &claims.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student does not exist".into()))?;

    Ok(Json(json!({ "success": true, "student": student })))
}

// POST /api/student/get-all-students
pub async fn handle_get_all_students(
    State(state): State<AppState>,
    payload: Result<Json<HostelRef>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(form) = payload?;

    let hostel = hostel_service::resolve_hostel(&state.db_pool, &form.hostel)
        .await?
        .ok_or_else(|| AppError::NotFound("Invalid hostel".into()))?;
    let students = student_service::find_students_by_hostel(&state.db_pool, &hostel.id).await?;

    Ok(Json(json!({ "success": true, "students": students })))
}

// POST /api/student/update-student
pub async fn handle_update_student(
    State(state): State<AppState>,
    payload: Result<Json<UpdateStudentForm>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(form) = payload?;

    let errors = validation::student_fields(&form.fields);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let student = student_service::update_student(&state.db_pool, &form.id, &form.fields).await?;
    Ok(Json(json!({ "success": true, "student": student })))
}

// POST /api/student/delete-student
pub async fn handle_delete_student(
    State(state): State<AppState>,
    payload: Result<Json<StudentIdForm>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(form) = payload?;

    student_service::delete_student(&state.db_pool, &form.id).await?;
    Ok(Json(json!({ "success": true, "msg": "Student deleted successfully" })))
}

// POST /api/student/csv
pub async fn handle_csv_student(
    State(state): State<AppState>,
    payload: Result<Json<HostelRef>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(form) = payload?;

    let hostel = hostel_service::resolve_hostel(&state.db_pool, &form.hostel)
        .await?
        .ok_or_else(|| AppError::NotFound("Invalid hostel".into()))?;
    let students = student_service::find_students_by_hostel(&state.db_pool, &hostel.id).await?;
    let csv = export_service::students_to_csv(&hostel, &students)?;

    Ok(Json(json!({ "success": true, "csv": csv })))
}
