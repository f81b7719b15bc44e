// src/services/student_service.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        hostel::Hostel,
        student::{Student, StudentFields},
    },
    services::{auth_service, hostel_service, qr_service, user_service},
};
use sqlx::SqlitePool;
use uuid::Uuid;

const STUDENT_COLUMNS: &str = "id, name, cms_id, room_no, batch, dept, course, email, father_name, \
     contact, address, dob, cnic, qr_code, hostel_id, user_id, created_at, updated_at";

pub async fn find_student_by_id(db_pool: &SqlitePool, id: &str) -> AppResult<Option<Student>> {
    let student = sqlx::query_as::<_, Student>(&format!(
        "SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?1"
    ))
    .bind(id)
    .fetch_optional(db_pool)
    .await?;
    Ok(student)
}

pub async fn find_student_by_cms_id(db_pool: &SqlitePool, cms_id: i64) -> AppResult<Option<Student>> {
    let student = sqlx::query_as::<_, Student>(&format!(
        "SELECT {STUDENT_COLUMNS} FROM students WHERE cms_id = ?1"
    ))
    .bind(cms_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(student)
}

pub async fn find_student_by_user_id(db_pool: &SqlitePool, user_id: &str) -> AppResult<Option<Student>> {
    let student = sqlx::query_as::<_, Student>(&format!(
        "SELECT {STUDENT_COLUMNS} FROM students WHERE user_id = ?1"
    ))
    .bind(user_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(student)
}

/// All students of one hostel, in insertion order.
pub async fn find_students_by_hostel(db_pool: &SqlitePool, hostel_id: &str) -> AppResult<Vec<Student>> {
    let students = sqlx::query_as::<_, Student>(&format!(
        "SELECT {STUDENT_COLUMNS} FROM students WHERE hostel_id = ?1 ORDER BY rowid ASC"
    ))
    .bind(hostel_id)
    .fetch_all(db_pool)
    .await?;
    tracing::debug!("Found {} students in hostel {}.", students.len(), hostel_id);
    Ok(students)
}

pub async fn count_students(db_pool: &SqlitePool) -> AppResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
        .fetch_one(db_pool)
        .await?;
    Ok(count)
}

/// Registers a student: identity first, then the profile with its QR code.
///
/// Checks run in order and the first failure wins: cms_id unique, email
/// unused by any identity, hostel resolvable. The two inserts are not
/// wrapped in a transaction; if the student insert fails the identity
/// created just before it is left in place.
pub async fn register_student(
    db_pool: &SqlitePool,
    fields: &StudentFields,
    raw_password: &str,
    bcrypt_cost: u32,
) -> AppResult<Student> {
    tracing::info!("Registering student with cms_id {}", fields.cms_id);

    if find_student_by_cms_id(db_pool, fields.cms_id).await?.is_some() {
        return Err(AppError::Conflict("Student already exists".into()));
    }

    if user_service::find_user_by_email(db_pool, &fields.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let hostel = hostel_service::resolve_hostel(db_pool, &fields.hostel)
        .await?
        .ok_or_else(|| AppError::NotFound("Invalid hostel name".into()))?;

    let password_hash = auth_service::hash_password(raw_password, bcrypt_cost).await?;
    let user = user_service::create_user(db_pool, &fields.email, &password_hash, false)
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                AppError::Conflict("Email already registered".into())
            } else {
                e
            }
        })?;

    let qr_code = qr_for(fields, &hostel)?;
    let student = insert_student(db_pool, fields, &hostel, &user.id, &qr_code)
        .await
        .map_err(|e| {
            tracing::error!(
                "Student insert failed after identity {} was created; identity left in place: {:?}",
                user.id,
                e
            );
            e
        })?;

    tracing::info!("✅ Student {} registered in hostel '{}'.", student.cms_id, hostel.name);
    Ok(student)
}

fn qr_for(fields: &StudentFields, hostel: &Hostel) -> AppResult<String> {
    let payload = qr_service::qr_payload(fields.cms_id, &fields.name, &fields.room_no, &hostel.name);
    qr_service::generate_data_url(&payload)
}

async fn insert_student(
    db_pool: &SqlitePool,
    fields: &StudentFields,
    hostel: &Hostel,
    user_id: &str,
    qr_code: &str,
) -> AppResult<Student> {
    let id = Uuid::new_v4().to_string();
    let student = sqlx::query_as::<_, Student>(&format!(
        r#"
        INSERT INTO students (
            id, name, cms_id, room_no, batch, dept, course, email, father_name,
            contact, address, dob, cnic, qr_code, hostel_id, user_id
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
        RETURNING {STUDENT_COLUMNS}
        "#
    ))
    .bind(&id)
    .bind(&fields.name)
    .bind(fields.cms_id)
    .bind(&fields.room_no)
    .bind(fields.batch)
    .bind(&fields.dept)
    .bind(&fields.course)
    .bind(&fields.email)
    .bind(&fields.father_name)
    .bind(&fields.contact)
    .bind(&fields.address)
    .bind(fields.dob)
    .bind(&fields.cnic)
    .bind(qr_code)
    .bind(&hostel.id)
    .bind(user_id)
    .fetch_one(db_pool)
    .await?;
    Ok(student)
}

/// Overwrites every mutable field of an existing student.
///
/// A missing record is an unexpected failure (500), not a client error.
/// The QR code is regenerated from the new values; the linked identity is
/// left untouched.
pub async fn update_student(db_pool: &SqlitePool, id: &str, fields: &StudentFields) -> AppResult<Student> {
    tracing::info!("Updating student {}", id);

    if find_student_by_id(db_pool, id).await?.is_none() {
        tracing::error!("Update target student '{}' does not exist.", id);
        return Err(AppError::InternalServerError);
    }

    let hostel = hostel_service::resolve_hostel(db_pool, &fields.hostel)
        .await?
        .ok_or_else(|| AppError::NotFound("Invalid hostel".into()))?;

    let qr_code = qr_for(fields, &hostel)?;
    let student = sqlx::query_as::<_, Student>(&format!(
        r#"
        UPDATE students SET
            name = ?2, cms_id = ?3, room_no = ?4, batch = ?5, dept = ?6, course = ?7,
            email = ?8, father_name = ?9, contact = ?10, address = ?11, dob = ?12,
            cnic = ?13, qr_code = ?14, hostel_id = ?15, updated_at = CURRENT_TIMESTAMP
        WHERE id = ?1
        RETURNING {STUDENT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&fields.name)
    .bind(fields.cms_id)
    .bind(&fields.room_no)
    .bind(fields.batch)
    .bind(&fields.dept)
    .bind(&fields.course)
    .bind(&fields.email)
    .bind(&fields.father_name)
    .bind(&fields.contact)
    .bind(&fields.address)
    .bind(fields.dob)
    .bind(&fields.cnic)
    .bind(&qr_code)
    .bind(&hostel.id)
    .fetch_one(db_pool)
    .await
    .map_err(AppError::from)
    .map_err(|e| {
        if e.is_unique_violation() {
            AppError::Conflict("Student already exists".into())
        } else {
            e
        }
    })?;

    tracing::info!("✅ Student {} updated.", id);
    Ok(student)
}

/// Deletes the identity, then the student record.
pub async fn delete_student(db_pool: &SqlitePool, id: &str) -> AppResult<()> {
    tracing::info!("Deleting student {}", id);

    let student = find_student_by_id(db_pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student does not exist".into()))?;

    user_service::delete_user(db_pool, &student.user_id).await?;

    sqlx::query("DELETE FROM students WHERE id = ?1")
        .bind(&student.id)
        .execute(db_pool)
        .await?;

    tracing::info!("✅ Student {} and identity {} deleted.", student.id, student.user_id);
    Ok(())
}
