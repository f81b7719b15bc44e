// src/services/user_service.rs
use crate::{
    error::AppResult,
    models::user::User,
    services::auth_service,
};
use sqlx::SqlitePool;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, email, password_hash, is_admin, created_at";

/// Looks up an identity by email (exact match).
pub async fn find_user_by_email(db_pool: &SqlitePool, email: &str) -> AppResult<Option<User>> {
    tracing::debug!("Looking up user by email: {}", email);
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = ?1"
    ))
    .bind(email)
    .fetch_optional(db_pool)
    .await?;
    Ok(user)
}

pub async fn find_user_by_id(db_pool: &SqlitePool, user_id: &str) -> AppResult<Option<User>> {
    tracing::debug!("Looking up user by id: {}", user_id);
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = ?1"
    ))
    .bind(user_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(user)
}

/// Inserts an identity whose password is already hashed.
pub async fn create_user(
    db_pool: &SqlitePool,
    email: &str,
    password_hash: &str,
    is_admin: bool,
) -> AppResult<User> {
    let id = Uuid::new_v4().to_string();
    tracing::info!("Creating user {} ({})", email, id);

    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (id, email, password_hash, is_admin) VALUES (?1, ?2, ?3, ?4) RETURNING {USER_COLUMNS}"
    ))
    .bind(&id)
    .bind(email)
    .bind(password_hash)
    .bind(is_admin)
    .fetch_one(db_pool)
    .await?;

    Ok(user)
}

/// Removes an identity. Returns whether a row was deleted.
pub async fn delete_user(db_pool: &SqlitePool, user_id: &str) -> AppResult<bool> {
    let rows_affected = sqlx::query("DELETE FROM users WHERE id = ?1")
        .bind(user_id)
        .execute(db_pool)
        .await?
        .rows_affected();

    if rows_affected == 0 {
        tracing::warn!("User '{}' was already gone when deleting.", user_id);
    }
    Ok(rows_affected > 0)
}

pub async fn count_users(db_pool: &SqlitePool) -> AppResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(db_pool)
        .await?;
    Ok(count)
}

/// Creates the bootstrap admin identity unless the email is already taken.
pub async fn ensure_admin(
    db_pool: &SqlitePool,
    email: &str,
    raw_password: &str,
    bcrypt_cost: u32,
) -> AppResult<()> {
    if find_user_by_email(db_pool, email).await?.is_some() {
        tracing::debug!("Admin '{}' already present, skipping bootstrap.", email);
        return Ok(());
    }

    let password_hash = auth_service::hash_password(raw_password, bcrypt_cost).await?;
    create_user(db_pool, email, &password_hash, true).await?;
    tracing::info!("✅ Bootstrap admin '{}' created.", email);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[tokio::test]
    async fn ensure_admin_is_idempotent() {
        let pool = db::create_db_pool("sqlite::memory:").await.unwrap();

        ensure_admin(&pool, "warden@example.com", "password1", crate::config::MIN_BCRYPT_COST)
            .await
            .unwrap();
        ensure_admin(&pool, "warden@example.com", "password2", crate::config::MIN_BCRYPT_COST)
            .await
            .unwrap();

        assert_eq!(count_users(&pool).await.unwrap(), 1);
        let admin = find_user_by_email(&pool, "warden@example.com")
            .await
            .unwrap()
            .unwrap();
        assert!(admin.is_admin);
        assert!(auth_service::verify_password("password1", &admin.password_hash)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_unique_violation() {
        let pool = db::create_db_pool("sqlite::memory:").await.unwrap();
        create_user(&pool, "a@example.com", "hash", false).await.unwrap();
        let err = create_user(&pool, "a@example.com", "hash", false)
            .await
            .unwrap_err();
        assert!(err.is_unique_violation());
    }
}
