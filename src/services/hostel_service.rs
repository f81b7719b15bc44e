// src/services/hostel_service.rs
use crate::{
    error::{AppError, AppResult},
    models::hostel::Hostel,
};
use sqlx::SqlitePool;
use uuid::Uuid;

/// True when the reference is shaped like a record id rather than a name.
pub fn looks_like_id(reference: &str) -> bool {
    Uuid::parse_str(reference).is_ok()
}

/// Resolves a user-supplied hostel reference (id or case-insensitive name).
///
/// An id-shaped reference is only ever looked up by id, even if a hostel
/// happens to carry that string as its name. Names are compared with `=`
/// under NOCASE collation, so wildcard characters are matched literally.
/// Absence is `Ok(None)`; callers decide which client error to report.
pub async fn resolve_hostel(db_pool: &SqlitePool, reference: &str) -> AppResult<Option<Hostel>> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Ok(None);
    }

    let hostel = if looks_like_id(reference) {
        find_hostel_by_id(db_pool, reference).await?
    } else {
        find_hostel_by_name(db_pool, reference).await?
    };

    match &hostel {
        Some(h) => tracing::debug!("Hostel reference '{}' resolved to {}", reference, h.id),
        None => tracing::debug!("Hostel reference '{}' did not resolve", reference),
    }
    Ok(hostel)
}

pub async fn find_hostel_by_id(db_pool: &SqlitePool, id: &str) -> AppResult<Option<Hostel>> {
    let hostel = sqlx::query_as::<_, Hostel>("SELECT id, name, capacity FROM hostels WHERE id = ?1")
        .bind(id)
        .fetch_optional(db_pool)
        .await?;
    Ok(hostel)
}

pub async fn find_hostel_by_name(db_pool: &SqlitePool, name: &str) -> AppResult<Option<Hostel>> {
    let hostel = sqlx::query_as::<_, Hostel>(
        "SELECT id, name, capacity FROM hostels WHERE name = ?1 COLLATE NOCASE LIMIT 1",
    )
    .bind(name)
    .fetch_optional(db_pool)
    .await?;
    Ok(hostel)
}

pub async fn find_all_hostels(db_pool: &SqlitePool) -> AppResult<Vec<Hostel>> {
    let hostels = sqlx::query_as::<_, Hostel>(
        "SELECT id, name, capacity FROM hostels ORDER BY name COLLATE NOCASE ASC",
    )
    .fetch_all(db_pool)
    .await?;
    tracing::debug!("Found {} hostels.", hostels.len());
    Ok(hostels)
}

pub async fn create_hostel(db_pool: &SqlitePool, name: &str, capacity: i64) -> AppResult<Hostel> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("name", "Hostel name is required"));
    }
    if capacity < 0 {
        return Err(AppError::validation("capacity", "Capacity cannot be negative"));
    }
    if find_hostel_by_name(db_pool, name).await?.is_some() {
        return Err(AppError::Conflict("Hostel already exists".into()));
    }

    let id = Uuid::new_v4().to_string();
    let hostel = sqlx::query_as::<_, Hostel>(
        "INSERT INTO hostels (id, name, capacity) VALUES (?1, ?2, ?3) RETURNING id, name, capacity",
    )
    .bind(&id)
    .bind(name)
    .bind(capacity)
    .fetch_one(db_pool)
    .await?;

    tracing::info!("✅ Hostel '{}' created with capacity {}.", hostel.name, hostel.capacity);
    Ok(hostel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[test]
    fn id_shape_detection() {
        assert!(looks_like_id("67e55044-10b1-426f-9247-bb680e5fe0c8"));
        assert!(!looks_like_id("Hostel A"));
        assert!(!looks_like_id(""));
    }

    #[tokio::test]
    async fn resolves_by_id_and_by_name_ignoring_case() {
        let pool = db::create_db_pool("sqlite::memory:").await.unwrap();
        let hostel = create_hostel(&pool, "Ghazali Hostel", 10).await.unwrap();

        let by_id = resolve_hostel(&pool, &hostel.id).await.unwrap();
        assert_eq!(by_id.as_ref(), Some(&hostel));

        let by_name = resolve_hostel(&pool, "  gHAZALI hostel ").await.unwrap();
        assert_eq!(by_name.as_ref(), Some(&hostel));

        assert!(resolve_hostel(&pool, "Rumi Hostel").await.unwrap().is_none());
        assert!(resolve_hostel(&pool, "").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn pattern_characters_are_literal() {
        let pool = db::create_db_pool("sqlite::memory:").await.unwrap();
        create_hostel(&pool, "Block A", 4).await.unwrap();

        assert!(resolve_hostel(&pool, "Block %").await.unwrap().is_none());
        assert!(resolve_hostel(&pool, "Block _").await.unwrap().is_none());
        assert!(resolve_hostel(&pool, ".*").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn id_shaped_name_is_never_matched_by_name() {
        let pool = db::create_db_pool("sqlite::memory:").await.unwrap();
        let odd_name = Uuid::new_v4().to_string();
        create_hostel(&pool, &odd_name, 3).await.unwrap();

        assert!(resolve_hostel(&pool, &odd_name).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_names_conflict_case_insensitively() {
        let pool = db::create_db_pool("sqlite::memory:").await.unwrap();
        create_hostel(&pool, "Attar", 5).await.unwrap();
        let err = create_hostel(&pool, "ATTAR", 5).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
