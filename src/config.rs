// src/config.rs
use crate::error::{AppError, AppResult};
use std::{env, fmt::Display, str::FromStr};

/// Lowest work factor bcrypt accepts.
pub const MIN_BCRYPT_COST: u32 = 4;

/// Runtime settings read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub cors_origin: Option<String>,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET")?;
        if jwt_secret.len() < 32 {
            tracing::warn!("⚠️ JWT_SECRET is short, consider a longer random key!");
        }

        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            jwt_secret,
            port: load_or("PORT", 3000)?,
            token_ttl_hours: load_or("TOKEN_TTL_HOURS", 24)?,
            bcrypt_cost: load_or("BCRYPT_COST", 10)?,
            cors_origin: optional("CORS_ORIGIN"),
            admin_email: optional("ADMIN_EMAIL"),
            admin_password: optional("ADMIN_PASSWORD"),
        })
    }

    /// Settings for an isolated in-memory database; used by the test suites.
    pub fn in_memory(jwt_secret: &str) -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: jwt_secret.to_string(),
            port: 0,
            token_ttl_hours: 1,
            bcrypt_cost: MIN_BCRYPT_COST,
            cors_origin: None,
            admin_email: None,
            admin_password: None,
        }
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn load_or<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e| {
            tracing::error!("Invalid value for {}: {}", key, e);
            AppError::ConfigError(format!("{key}: {e}"))
        }),
        Err(_) => {
            tracing::info!("{} not set, using default: {}", key, default);
            Ok(default)
        }
    }
}
