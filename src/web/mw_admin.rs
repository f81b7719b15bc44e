// src/web/mw_admin.rs
use crate::{error::AppError, web::mw_auth::CurrentUser};
use axum::{
    extract::{Extension, Request},
    middleware::Next,
    response::Response,
};

/// Lets the request through only when the token claims admin rights.
/// Must run *after* `require_auth`; it trusts the claim and does not hit the DB.
pub async fn require_admin(
    Extension(CurrentUser(claims)): Extension<CurrentUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if claims.is_admin {
        tracing::debug!("Admin MW: access granted for {}", claims.user_id);
        Ok(next.run(request).await)
    } else {
        tracing::warn!("Admin MW: access denied for {} (not admin).", claims.user_id);
        Err(AppError::Unauthorized("Admin access required".into()))
    }
}
