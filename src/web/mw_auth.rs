// src/web/mw_auth.rs
use crate::{
    error::AppError,
    services::auth_service::{self, Claims, TokenKeys},
};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

/// Decoded identity claim, placed in request extensions by `require_auth`.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub Claims);

// Middleware that requires a valid bearer token
pub async fn require_auth(
    State(keys): State<TokenKeys>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(auth_service::bearer_token)
        .map(str::to_owned);

    let Some(token) = token else {
        tracing::debug!("Auth MW: no bearer token on {}", request.uri().path());
        return Err(AppError::Unauthorized("No token, authorization denied".into()));
    };

    match keys.verify(&token) {
        Ok(claims) => {
            tracing::debug!("Auth MW: user '{}' authenticated (admin: {}).", claims.user_id, claims.is_admin);
            request.extensions_mut().insert(CurrentUser(claims));
            Ok(next.run(request).await)
        }
        Err(e) => {
            tracing::warn!("Auth MW: rejected token: {}", e);
            Err(AppError::Unauthorized("Token is not valid".into()))
        }
    }
}
