//! Authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// Routes under `/api/` that skip authentication
const PUBLIC_API_ROUTES: [&str; 1] = ["/api/health"];

/// Authentication middleware
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>`,
/// then injects [`CurrentUser`] into request extensions.
///
/// # Skipped paths
///
/// - `OPTIONS *` (CORS preflight)
/// - paths outside `/api/` (they 404 normally)
/// - [`PUBLIC_API_ROUTES`]
///
/// # Errors
///
/// | Failure                 | Response          |
/// |-------------------------|-------------------|
/// | No Authorization header | 401 Unauthorized  |
/// | Token expired           | 401 TokenExpired  |
/// | Invalid token           | 401 InvalidToken  |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if PUBLIC_API_ROUTES.contains(&path) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            tracing::warn!(target: "security", uri = %req.uri(), "Missing authorization header");
            return Err(AppError::unauthorized());
        }
    };

    match state.get_jwt_service().validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(target: "security", error = %e, uri = %req.uri(), "Token rejected");

            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}
