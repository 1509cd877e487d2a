use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{AuthError, Identity};
use crate::error::ApiError;
use crate::AppState;

/// Authenticated caller, injected into request extensions by [`jwt_auth_middleware`]
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
}

impl From<Identity> for AuthUser {
    fn from(identity: Identity) -> Self {
        Self {
            username: identity.username,
        }
    }
}

/// Bearer authentication. Rejects with 401 before the handler (and therefore
/// the store) is reached.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers())?;

    let identity = state.verifier.verify(token).map_err(|e| {
        tracing::warn!("Bearer token rejected on {}: {}", request.uri().path(), e);
        ApiError::from(e)
    })?;

    tracing::debug!("Authenticated request for user '{}'", identity.username);
    request.extensions_mut().insert(AuthUser::from(identity));

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_str = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AuthError::MalformedHeader),
    }
}
