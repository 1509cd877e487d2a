use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::password::verify_password;
use crate::database::models::User;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

const BAD_CREDENTIALS: &str = "Incorrect username or password.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

/// POST /login - exchange username and password for a bearer token
///
/// Expected Input:
/// ```json
/// { "Username": "string", "Password": "string" }
/// ```
///
/// Unknown users and wrong passwords get the same 400 response.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let Some(user) = state.users.find_user(&payload.username).await? else {
        tracing::warn!("Login failed: unknown user '{}'", payload.username);
        return Err(ApiError::bad_request(BAD_CREDENTIALS));
    };

    if !verify_password(payload.password, user.password.clone()).await? {
        tracing::warn!("Login failed: wrong password for '{}'", user.username);
        return Err(ApiError::bad_request(BAD_CREDENTIALS));
    }

    let token = state.tokens.generate(&user.username)?;
    tracing::info!("User '{}' logged in", user.username);

    Ok(Json(LoginResponse { user, token }))
}
