use axum::{extract::State, http::StatusCode, Json};

use crate::auth::password::hash_password;
use crate::database::models::User;
use crate::error::ApiResult;
use crate::validation::ValidatedUser;
use crate::AppState;

/// POST /users - register a new account
///
/// Expected Input:
/// ```json
/// {
///   "Username": "string",   // Required: at least 5 alphanumeric characters
///   "Password": "string",   // Required: non-empty
///   "Email": "string",      // Required: valid email address
///   "Birthday": "YYYY-MM-DD" // Optional
/// }
/// ```
///
/// Responds 201 with the stored user (password omitted), 422 when a rule
/// fails, 400 when the username is taken.
pub async fn register(
    State(state): State<AppState>,
    ValidatedUser(payload): ValidatedUser,
) -> ApiResult<(StatusCode, Json<User>)> {
    let password_hash = hash_password(payload.password.clone(), state.config.security.bcrypt_cost).await?;

    // The store enforces uniqueness atomically; a taken name comes back as a conflict
    let user = state.users.create_user(payload.into_new_user(password_hash)).await?;
    tracing::info!("Registered user '{}'", user.username);

    Ok((StatusCode::CREATED, Json(user)))
}
