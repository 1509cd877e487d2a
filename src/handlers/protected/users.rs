use axum::{
    extract::{Extension, Path, State},
    Json,
};
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::database::models::User;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::validation::ValidatedUser;
use crate::AppState;

fn user_not_found(username: &str) -> ApiError {
    ApiError::not_found(format!("{} was not found", username))
}

/// GET /users/:username
pub async fn user_get(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<User>> {
    state
        .users
        .find_user(&username)
        .await?
        .map(Json)
        .ok_or_else(|| user_not_found(&username))
}

/// PUT /users/:username - full replace of Username, Password, Email and Birthday
///
/// Takes the same payload and rules as registration. Favourites are kept.
pub async fn user_update(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(username): Path<String>,
    ValidatedUser(payload): ValidatedUser,
) -> ApiResult<Json<User>> {
    let password_hash = hash_password(payload.password.clone(), state.config.security.bcrypt_cost).await?;

    let user = state
        .users
        .update_user(&username, payload.into_new_user(password_hash))
        .await?
        .ok_or_else(|| user_not_found(&username))?;

    tracing::info!(
        "Updated user '{}' (now '{}') on behalf of '{}'",
        username,
        user.username,
        caller.username
    );
    Ok(Json(user))
}

/// POST /users/:username/favourites/:movie_id
pub async fn favourite_add(
    State(state): State<AppState>,
    Path((username, movie_id)): Path<(String, Uuid)>,
) -> ApiResult<Json<User>> {
    state
        .users
        .add_favorite(&username, movie_id)
        .await?
        .map(Json)
        .ok_or_else(|| user_not_found(&username))
}

/// DELETE /users/:username/favourites/:movie_id
pub async fn favourite_remove(
    State(state): State<AppState>,
    Path((username, movie_id)): Path<(String, Uuid)>,
) -> ApiResult<Json<User>> {
    state
        .users
        .remove_favorite(&username, movie_id)
        .await?
        .map(Json)
        .ok_or_else(|| user_not_found(&username))
}

/// DELETE /users/:username - responds with a plain-text confirmation
pub async fn user_delete(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(username): Path<String>,
) -> ApiResult<String> {
    match state.users.delete_user(&username).await? {
        Some(user) => {
            tracing::info!("Deleted user '{}' on behalf of '{}'", user.username, caller.username);
            Ok(format!("{} was deleted.", user.username))
        }
        None => Err(ApiError::bad_request(format!("{} was not found", username))),
    }
}
