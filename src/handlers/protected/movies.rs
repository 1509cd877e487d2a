use axum::{
    extract::{Path, State},
    Json,
};

use crate::database::models::{Director, Genre, Movie};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /movies - every movie in the catalog
pub async fn list_movies(State(state): State<AppState>) -> ApiResult<Json<Vec<Movie>>> {
    let movies = state.movies.list_movies().await?;
    Ok(Json(movies))
}

/// GET /movies/:title - one movie by exact title, `null` when absent
pub async fn movie_by_title(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> ApiResult<Json<Option<Movie>>> {
    let movie = state.movies.find_by_title(&title).await?;
    Ok(Json(movie))
}

/// GET /movies/genres/:name
pub async fn genre_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Genre>> {
    state
        .movies
        .find_genre(&name)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Genre '{}' not found", name)))
}

/// GET /movies/directors/:name
pub async fn director_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Director>> {
    state
        .movies
        .find_director(&name)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Director '{}' not found", name)))
}
