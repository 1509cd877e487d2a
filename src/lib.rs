pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod validation;

use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::auth::{AuthError, JwtKeys, TokenVerifier};
use crate::config::AppConfig;
use crate::database::{MovieRepository, UserRepository};

/// Shared handler state: configuration, both collections and the token machinery.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub movies: Arc<dyn MovieRepository>,
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<JwtKeys>,
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    pub fn new(
        config: Arc<AppConfig>,
        movies: Arc<dyn MovieRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Result<Self, AuthError> {
        let tokens = Arc::new(JwtKeys::from_config(&config.security)?);
        let verifier: Arc<dyn TokenVerifier> = tokens.clone();

        Ok(Self {
            config,
            movies,
            users,
            tokens,
            verifier,
        })
    }

    /// Replace the bearer verifier, keeping token issuance as is.
    pub fn with_verifier(mut self, verifier: Arc<dyn TokenVerifier>) -> Self {
        self.verifier = verifier;
        self
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .merge(public_routes())
        // Protected (bearer JWT)
        .merge(protected_routes(state.clone()))
        // Global middleware
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    use handlers::public;

    Router::new()
        .route("/", get(public::root))
        .route("/login", post(public::login))
        .route("/users", post(public::register))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::{movies, users};

    Router::new()
        .route("/movies", get(movies::list_movies))
        .route("/movies/:title", get(movies::movie_by_title))
        .route("/movies/genres/:name", get(movies::genre_by_name))
        .route("/movies/directors/:name", get(movies::director_by_name))
        .route(
            "/users/:username",
            get(users::user_get)
                .put(users::user_update)
                .delete(users::user_delete),
        )
        .route(
            "/users/:username/favourites/:movie_id",
            post(users::favourite_add).delete(users::favourite_remove),
        )
        // route_layer: auth runs only for matched routes, before any handler
        .route_layer(from_fn_with_state(state, middleware::jwt_auth_middleware))
}
