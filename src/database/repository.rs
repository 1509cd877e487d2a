use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::StoreError;
use crate::database::models::{Director, Genre, Movie, NewUser, User};

/// Read access to the movie collection. Movies are written only by seeding.
#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn list_movies(&self) -> Result<Vec<Movie>, StoreError>;

    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, StoreError>;

    /// Genre of the first movie whose genre carries this name.
    async fn find_genre(&self, name: &str) -> Result<Option<Genre>, StoreError>;

    /// Director of the first movie directed by this name.
    async fn find_director(&self, name: &str) -> Result<Option<Director>, StoreError>;

    /// Insert or replace a movie keyed by title.
    async fn upsert_movie(&self, movie: Movie) -> Result<Movie, StoreError>;
}

/// User collection. `None` results mean no user matched the username.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Atomic create; a taken username yields `StoreError::DuplicateUsername`.
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    /// Full replace of the writable fields; favourites are kept.
    async fn update_user(&self, username: &str, user: NewUser) -> Result<Option<User>, StoreError>;

    /// Favourites behave as a set: adding a present id is a no-op.
    async fn add_favorite(&self, username: &str, movie_id: Uuid) -> Result<Option<User>, StoreError>;

    async fn remove_favorite(&self, username: &str, movie_id: Uuid) -> Result<Option<User>, StoreError>;

    async fn delete_user(&self, username: &str) -> Result<Option<User>, StoreError>;
}
