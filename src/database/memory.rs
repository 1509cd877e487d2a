use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::StoreError;
use crate::database::models::{Director, Genre, Movie, NewUser, User};
use crate::database::repository::{MovieRepository, UserRepository};

const SEED_MOVIES: &str = include_str!("../../fixtures/movies.json");

/// In-process store used when no `DATABASE_URL` is configured and in tests.
///
/// Each collection sits behind its own lock, so a username check and the
/// insert that follows it happen under one write guard.
#[derive(Default)]
pub struct MemoryStore {
    movies: RwLock<Vec<Movie>>,
    users: RwLock<Vec<User>>,
    queries: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the bundled top-movies list
    pub fn seeded() -> Result<Self, serde_json::Error> {
        let movies: Vec<Movie> = serde_json::from_str(SEED_MOVIES)?;
        Ok(Self::with_movies(movies))
    }

    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self {
            movies: RwLock::new(movies),
            ..Self::default()
        }
    }

    /// Number of repository calls served so far
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn record_query(&self) {
        self.queries.fetch_add(1, Ordering::SeqCst);
    }

    async fn modify_user<F>(&self, username: &str, f: F) -> Option<User>
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.users.write().await;
        let user = users.iter_mut().find(|u| u.username == username)?;
        f(user);
        Some(user.clone())
    }
}

#[async_trait]
impl MovieRepository for MemoryStore {
    async fn list_movies(&self) -> Result<Vec<Movie>, StoreError> {
        self.record_query();
        Ok(self.movies.read().await.clone())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, StoreError> {
        self.record_query();
        let movies = self.movies.read().await;
        Ok(movies.iter().find(|m| m.title == title).cloned())
    }

    async fn find_genre(&self, name: &str) -> Result<Option<Genre>, StoreError> {
        self.record_query();
        let movies = self.movies.read().await;
        Ok(movies
            .iter()
            .find(|m| m.genre.name == name)
            .map(|m| m.genre.clone()))
    }

    async fn find_director(&self, name: &str) -> Result<Option<Director>, StoreError> {
        self.record_query();
        let movies = self.movies.read().await;
        Ok(movies
            .iter()
            .find(|m| m.director.name == name)
            .map(|m| m.director.clone()))
    }

    async fn upsert_movie(&self, movie: Movie) -> Result<Movie, StoreError> {
        self.record_query();
        let mut movies = self.movies.write().await;
        match movies.iter_mut().find(|m| m.title == movie.title) {
            Some(existing) => {
                let id = existing.id;
                *existing = Movie { id, ..movie };
                Ok(existing.clone())
            }
            None => {
                movies.push(movie.clone());
                Ok(movie)
            }
        }
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_user(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.record_query();
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        self.record_query();
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::DuplicateUsername(user.username));
        }

        let created = User {
            id: Uuid::new_v4(),
            username: user.username,
            password: user.password_hash,
            email: user.email,
            birthday: user.birthday,
            favorite_movies: Vec::new(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn update_user(&self, username: &str, user: NewUser) -> Result<Option<User>, StoreError> {
        self.record_query();
        let mut users = self.users.write().await;
        let Some(index) = users.iter().position(|u| u.username == username) else {
            return Ok(None);
        };
        if user.username != username && users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::DuplicateUsername(user.username));
        }

        let existing = &mut users[index];
        existing.username = user.username;
        existing.password = user.password_hash;
        existing.email = user.email;
        existing.birthday = user.birthday;
        Ok(Some(existing.clone()))
    }

    async fn add_favorite(&self, username: &str, movie_id: Uuid) -> Result<Option<User>, StoreError> {
        self.record_query();
        Ok(self
            .modify_user(username, |u| {
                if !u.favorite_movies.contains(&movie_id) {
                    u.favorite_movies.push(movie_id);
                }
            })
            .await)
    }

    async fn remove_favorite(&self, username: &str, movie_id: Uuid) -> Result<Option<User>, StoreError> {
        self.record_query();
        Ok(self
            .modify_user(username, |u| u.favorite_movies.retain(|id| *id != movie_id))
            .await)
    }

    async fn delete_user(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.record_query();
        let mut users = self.users.write().await;
        let position = users.iter().position(|u| u.username == username);
        Ok(position.map(|i| users.remove(i)))
    }
}
