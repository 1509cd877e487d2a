use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::StoreError;
use crate::database::models::{Director, Genre, Movie, MovieRow, NewUser, User};
use crate::database::repository::{MovieRepository, UserRepository};

const MOVIE_COLUMNS: &str = "id, title, description, genre_name, genre_description, \
     director_name, director_bio, image_url, featured";

const USER_COLUMNS: &str = "id, username, password, email, birthday, favorite_movies";

/// PostgreSQL-backed store for both collections
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieRepository for PgStore {
    async fn list_movies(&self) -> Result<Vec<Movie>, StoreError> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies ORDER BY title");
        let rows = sqlx::query_as::<_, MovieRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, StoreError> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE title = $1");
        let row = sqlx::query_as::<_, MovieRow>(&sql)
            .bind(title)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Movie::from))
    }

    async fn find_genre(&self, name: &str) -> Result<Option<Genre>, StoreError> {
        let row = sqlx::query_as::<_, (String, String)>(
            "SELECT genre_name, genre_description FROM movies WHERE genre_name = $1 LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(name, description)| Genre { name, description }))
    }

    async fn find_director(&self, name: &str) -> Result<Option<Director>, StoreError> {
        let row = sqlx::query_as::<_, (String, String)>(
            "SELECT director_name, director_bio FROM movies WHERE director_name = $1 LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(name, bio)| Director { name, bio }))
    }

    async fn upsert_movie(&self, movie: Movie) -> Result<Movie, StoreError> {
        let sql = format!(
            "INSERT INTO movies ({MOVIE_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT (title) DO UPDATE SET \
                 description = EXCLUDED.description, \
                 genre_name = EXCLUDED.genre_name, \
                 genre_description = EXCLUDED.genre_description, \
                 director_name = EXCLUDED.director_name, \
                 director_bio = EXCLUDED.director_bio, \
                 image_url = EXCLUDED.image_url, \
                 featured = EXCLUDED.featured \
             RETURNING {MOVIE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, MovieRow>(&sql)
            .bind(movie.id)
            .bind(&movie.title)
            .bind(&movie.description)
            .bind(&movie.genre.name)
            .bind(&movie.genre.description)
            .bind(&movie.director.name)
            .bind(&movie.director.bio)
            .bind(&movie.image_url)
            .bind(movie.featured)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn find_user(&self, username: &str) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let sql = format!(
            "INSERT INTO users (id, username, password, email, birthday) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(&user.email)
            .bind(user.birthday)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::from_insert(e, &user.username))
    }

    async fn update_user(&self, username: &str, user: NewUser) -> Result<Option<User>, StoreError> {
        let sql = format!(
            "UPDATE users SET username = $2, password = $3, email = $4, birthday = $5 \
             WHERE username = $1 RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(&user.email)
            .bind(user.birthday)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::from_insert(e, &user.username))
    }

    async fn add_favorite(&self, username: &str, movie_id: Uuid) -> Result<Option<User>, StoreError> {
        let sql = format!(
            "UPDATE users SET favorite_movies = CASE \
                 WHEN $2 = ANY(favorite_movies) THEN favorite_movies \
                 ELSE array_append(favorite_movies, $2) END \
             WHERE username = $1 RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .bind(movie_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn remove_favorite(&self, username: &str, movie_id: Uuid) -> Result<Option<User>, StoreError> {
        let sql = format!(
            "UPDATE users SET favorite_movies = array_remove(favorite_movies, $2) \
             WHERE username = $1 RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .bind(movie_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn delete_user(&self, username: &str) -> Result<Option<User>, StoreError> {
        let sql = format!("DELETE FROM users WHERE username = $1 RETURNING {USER_COLUMNS}");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}
