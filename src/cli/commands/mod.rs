pub mod migrate;
pub mod seed;
pub mod serve;

use std::sync::Arc;

use anyhow::Context;

use crate::config::AppConfig;
use crate::database::{DatabaseManager, MemoryStore, MovieRepository, PgStore, UserRepository};

/// Both collections, backed by PostgreSQL when configured, memory otherwise.
pub struct Stores {
    pub movies: Arc<dyn MovieRepository>,
    pub users: Arc<dyn UserRepository>,
}

pub async fn open_stores(config: &AppConfig) -> anyhow::Result<Stores> {
    if config.database.url.is_none() {
        tracing::warn!("DATABASE_URL not set; using the in-memory store seeded with top movies");
        let store = Arc::new(MemoryStore::seeded().context("bundled movie fixture")?);
        return Ok(Stores {
            movies: store.clone(),
            users: store,
        });
    }

    let pool = DatabaseManager::connect(&config.database).await?;
    DatabaseManager::migrate(&pool).await?;
    DatabaseManager::health_check(&pool).await?;

    let store = Arc::new(PgStore::new(pool));
    Ok(Stores {
        movies: store.clone(),
        users: store,
    })
}
