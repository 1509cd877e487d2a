use std::path::Path;

use anyhow::Context;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::models::Movie;
use crate::database::MovieRepository;

use super::open_stores;

pub async fn handle(config: &AppConfig, file: &Path, output_format: OutputFormat) -> anyhow::Result<()> {
    let movies = read_movies(file)?;

    if config.database.url.is_none() {
        anyhow::bail!("DATABASE_URL must be set to seed a persistent store");
    }
    let stores = open_stores(config).await?;

    let count = seed_movies(stores.movies.as_ref(), movies).await?;

    match output_format {
        OutputFormat::Json => println!(
            "{}",
            json!({ "success": true, "seeded": count, "file": file.display().to_string() })
        ),
        OutputFormat::Text => println!("✓ Seeded {} movies from {}", count, file.display()),
    }
    Ok(())
}

fn read_movies(file: &Path) -> anyhow::Result<Vec<Movie>> {
    let raw = std::fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", file.display()))
}

/// Upsert each movie by title; returns how many were written.
pub async fn seed_movies(store: &dyn MovieRepository, movies: Vec<Movie>) -> anyhow::Result<usize> {
    let mut count = 0;
    for movie in movies {
        let title = movie.title.clone();
        store
            .upsert_movie(movie)
            .await
            .with_context(|| format!("seeding '{}'", title))?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    #[test]
    fn bundled_fixture_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/movies.json");
        let movies = read_movies(&path).unwrap();
        assert_eq!(movies.len(), 10);
        assert!(movies.iter().any(|m| m.title == "Jaws"));
    }

    #[tokio::test]
    async fn seeding_twice_does_not_duplicate() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/movies.json");
        let store = MemoryStore::new();

        seed_movies(&store, read_movies(&path).unwrap()).await.unwrap();
        seed_movies(&store, read_movies(&path).unwrap()).await.unwrap();

        assert_eq!(store.list_movies().await.unwrap().len(), 10);
    }
}
