//! PostgreSQL store tests. They need a reachable database:
//!
//! ```sh
//! DATABASE_URL=postgres://localhost/moviesinfo_test cargo test --test 50_postgres -- --ignored
//! ```

use anyhow::{Context, Result};
use moviesinfo_api::config::AppConfig;
use moviesinfo_api::database::models::NewUser;
use moviesinfo_api::database::{DatabaseManager, PgStore, StoreError, UserRepository};
use uuid::Uuid;

async fn store() -> Result<PgStore> {
    let mut config = AppConfig::development();
    config.database.url = Some(std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?);

    let pool = DatabaseManager::connect(&config.database).await?;
    DatabaseManager::migrate(&pool).await?;
    Ok(PgStore::new(pool))
}

/// Username unique to this run, so reruns against the same database do not collide.
fn username(prefix: &str) -> String {
    format!("{prefix}{}", Uuid::new_v4().simple())
}

fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        password_hash: "hash".to_string(),
        email: format!("{username}@example.com"),
        birthday: None,
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn favourites_are_a_set() -> Result<()> {
    let store = store().await?;
    let name = username("fav");
    store.create_user(new_user(&name)).await?;

    let jaws = Uuid::new_v4();
    let get_out = Uuid::new_v4();

    store.add_favorite(&name, get_out).await?;
    store.add_favorite(&name, jaws).await?;
    let user = store.add_favorite(&name, jaws).await?.context("user exists")?;
    assert_eq!(user.favorite_movies, vec![get_out, jaws]);

    let user = store.remove_favorite(&name, jaws).await?.context("user exists")?;
    assert_eq!(user.favorite_movies, vec![get_out]);

    // Removing an absent id leaves the list untouched
    let user = store.remove_favorite(&name, jaws).await?.context("user exists")?;
    assert_eq!(user.favorite_movies, vec![get_out]);

    assert!(store.add_favorite(&username("ghost"), jaws).await?.is_none());

    store.delete_user(&name).await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_username_is_a_conflict() -> Result<()> {
    let store = store().await?;
    let first = username("first");
    let second = username("second");
    store.create_user(new_user(&first)).await?;
    store.create_user(new_user(&second)).await?;

    let err = store.create_user(new_user(&first)).await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateUsername(ref name) if *name == first));

    let err = store.update_user(&second, new_user(&first)).await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateUsername(_)));

    // A missing user is not found, even when renamed onto a taken name
    assert!(store.update_user(&username("ghost"), new_user(&first)).await?.is_none());

    store.delete_user(&first).await?;
    store.delete_user(&second).await?;
    Ok(())
}
