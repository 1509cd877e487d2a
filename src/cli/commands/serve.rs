use std::sync::Arc;

use crate::config::AppConfig;
use crate::AppState;

use super::open_stores;

pub async fn handle(config: &AppConfig) -> anyhow::Result<()> {
    config.validate()?;
    tracing::info!("Starting MoviesInfo API in {:?} mode", config.environment);

    let stores = open_stores(config).await?;
    let state = AppState::new(Arc::new(config.clone()), stores.movies, stores.users)?;

    let addr = config.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, crate::app(state)).await?;
    Ok(())
}
