mod api;
mod config;
mod distance_matrix;
mod dto;
mod error;
mod file_store;
mod state;

use crate::{
    config::Config,
    distance_matrix::DistanceMatrixProvider,
    file_store::JsonFileStore,
    state::{AppState, SharedProvider},
};
use anyhow::{Context, Result};
use showings::{
    store::{MemoryStore, TourStore},
    travel::{CachedTravel, EstimatedTravel},
};
use std::{sync::Arc, time::Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("Starting server...");
    let config = Config::from_env()?;

    // The blocking http client must be created and dropped outside the runtime
    let provider = travel_provider(&config)?;
    let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
    runtime.block_on(serve(config, provider.clone()))?;
    drop(runtime);
    drop(provider);
    Ok(())
}

fn travel_provider(config: &Config) -> Result<SharedProvider> {
    match &config.maps_api_key {
        Some(key) => {
            info!(
                "Resolving legs with the Distance Matrix API, caching up to {} legs",
                config.travel_cache_size
            );
            let provider =
                DistanceMatrixProvider::new(&config.maps_url, key, config.travel_retries)
                    .context("Failed to build Distance Matrix client")?;
            let provider: SharedProvider = Arc::new(
                CachedTravel::new(provider).with_capacity_limit(config.travel_cache_size),
            );
            Ok(provider)
        }
        None => {
            warn!("GOOGLE_MAPS_API_KEY not set, using offline travel estimates");
            let provider: SharedProvider = Arc::new(EstimatedTravel::new());
            Ok(provider)
        }
    }
}

async fn open_store(config: &Config) -> Result<Arc<dyn TourStore>> {
    match &config.store_dir {
        Some(dir) => {
            let now = Instant::now();
            let store = JsonFileStore::open(dir)
                .await
                .with_context(|| format!("Failed to open tour store at {}", dir.display()))?;
            info!("Opened tour store at {} in {:?}", dir.display(), now.elapsed());
            let store: Arc<dyn TourStore> = Arc::new(store);
            Ok(store)
        }
        None => {
            info!("Keeping tours in memory");
            let store: Arc<dyn TourStore> = Arc::new(MemoryStore::new());
            Ok(store)
        }
    }
}

async fn serve(config: Config, provider: SharedProvider) -> Result<()> {
    let store = open_store(&config).await?;
    let state = Arc::new(AppState::new(provider, store));
    let app = api::router(state);

    let addr = config.addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
