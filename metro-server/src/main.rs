use metro_server::cache::CachedStore;
use metro_server::config::{AppConfig, StoreSource};
use metro_server::logging::{LogFormat, init_logging};
use metro_server::store::{DocumentStore, FileStore, HttpStore};
use metro_server::web::{AppState, create_router};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    init_logging(LogFormat::from_env());

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    match config.store.clone() {
        StoreSource::Files(dir) => {
            info!(data_dir = %dir.display(), "using file store");
            with_cache(&config, FileStore::new(dir)).await;
        }
        StoreSource::Http(http) => {
            info!(base_url = %http.base_url, "using HTTP document store");
            let store = HttpStore::new(http).expect("Failed to create store client");
            with_cache(&config, store).await;
        }
    }
}

async fn with_cache<S: DocumentStore>(config: &AppConfig, store: S) {
    match &config.cache {
        Some(cache) => {
            info!(ttl_secs = cache.ttl.as_secs(), "read-through cache enabled");
            serve(config, CachedStore::new(store, cache)).await;
        }
        None => serve(config, store).await,
    }
}

async fn serve<S: DocumentStore>(config: &AppConfig, store: S) {
    let app = create_router(AppState::new(store, config.entry.clone()));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listen address");

    info!(addr = %config.bind_addr, "Metro navigator listening");
    info!("API endpoints:");
    info!("  GET /health");
    info!("  GET /api/stations");
    info!("  GET /api/route?from=&to=");
    info!("  GET /api/nearest-station?lat=&lon=");
    info!("  GET /api/journey?from_lat=&from_lon=&to_lat=&to_lon=");
    info!("  GET /api/pois[?stationId=]");
    info!("  GET /api/ar-route?from=&to=");
    info!("  GET /api/ar-path?from=&to=");
    info!("  GET /api/destinations?stationId=");

    axum::serve(listener, app).await.expect("Server error");
}
