use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod config;
mod error;
mod handlers;
mod models;
mod services;

use config::Config;
use error::AppResult;
use services::store::{EntryStore, StoreError};

#[derive(Clone)]
pub struct AppState {
    /// Store calls are serialized so the duplicate check and the write
    /// happen as one step within this process.
    pub store: Arc<Mutex<EntryStore>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = EntryStore::new(config.data_file.clone());
        Self {
            store: Arc::new(Mutex::new(store)),
            config: Arc::new(config),
        }
    }

    /// Run a store operation on the blocking pool while holding the store
    /// lock, so file I/O stays off the async workers.
    pub async fn with_store<T, F>(&self, op: F) -> AppResult<T>
    where
        F: FnOnce(&EntryStore) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store.clone().lock_owned().await;
        Ok(tokio::task::spawn_blocking(move || op(&*store)).await??)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wellness_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env()?;
    let state = AppState::new(config.clone());

    // Creates the data file if needed and fails fast on a corrupt one
    {
        let store = state.store.lock().await;
        let existing = store.load()?;
        tracing::info!(
            path = ?store.path(),
            entries = existing.len(),
            "Data file ready"
        );
    }

    let cors = cors_layer(&config)?;
    let app = build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        // Check-ins
        .route("/api/checkins", post(handlers::checkins::create_checkin))
        .route(
            "/api/checkins/snapshot",
            get(handlers::checkins::get_snapshot),
        )
        // History
        .route("/api/entries", get(handlers::entries::list_entries))
        .route("/api/entries", delete(handlers::entries::clear_entries))
        // Views
        .route("/api/overview", get(handlers::overview::get_overview))
        .route(
            "/api/leaderboard",
            get(handlers::leaderboard::get_leaderboard),
        )
        .with_state(state)
}

fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in std::iter::once(&config.frontend_url).chain(&config.cors_extra_origins) {
        let value = origin
            .parse::<axum::http::HeaderValue>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin {origin:?}: {e}"))?;
        origins.push(value);
    }

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ]))
}
