use crate::config::Config;
use crate::error::LookupError;
use crate::feed::HttpFeedClient;
use crate::manifest::{manifest, Manifest};
use crate::registry::ShowRegistry;
use crate::resolver::CatalogResolver;
use crate::shows::default_shows;
use crate::sync::EpisodeSynchronizer;
use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, HeaderName, Method, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

#[derive(Clone)]
pub struct AppState {
    pub resolver: CatalogResolver,
    pub manifest: Arc<Manifest>,
}

impl AppState {
    pub fn new(resolver: CatalogResolver) -> Self {
        Self {
            resolver,
            manifest: Arc::new(manifest()),
        }
    }
}

pub async fn run_server(config: Config) -> Result<()> {
    let registry = Arc::new(ShowRegistry::new(default_shows())?);
    let source = Arc::new(HttpFeedClient::new(config.feed_timeout)?);
    let sync = EpisodeSynchronizer::new(source, config.episodes.clone());

    let loaded = sync.refresh_all(&registry).await;
    info!("Loaded feeds for {}/{} shows", loaded, registry.list_shows().len());

    let state = AppState::new(CatalogResolver::new(registry, sync));
    let app = build_router(state);

    info!("Listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-requested-with"),
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
            header::ACCEPT_ENCODING,
            header::CONTENT_LANGUAGE,
            header::ORIGIN,
        ]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/manifest.json", get(handle_manifest))
        .route("/catalog/:type/:id", get(handle_catalog))
        .route("/meta/:type/:id", get(handle_meta))
        .route("/stream/:type/:id", get(handle_stream))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn handle_manifest(State(state): State<AppState>) -> Json<Manifest> {
    Json(state.manifest.as_ref().clone())
}

async fn handle_catalog(
    State(state): State<AppState>,
    Path((media_type, catalog_file)): Path<(String, String)>,
) -> Result<Json<Value>, StatusCode> {
    let catalog_id = resource_id(&catalog_file)?;
    debug!("Catalog request for {} ({})", media_type, catalog_id);
    let metas = state
        .resolver
        .list_catalog(&media_type)
        .map_err(not_found)?;
    Ok(Json(json!({ "metas": metas })))
}

async fn handle_meta(
    State(state): State<AppState>,
    Path((media_type, show_file)): Path<(String, String)>,
) -> Result<Json<Value>, StatusCode> {
    let show_id = resource_id(&show_file)?;
    let show = state
        .resolver
        .get_meta(&media_type, &show_id)
        .await
        .map_err(not_found)?;
    debug!("Meta for '{}': {} episodes", show.name, show.episodes.len());
    Ok(Json(json!({ "meta": show })))
}

async fn handle_stream(
    State(state): State<AppState>,
    Path((media_type, episode_file)): Path<(String, String)>,
) -> Result<Json<Value>, StatusCode> {
    let composite_id = resource_id(&episode_file)?;
    let stream = state
        .resolver
        .get_stream(&media_type, &composite_id)
        .await
        .map_err(not_found)?;
    Ok(Json(json!({ "streams": [stream] })))
}

/// Path params arrive percent-decoded; the last segment must still carry `.json`.
fn resource_id(segment: &str) -> Result<String, StatusCode> {
    segment
        .strip_suffix(".json")
        .map(str::to_string)
        .ok_or(StatusCode::NOT_FOUND)
}

fn not_found(err: LookupError) -> StatusCode {
    debug!("Lookup failed: {}", err);
    StatusCode::NOT_FOUND
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        term.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Shutdown signal received (Ctrl+C)");
        }
        _ = terminate => {
            info!("Shutdown signal received (SIGTERM)");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_id_requires_json_suffix() {
        assert_eq!(resource_id("30017.json"), Ok("30017".to_string()));
        assert_eq!(resource_id("30017:4.json"), Ok("30017:4".to_string()));
        assert_eq!(resource_id("30017"), Err(StatusCode::NOT_FOUND));
    }
}
