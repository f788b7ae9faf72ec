//! HTTP surface: one GeoJSON endpoint per catalog entry plus static files.
//!
//! # Endpoints
//!
//! - `GET /<value>` - features whose `railway` tag equals `value`, for every
//!   node and way value in the catalog (node wins where both list a value)
//! - `GET /node/<value>`, `GET /way/<value>` - the same, kind-qualified
//! - anything else - static files from the public directory, 404 otherwise

use crate::catalog::{self, CatalogEntry};
use crate::config::ServerConfig;
use crate::converter::{render, to_feature_collection};
use crate::store::ElementStore;
use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Shared, read-only request state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<ElementStore>,
    pub pretty_print: bool,
}

impl AppState {
    pub fn new(store: Arc<ElementStore>, pretty_print: bool) -> Self {
        Self {
            store,
            pretty_print,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Look up, convert and serialize the features for one catalog entry.
fn render_features(state: &AppState, entry: CatalogEntry) -> Result<String> {
    let elements = state.store.find_by_railway_tag(entry.kind, entry.value);
    let collection = to_feature_collection(&state.store, &elements);
    render(&collection, state.pretty_print)
}

fn error_response(entry: CatalogEntry, message: String) -> Response {
    error!("Failed to render {} type {}: {}", entry.kind, entry.value, message);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error: message }),
    )
        .into_response()
}

async fn railway_features(state: AppState, entry: CatalogEntry) -> Response {
    info!("Got request for {} type {}", entry.kind, entry.value);

    // Conversion walks every matching element on the rayon pool; keep it off
    // the async workers.
    match tokio::task::spawn_blocking(move || render_features(&state, entry)).await {
        Ok(Ok(body)) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Ok(Err(e)) => error_response(entry, format!("{:#}", e)),
        Err(e) => error_response(entry, format!("conversion task failed: {}", e)),
    }
}

fn entry_route(router: Router<AppState>, path: &str, entry: CatalogEntry) -> Router<AppState> {
    router.route(
        path,
        get(move |State(state): State<AppState>| railway_features(state, entry)),
    )
}

/// Build the router with every catalog endpoint and the static file fallback.
pub fn build_router(state: AppState, public_dir: &Path) -> Router {
    let mut router = Router::new();

    for (path, entry) in catalog::endpoints() {
        info!("Creating {} web service for {}", entry.kind, entry.value);
        router = entry_route(router, &path, entry);
    }
    for entry in catalog::shadowed() {
        warn!(
            "{} type {} is shadowed by a node type of the same name, serving it at {} only",
            entry.kind,
            entry.value,
            catalog::qualified_path(&entry)
        );
    }
    for entry in catalog::entries() {
        router = entry_route(router, &catalog::qualified_path(&entry), entry);
    }

    router
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

/// Serve `store` until the process is interrupted.
pub async fn run_server(store: Arc<ElementStore>, config: &ServerConfig) -> Result<()> {
    if !config.public_dir.is_dir() {
        warn!(
            "Public directory {} does not exist, static assets will 404",
            config.public_dir.display()
        );
    }

    let app = build_router(AppState::new(store, config.pretty_print), &config.public_dir);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("railway-server listening on port {}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::osm::{ElementKind, OsmElement, OsmNode, Tags};
    use axum::body::to_bytes;

    fn station_state() -> AppState {
        let mut tags = Tags::new();
        tags.insert("railway".to_string(), "station".to_string());
        let store = ElementStore::from_elements(vec![OsmElement::Node(OsmNode {
            id: 1,
            lat: 51.5,
            lon: -0.1,
            tags,
        })]);
        AppState::new(Arc::new(store), false)
    }

    const STATION: CatalogEntry = CatalogEntry {
        kind: ElementKind::Node,
        value: "station",
    };

    #[tokio::test]
    async fn test_railway_features_returns_geojson() {
        let response = railway_features(station_state(), STATION).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            parsed["features"][0]["geometry"]["coordinates"],
            serde_json::json!([-0.1, 51.5])
        );
    }

    #[tokio::test]
    async fn test_failed_conversion_is_a_json_500() {
        let response = error_response(STATION, "conversion task failed: cancelled".to_string());
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["error"], "conversion task failed: cancelled");
    }
}
