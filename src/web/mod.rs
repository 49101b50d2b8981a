//! Web layer module
//!
//! HTTP interface for the explorateurs map. Handlers stay thin: the render
//! pass lives in [`crate::itinerary`] and [`crate::render`]; this layer only
//! parses the color form, runs a pass, and serves the resulting artifacts
//! and the static pages.

use std::net::SocketAddr;
use std::sync::{Arc, RwLock};

use anyhow::Result;
use axum::{
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{config::Config, content::ContentStore, render::MapStore};

pub mod handlers;

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: Config, content: ContentStore) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;
        let app = router(AppState::new(config, content));
        Ok(Self { app, addr })
    }

    /// Start the web server
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, self.app).await?;
        Ok(())
    }

    /// Get the host address
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Get the port number
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

/// Create the router with all routes and middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        // Color form + map page
        .route("/", get(handlers::index).post(handlers::submit_colors))
        // Rendered map artifacts
        .route("/map/:name", get(handlers::map_artifact))
        // Static informational pages
        .route("/about", get(handlers::about))
        .route("/citations", get(handlers::citations))
        // Middleware (applied in reverse order)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        // Shared state
        .with_state(state)
}

/// Application state shared across all handlers
///
/// Aggregator caches are *not* part of this state: they are locals of one
/// render pass, so requests cannot bleed color choices into each other. The
/// only mutable shared state is the artifact store.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub content: Arc<ContentStore>,
    pub maps: Arc<RwLock<MapStore>>,
}

impl AppState {
    pub fn new(config: Config, content: ContentStore) -> Self {
        Self {
            config,
            content: Arc::new(content),
            maps: Arc::new(RwLock::new(MapStore::new())),
        }
    }
}
