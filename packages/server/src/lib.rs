#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for council district lookup.
//!
//! Serves a small JSON API over the address matcher. The street datasets
//! are loaded on the first lookup and shared by every worker.

mod handlers;
pub mod interactive;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, Scope, middleware, web};
use council_lookup::Lookup;
use council_lookup_source::{DatasetStore, SourceDefinition, SourceSummary, configured_sources};

/// Shared application state.
pub struct AppState {
    /// Search over the shared dataset store.
    pub lookup: Arc<Lookup>,
    /// Configured sources, for listing.
    pub sources: Vec<SourceSummary>,
}

impl AppState {
    /// Builds the state for a list of sources. Nothing is loaded until the
    /// first lookup.
    #[must_use]
    pub fn new(sources: Vec<SourceDefinition>) -> Self {
        let summaries = sources.iter().map(SourceDefinition::summary).collect();
        let store = Arc::new(DatasetStore::from_sources(sources));

        Self {
            lookup: Arc::new(Lookup::new(store)),
            sources: summaries,
        }
    }
}

/// The `/api` routes.
#[must_use]
pub fn api_scope() -> Scope {
    web::scope("/api")
        .route("/health", web::get().to(handlers::health))
        .route("/lookup", web::get().to(handlers::lookup))
        .route("/sources", web::get().to(handlers::sources))
}

/// Starts the API server over the registry sources.
///
/// Initializes logging from `RUST_LOG`, reads the source filter from
/// `COUNCIL_LOOKUP_SOURCES`, and serves until shut down. This is a regular
/// async function; the caller provides the runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    serve(AppState::new(configured_sources(None, None))).await
}

/// Address and port the server listens on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindConfig {
    /// Interface to bind, e.g. `127.0.0.1`.
    pub addr: String,
    /// TCP port.
    pub port: u16,
}

impl BindConfig {
    /// Reads `BIND_ADDR` (default `127.0.0.1`) and `PORT` (default `8080`).
    /// An unparseable port falls back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("BIND_ADDR").ok().as_deref(),
            std::env::var("PORT").ok().as_deref(),
        )
    }

    fn from_values(addr: Option<&str>, port: Option<&str>) -> Self {
        Self {
            addr: addr
                .filter(|a| !a.trim().is_empty())
                .unwrap_or("127.0.0.1")
                .trim()
                .to_string(),
            port: port.and_then(|p| p.trim().parse().ok()).unwrap_or(8080),
        }
    }
}

/// Serves the API with the given state on the address from
/// [`BindConfig::from_env`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn serve(state: AppState) -> std::io::Result<()> {
    serve_on(state, BindConfig::from_env()).await
}

/// Serves the API with the given state on `bind`.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn serve_on(state: AppState, bind: BindConfig) -> std::io::Result<()> {
    let state = web::Data::new(state);

    log::info!(
        "Starting server on {}:{} with {} source(s)",
        bind.addr,
        bind.port,
        state.sources.len()
    );

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(api_scope())
    })
    .bind((bind.addr, bind.port))?
    .run()
    .await
}
