//! # bizdir: Business Directory API
//!
//! `bizdir` is a JSON REST service for a business directory. Clients create, read, update and
//! delete businesses, reviews of those businesses and photos of them, and list everything a given
//! user owns or has written.
//!
//! ## Architecture
//!
//! The HTTP layer is built on [Axum](https://github.com/tokio-rs/axum). All persistence goes
//! through the [`db::store::DocumentStore`] trait, a small document-database adapter with two
//! implementations: a process-local in-memory store and PostgreSQL with JSONB documents.
//!
//! ### Request Flow
//!
//! A request is matched against the routes in [`build_router`] and handed to a handler in
//! [`api::handlers`]. Handlers validate the body ([`api::extract::ValidatedJson`]), run the
//! relevant [`integrity`] checks, allocate an id from [`db::sequence`] when creating, and call the
//! repositories in [`db::handlers`]. Every failure is an [`errors::Error`], which renders as
//! `{"error": "..."}` with a matching status code. Paths no route matches fall through to the
//! static file directory (when configured) and then to a JSON 404.
//!
//! ### Core Components
//!
//! - **API layer** ([`api`]): handlers, request/response models and pagination
//! - **Database layer** ([`db`]): the document store, repositories and id allocation
//! - **Integrity checks** ([`integrity`]): referential and uniqueness checks run before writes
//! - **Seeding** ([`seed`]): loads JSON data files into the store on startup
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use bizdir::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = bizdir::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     bizdir::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! See [`config`] for the YAML layout and environment overrides.

pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod integrity;
mod openapi;
pub mod seed;
pub mod telemetry;
#[cfg(test)]
pub mod test_utils;
pub mod types;

use std::sync::Arc;

use axum::{
    Router,
    http::{self, HeaderValue},
    routing::{any, get},
};
use bon::Builder;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::config::{CorsOrigin, DatabaseConfig};
use crate::db::store::{InMemoryStore, PostgresStore, SharedStore};
use crate::openapi::ApiDoc;
pub use config::Config;

/// Application state shared across all request handlers.
#[derive(Clone, Builder)]
pub struct AppState {
    pub store: SharedStore,
    pub config: Config,
}

/// Get the database migrator for the PostgreSQL store
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let allow_origin = if config.cors.allowed_origins.contains(&CorsOrigin::Wildcard) {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in &config.cors.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                // Origins carry no path, so drop the trailing slash `Url` adds
                origins.push(url.origin().ascii_serialization().parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(origins)
    };

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([http::Method::GET, http::Method::POST, http::Method::PUT, http::Method::DELETE])
        .allow_headers([http::header::CONTENT_TYPE]);

    if let Some(max_age) = config.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router with all endpoints and middleware.
///
/// Requests that match no API route are served from `static_dir` when one is configured, and
/// otherwise (or when the file does not exist) answered with a JSON 404.
///
/// # Errors
///
/// Returns an error if the CORS configuration is invalid.
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    use api::handlers::{businesses, not_found, photos, reviews, users};

    let api_routes = Router::new()
        .route("/healthz", get(api::handlers::healthz))
        // Businesses
        .route("/businesses", get(businesses::list_businesses).post(businesses::create_business))
        .route(
            "/businesses/{id}",
            get(businesses::get_business)
                .put(businesses::update_business)
                .delete(businesses::delete_business),
        )
        // Reviews
        .route("/reviews", get(reviews::list_reviews).post(reviews::create_review))
        .route(
            "/reviews/{id}",
            get(reviews::get_review).put(reviews::update_review).delete(reviews::delete_review),
        )
        // Photos
        .route("/photos", get(photos::list_photos).post(photos::create_photo))
        .route(
            "/photos/{id}",
            get(photos::get_photo).put(photos::update_photo).delete(photos::delete_photo),
        )
        // Per-user listings
        .route("/users/{userid}/businesses", get(users::list_user_businesses))
        .route("/users/{userid}/reviews", get(users::list_user_reviews))
        .route("/users/{userid}/photos", get(users::list_user_photos))
        .with_state(state.clone());

    let router = Router::new()
        .merge(api_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    let router = match &state.config.static_dir {
        Some(dir) => {
            debug!(static_dir = %dir.display(), "Serving static files for unmatched paths");
            router.fallback_service(
                ServeDir::new(dir)
                    .call_fallback_on_method_not_allowed(true)
                    .fallback(any(not_found)),
            )
        }
        None => router.fallback(not_found),
    };

    let router = router.layer(create_cors_layer(&state.config)?).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// Main application struct that owns all resources and lifecycle.
///
/// 1. **Create**: [`Application::new`] connects the configured store, runs migrations (PostgreSQL
///    only), seeds data files and builds the router
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and starts handling requests
/// 3. **Shutdown**: when the shutdown future resolves, in-flight requests finish and the store
///    is closed
pub struct Application {
    router: Router,
    config: Config,
    store: SharedStore,
}

impl Application {
    /// Create a new application instance backed by the configured store
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting bizdir with configuration: {:#?}", config);

        let store: SharedStore = match &config.database {
            DatabaseConfig::Memory => {
                info!("Using in-memory document store");
                Arc::new(InMemoryStore::new())
            }
            DatabaseConfig::External { url, pool } => {
                info!("Connecting to PostgreSQL document store");
                Arc::new(PostgresStore::connect(url, pool).await?)
            }
        };

        Self::new_with_store(config, store).await
    }

    /// Create a new application instance over an existing store
    pub async fn new_with_store(config: Config, store: SharedStore) -> anyhow::Result<Self> {
        seed::seed_store(store.as_ref(), &config.seed).await?;

        let state = AppState::builder().store(store.clone()).config(config.clone()).build();
        let router = build_router(state)?;

        Ok(Self { router, config, store })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router.into_make_service()).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("bizdir listening on http://{}", listener.local_addr()?);

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing document store...");
        self.store.close().await;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}
