//
// fpm_exporter
//
// This module deals with httpd related tasks.
//
#![forbid(unsafe_code)]
use axum::Router;
use axum::body::Bytes;
use axum::routing::get;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{
    debug,
    info,
};

mod collector;
pub use collector::Collector;

mod errors;
pub use errors::HttpdError;

mod handlers;
use handlers::{
    index,
    metrics,
};

mod templates;
use templates::render_index_page;

// This AppState is used to pass the collector and the rendered index
// template to the request handlers.
pub(self) struct AppState<C: Collector> {
    collector:  C,
    index_page: Bytes,
}

// Used for the httpd builder
#[derive(Debug)]
pub struct Server {
    bind_address:   String,
    telemetry_path: String,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind_address:   "127.0.0.1:9113".into(),
            telemetry_path: "/metrics".into(),
        }
    }
}

// Implements a builder pattern for configuring and running the http server.
impl Server {
    // Returns a new server instance.
    pub fn new() -> Self {
        Default::default()
    }

    // Sets the bind_address of the server.
    pub fn bind_address(mut self, bind_address: String) -> Self {
        debug!("Setting server bind_address to: {bind_address}");

        self.bind_address = bind_address;
        self
    }

    // Sets the telemetry path for the metrics.
    pub fn telemetry_path(mut self, telemetry_path: String) -> Self {
        debug!("Setting server telemetry_path to: {telemetry_path}");

        self.telemetry_path = telemetry_path;
        self
    }

    // Run the HTTP server, scraping the given collector on each metrics
    // request.
    pub async fn run<C: Collector>(self, collector: C)
    -> Result<(), HttpdError> {
        let bind_address = self.bind_address;
        let index_page   = render_index_page(&self.telemetry_path)?;

        let state = Arc::new(AppState {
            collector,
            index_page,
        });

        // Route handlers
        debug!("Registering HTTP app routes");
        let app = Router::new()
            // Root of HTTP server. Provides a basic index page and link to
            // the metrics page.
            .route("/", get(index::<C>))

            // Path serving up the metrics.
            .route(&self.telemetry_path, get(metrics::<C>))

            // Enable request logging
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        // Create the listener
        debug!("Attempting to bind to: {bind_address}");
        let listener = tokio::net::TcpListener::bind(&bind_address)
            .await
            .map_err(|e| {
                HttpdError::BindAddress(format!("{bind_address}: {e}"))
            })?;

        // Run it!
        info!("Starting HTTP server on {bind_address}");
        axum::serve(listener, app).await?;

        Ok(())
    }
}
