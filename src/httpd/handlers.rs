//
// fpm_exporter
//
// This module deals with httpd route handlers.
//
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{
    IntoResponse,
    Response,
};
use std::sync::Arc;
use super::AppState;
use super::Collector;
use tracing::debug;

// Content type of the OpenMetrics exposition format we serve.
const OPENMETRICS_CONTENT_TYPE: &str =
    "application/openmetrics-text; version=1.0.0; charset=utf-8";

// Displays the index page. This is a page which simply links to the actual
// telemetry path.
pub(in crate::httpd) async fn index<C: Collector>(
    State(state): State<Arc<AppState<C>>>,
) -> Response {
    debug!("Displaying index page");

    let body = state.index_page.clone();

    (
        [(CONTENT_TYPE, "text/html; charset=utf-8")],
        body,
    ).into_response()
}

// Returns a Response containing the Prometheus Exporter output, or an
// InternalServerError if things fail for some reason.
pub(in crate::httpd) async fn metrics<C: Collector>(
    State(state): State<Arc<AppState<C>>>,
) -> Response {
    debug!("Processing metrics request");

    // Exporter could fail.
    match state.collector.collect().await {
        Ok(output) => {
            (
                [(CONTENT_TYPE, OPENMETRICS_CONTENT_TYPE)],
                output,
            ).into_response()
        },
        Err(e) => {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                e.to_string(),
            ).into_response()
        },
    }
}
