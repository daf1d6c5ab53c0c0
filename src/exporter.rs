//! fpm_exporter library
//!
//! This module handles the scraping and exporting of PHP-FPM metrics.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use crate::{
    register_counter_with_registry,
    register_gauge_with_registry,
    register_info_with_registry,
};
use crate::errors::ExporterError;
use crate::httpd::{
    Collector,
    HttpdError,
};
use crate::status::{
    Field,
    StatusReport,
};
use prometheus_client::encoding::text;
use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{
    debug,
    warn,
};

/// Label attached to the connection gauges, one value per status report
/// field.
#[derive(Clone, Debug, Eq, Hash, PartialEq, EncodeLabelSet)]
struct StateLabel {
    state: String,
}

impl From<Field> for StateLabel {
    fn from(field: Field) -> Self {
        Self {
            state: field.label().to_owned(),
        }
    }
}

/// Exporter structure containing the time series that are being tracked.
pub struct Exporter {
    // Exporter Registry
    registry: Registry,

    // URI of the PHP-FPM status page being scraped.
    uri: String,

    // Client used to fetch the status page.
    client: reqwest::Client,

    // Serializes collection rounds. Held across the fetch, so this must
    // be an async lock.
    scrape_lock: Mutex<()>,

    // Prometheus time series
    // These come from the status report
    connections: Family<StateLabel, Gauge>,

    // Metrics this exporter generates
    scrape_failures: Counter,
}

/// Exporter implementation
impl Exporter {
    /// Return a new Exporter instance scraping the given status URI.
    ///
    /// `insecure` disables TLS peer verification for https status pages.
    /// No I/O is performed here; the first fetch happens on the first
    /// collection round.
    pub fn new(
        uri: String,
        insecure: bool,
        timeout: Duration,
    ) -> Result<Self, ExporterError> {
        debug!("New Exporter scraping: {uri}");

        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(insecure)
            .timeout(timeout)
            .build()
            .map_err(ExporterError::HttpClient)?;

        let mut registry = Registry::with_prefix("fpm");

        let connections = register_gauge_with_registry!(
            "connections_current",
            "Number of connections currently processed by fpm",
            StateLabel,
            registry,
        );

        let scrape_failures = register_counter_with_registry!(
            "exporter_scrape_failures",
            "Number of errors while scraping fpm",
            registry,
        );

        register_info_with_registry!(
            "exporter_build",
            "A metric with a constant '1' value labelled by version and \
             rustc version from which fpm_exporter was built",
            vec![
                ("rustc".to_owned(), env!("RUSTC_VERSION").to_owned()),
                ("version".to_owned(), env!("CARGO_PKG_VERSION").to_owned()),
            ],
            registry,
        );

        // The published label set is always exactly the known fields,
        // starting out zeroed.
        for field in Field::ALL {
            connections.get_or_create(&field.into()).set(0);
        }

        Ok(Self {
            registry,
            uri,
            client,
            scrape_lock: Mutex::new(()),
            connections,
            scrape_failures,
        })
    }

    /// Run one collection round and export the metrics.
    ///
    /// This will return a `String` containing the metrics in the
    /// OpenMetrics text format. A failed scrape is not an error here: it
    /// increments the failure counter and the gauges keep their
    /// last-known-good values.
    pub async fn export(&self) -> Result<String, ExporterError> {
        // Serializes concurrent collection rounds, bounding us to one
        // in-flight request against the status page.
        let _guard = self.scrape_lock.lock().await;

        if let Err(e) = self.scrape().await {
            warn!("error scraping fpm: {e}");

            self.scrape_failures.inc();
        }

        // Gather the time series into a buffer
        let mut buffer = String::new();
        text::encode(&mut buffer, &self.registry)?;

        Ok(buffer)
    }

    // Performs a single fetch-and-parse against the status page and sets
    // the gauges. Any error leaves every gauge untouched.
    async fn scrape(&self) -> Result<(), ExporterError> {
        debug!("Scraping status page: {}", self.uri);

        let response = self.client
            .get(&self.uri)
            .send()
            .await
            .map_err(ExporterError::Fetch)?;

        let code = response.status().as_u16();

        if !(200..400).contains(&code) {
            // Carry the response body in the error, or the transport
            // error text if the body could not be read.
            let body = match response.text().await {
                Ok(body) => body,
                Err(e)   => e.to_string(),
            };

            return Err(ExporterError::Status {
                code,
                body,
            });
        }

        let body = response.text().await.map_err(ExporterError::Fetch)?;

        // Parse the whole report before touching any gauge, so that a
        // mismatch on a late line can't publish a partial scrape.
        let report = StatusReport::parse(&body)?;

        for field in Field::ALL {
            self.connections
                .get_or_create(&field.into())
                .set(report.value(field));
        }

        Ok(())
    }
}

/// Implements the Collector trait used by the HTTPd component.
impl Collector for Exporter {
    async fn collect(&self) -> Result<String, HttpdError> {
        match self.export().await {
            Ok(metrics) => Ok(metrics),
            Err(e)      => Err(HttpdError::CollectorError(e.to_string())),
        }
    }
}
