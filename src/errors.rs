// Exporter errors
#![forbid(unsafe_code)]
#![forbid(missing_docs)]
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExporterError {
    /// Returned when metrics could not be encoded into the exposition
    /// format.
    #[error("failed to encode metrics")]
    EncodeMetrics(#[from] std::fmt::Error),

    /// Returned when the GET against the status URI fails at the
    /// transport level.
    #[error("error scraping fpm: {0}")]
    Fetch(#[source] reqwest::Error),

    /// Returned when there are issues running the Httpd.
    #[error("httpd error")]
    Httpd(#[from] crate::httpd::HttpdError),

    /// Returned when the scrape client could not be built.
    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    /// Returned when std::io::Error occurs.
    #[error("std::io::Error")]
    Io(#[from] std::io::Error),

    /// Returned when a required line's field name isn't at its fixed
    /// position in the status report.
    #[error("unexpected line: {line}, expected: {expected}")]
    LineMismatch {
        /// The field name that should have been on the line.
        expected: &'static str,

        /// The line actually found.
        line: String,
    },

    /// Returned when the status report doesn't split into exactly the
    /// expected number of lines.
    #[error("unexpected number of lines in status: {0:?}")]
    MalformedReport(Vec<String>),

    /// Returned when a required value doesn't parse as an integer.
    #[error("could not parse value for '{field}'")]
    ParseValue {
        /// The field whose value was malformed.
        field: &'static str,

        /// The underlying integer parse error.
        #[source]
        source: std::num::ParseIntError,
    },

    /// Returned when persisting the textfile output fails.
    #[error("failed to persist metrics file")]
    Persist(#[from] tempfile::PersistError),

    /// Returned when the status page responds outside the accepted
    /// status code range.
    #[error("status {code} from fpm: {body}")]
    Status {
        /// The HTTP status code of the response.
        code: u16,

        /// The response body, or the transport error text if the body
        /// could not be read.
        body: String,
    },
}
