//
// fpm_exporter
//
// An exporter for Prometheus, exporting metrics parsed from the PHP-FPM
// status page.
//
#![forbid(unsafe_code)]
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod errors;
mod exporter;
mod file;
mod httpd;
mod macros;
mod status;

use errors::ExporterError;
use exporter::Exporter;
use file::{
    FileExporter,
    FileExporterOutput,
};

#[tokio::main]
async fn main() -> Result<(), ExporterError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Parse the commandline arguments.
    let matches = cli::parse_args();

    // Unwraps here should be safe since we provide clap with default values
    // for each of these.
    let scrape_uri = matches
        .get_one::<String>("FPM_SCRAPE_URI")
        .unwrap();
    debug!("fpm.scrape-uri: {scrape_uri}");

    let insecure = *matches
        .get_one::<bool>("FPM_INSECURE")
        .unwrap();
    debug!("fpm.insecure: {insecure}");

    let timeout = *matches
        .get_one::<u64>("FPM_TIMEOUT")
        .unwrap();
    debug!("fpm.timeout: {timeout}s");

    let exporter = Exporter::new(
        scrape_uri.clone(),
        insecure,
        Duration::from_secs(timeout),
    )?;

    // An output file path switches us to a single collection round written
    // to a file for the node exporter textfile collector.
    if let Some(output) = matches.get_one::<FileExporterOutput>("OUTPUT_FILE_PATH") {
        let file_exporter = FileExporter::new(output.clone());
        return file_exporter.export(exporter).await;
    }

    let bind_address = matches
        .get_one::<String>("WEB_LISTEN_ADDRESS")
        .unwrap();
    debug!("web.listen-address: {bind_address}");

    let telemetry_path = matches
        .get_one::<String>("WEB_TELEMETRY_PATH")
        .unwrap();
    debug!("web.telemetry-path: {telemetry_path}");

    httpd::Server::new()
        .bind_address(bind_address.clone())
        .telemetry_path(telemetry_path.clone())
        .run(exporter)
        .await?;

    Ok(())
}
