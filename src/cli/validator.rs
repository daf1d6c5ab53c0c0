// Command line interface parsing validators
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use crate::file::FileExporterOutput;
use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

// Basic checks for valid filesystem path for .prom output file
pub fn is_valid_output_file_path(s: &str) -> Result<FileExporterOutput, String> {
    debug!("Ensuring that output.file-path is valid");

    // - is special and is a request for us to output to stdout
    if s == "-" {
        return Ok(FileExporterOutput::Stdout)
    }

    // Get a Path from our string and start checking
    let path = Path::new(&s);

    // We only take absolute paths
    if !path.is_absolute() {
        return Err("output.file-path only accepts absolute paths".to_owned());
    }

    // We can't write to a directory
    if path.is_dir() {
        return Err("output.file-path must not point at a directory".to_owned());
    }

    // Node Exporter textfiles must end with .prom
    if let Some(ext) = path.extension() {
        // Got an extension, ensure that it's .prom
        if ext != "prom" {
            return Err("output.file-path must have .prom extension".to_owned());
        }
    }
    else {
        // Didn't find an extension at all
        return Err("output.file-path must have .prom extension".to_owned());
    }

    // Check that the directory exists
    if let Some(dir) = path.parent() {
        // Got a parent directory, ensure it exists
        if !dir.is_dir() {
            return Err("output.file-path directory must exist".to_owned());
        }
    }
    else {
        // Didn't get a parent directory at all
        return Err("output.file-path directory must exist".to_owned());
    }

    Ok(FileExporterOutput::File(path.to_path_buf()))
}

// Checks that the scrape URI parses as an http(s) URL.
pub fn is_valid_scrape_uri(s: &str) -> Result<String, String> {
    debug!("Ensuring that fpm.scrape-uri is valid");

    let url = match reqwest::Url::parse(s) {
        Ok(url) => url,
        Err(_)  => return Err(format!("'{s}' is not a valid URI")),
    };

    match url.scheme() {
        "http" | "https" => Ok(s.to_owned()),
        scheme => Err(format!("'{scheme}' URIs cannot be scraped")),
    }
}

// Used as a validator for the argument parsing.
// We validate the parse to SocketAddr here but still continue to return a
// string. TcpListener::bind is fine with taking a string there.
pub fn is_valid_socket_addr(s: &str) -> Result<String, String> {
    debug!("Ensuring that web.listen-address is valid");

    match SocketAddr::from_str(s) {
        Ok(_)  => Ok(s.to_owned()),
        Err(_) => Err(format!("'{s}' is not a valid ADDR:PORT string")),
    }
}

// Checks that the telemetry_path is valid.
// This check is extremely basic, and there may still be invalid paths that
// could be passed.
pub fn is_valid_telemetry_path(s: &str) -> Result<String, String> {
    debug!("Ensuring that web.telemetry-path is valid");

    // Ensure s isn't empty.
    if s.is_empty() {
        return Err("path must not be empty".to_owned());
    }

    // Ensure that s starts with /
    if !s.starts_with('/') {
        return Err("path must start with /".to_owned());
    }

    // Ensure that s isn't literally /
    if s == "/" {
        return Err("path must not be /".to_owned());
    }

    Ok(s.to_owned())
}

// Ensures that the scrape timeout is a sensible number of seconds.
pub fn is_valid_timeout(s: &str) -> Result<u64, String> {
    debug!("Ensuring that fpm.timeout is valid");

    let timeout = match s.parse::<u64>() {
        Ok(t)  => t,
        Err(_) => return Err(format!("could not parse '{s}' as seconds")),
    };

    if timeout < 1 {
        return Err("fpm.timeout cannot be less than 1 second".to_owned());
    }

    Ok(timeout)
}
