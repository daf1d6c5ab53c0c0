//!
//! Command line interface parsing
//!
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use clap::{
    crate_description,
    crate_name,
    crate_version,
    value_parser,
    Arg,
    ArgMatches,
    Command,
};
use tracing::debug;

mod validator;
use validator::{
    is_valid_output_file_path,
    is_valid_scrape_uri,
    is_valid_socket_addr,
    is_valid_telemetry_path,
    is_valid_timeout,
};

// Create a clap app
fn create_app() -> Command {
    debug!("Creating clap app");

    Command::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .term_width(80)
        .arg(
            Arg::new("FPM_INSECURE")
                .env("FPM_INSECURE")
                .hide_env_values(true)
                .long("fpm.insecure")
                .value_name("BOOL")
                .help("Ignore server certificate if using https.")
                .default_value("true")
                .value_parser(value_parser!(bool))
        )
        .arg(
            Arg::new("FPM_SCRAPE_URI")
                .env("FPM_SCRAPE_URI")
                .hide_env_values(true)
                .long("fpm.scrape-uri")
                .value_name("URI")
                .help("URI of the PHP-FPM status page.")
                .default_value("http://localhost/fpm_status")
                .value_parser(is_valid_scrape_uri)
        )
        .arg(
            Arg::new("FPM_TIMEOUT")
                .env("FPM_TIMEOUT")
                .hide_env_values(true)
                .long("fpm.timeout")
                .value_name("SECONDS")
                .help("Timeout for scraping the status page.")
                .default_value("10")
                .value_parser(is_valid_timeout)
        )
        .arg(
            Arg::new("OUTPUT_FILE_PATH")
                .env("OUTPUT_FILE_PATH")
                .hide_env_values(true)
                .long("output.file-path")
                .value_name("FILE")
                .help("File to output metrics to.")
                .value_parser(is_valid_output_file_path)
        )
        .arg(
            Arg::new("WEB_LISTEN_ADDRESS")
                .env("WEB_LISTEN_ADDRESS")
                .hide_env_values(true)
                .long("web.listen-address")
                .value_name("[ADDR:PORT]")
                .help("Address on which to expose metrics and web interface.")
                .default_value("127.0.0.1:9113")
                .value_parser(is_valid_socket_addr)
        )
        .arg(
            Arg::new("WEB_TELEMETRY_PATH")
                .env("WEB_TELEMETRY_PATH")
                .hide_env_values(true)
                .long("web.telemetry-path")
                .value_name("PATH")
                .help("Path under which to expose metrics.")
                .default_value("/metrics")
                .value_parser(is_valid_telemetry_path)
        )
}

// Parses the command line arguments and returns the matches.
pub fn parse_args() -> ArgMatches {
    debug!("Parsing command line arguments");

    create_app().get_matches()
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use pretty_assertions::assert_eq;
    use std::env;
    use std::panic;
    use std::sync::Mutex;

    // Used during env_tests
    static LOCK: Lazy<Mutex<i8>> = Lazy::new(|| Mutex::new(0));

    // Wraps setting and unsetting of environment variables
    fn env_test<T>(key: &str, var: &str, test: T)
    where T: FnOnce() + panic::UnwindSafe {
        // This ensures that only one test can be manipulating the environment
        // at a time.
        let _locked = LOCK.lock().unwrap();

        env::set_var(key, var);

        let result = panic::catch_unwind(|| {
            test()
        });

        env::remove_var(key);

        assert!(result.is_ok())
    }

    #[test]
    fn default_fpm_insecure() {
        let _locked = LOCK.lock().unwrap();

        let argv = vec!["fpm_exporter"];
        let matches = create_app().get_matches_from(argv);
        let insecure = matches.get_one::<bool>("FPM_INSECURE");

        assert_eq!(insecure, Some(&true));
    }

    #[test]
    fn default_fpm_scrape_uri() {
        let _locked = LOCK.lock().unwrap();

        let argv = vec!["fpm_exporter"];
        let matches = create_app().get_matches_from(argv);
        let uri = matches.get_one::<String>("FPM_SCRAPE_URI");

        assert_eq!(uri, Some(&"http://localhost/fpm_status".into()));
    }

    #[test]
    fn default_fpm_timeout() {
        let _locked = LOCK.lock().unwrap();

        let argv = vec!["fpm_exporter"];
        let matches = create_app().get_matches_from(argv);
        let timeout = matches.get_one::<u64>("FPM_TIMEOUT");

        assert_eq!(timeout, Some(&10));
    }

    #[test]
    fn default_web_listen_address() {
        // Must lock since we're still testing env vars here even though we're
        // not setting one.
        let _locked = LOCK.lock().unwrap();

        let argv = vec!["fpm_exporter"];
        let matches = create_app().get_matches_from(argv);
        let listen_address = matches.get_one::<String>("WEB_LISTEN_ADDRESS");

        assert_eq!(listen_address, Some(&"127.0.0.1:9113".into()));
    }

    #[test]
    fn default_web_telemetry_path() {
        // Must lock since we're still testing env vars here even though we're
        // not setting one.
        let _locked = LOCK.lock().unwrap();

        let argv = vec!["fpm_exporter"];
        let matches = create_app().get_matches_from(argv);
        let telemetry_path = matches.get_one::<String>("WEB_TELEMETRY_PATH");

        assert_eq!(telemetry_path, Some(&"/metrics".into()));
    }

    #[test]
    fn cli_set_fpm_insecure() {
        let argv = vec![
            "fpm_exporter",
            "--fpm.insecure=false",
        ];

        let matches = create_app().get_matches_from(argv);
        let insecure = matches.get_one::<bool>("FPM_INSECURE");

        assert_eq!(insecure, Some(&false));
    }

    #[test]
    fn cli_set_fpm_scrape_uri() {
        let argv = vec![
            "fpm_exporter",
            "--fpm.scrape-uri=https://127.0.0.1:8443/status",
        ];

        let matches = create_app().get_matches_from(argv);
        let uri = matches.get_one::<String>("FPM_SCRAPE_URI");

        assert_eq!(uri, Some(&"https://127.0.0.1:8443/status".into()));
    }

    #[test]
    fn cli_set_web_listen_address() {
        let argv = vec![
            "fpm_exporter",
            "--web.listen-address=127.0.1.2:9113",
        ];

        let matches = create_app().get_matches_from(argv);
        let listen_address = matches.get_one::<String>("WEB_LISTEN_ADDRESS");

        assert_eq!(listen_address, Some(&"127.0.1.2:9113".into()));
    }

    #[test]
    fn cli_override_env_web_listen_address() {
        env_test("WEB_LISTEN_ADDRESS", "127.0.1.2:9113", || {
            let argv = vec![
                "fpm_exporter",
                "--web.listen-address=127.0.1.3:9113",
            ];

            let matches = create_app().get_matches_from(argv);
            let listen_address = matches.get_one::<String>("WEB_LISTEN_ADDRESS");

            assert_eq!(listen_address, Some(&"127.0.1.3:9113".into()));
        });
    }

    #[test]
    fn cli_override_env_web_telemetry_path() {
        env_test("WEB_TELEMETRY_PATH", "/envvar", || {
            let argv = vec![
                "fpm_exporter",
                "--web.telemetry-path=/clioverride",
            ];

            let matches = create_app().get_matches_from(argv);
            let telemetry_path = matches.get_one::<String>("WEB_TELEMETRY_PATH");

            assert_eq!(telemetry_path, Some(&"/clioverride".into()));
        });
    }

    #[test]
    fn cli_set_web_telemetry_path() {
        let argv = vec![
            "fpm_exporter",
            "--web.telemetry-path=/test",
        ];

        let matches = create_app().get_matches_from(argv);
        let telemetry_path = matches.get_one::<String>("WEB_TELEMETRY_PATH");

        assert_eq!(telemetry_path, Some(&"/test".into()));
    }

    #[test]
    fn env_set_fpm_scrape_uri() {
        env_test("FPM_SCRAPE_URI", "http://10.0.0.1/fpm_status", || {
            let argv = vec!["fpm_exporter"];
            let matches = create_app().get_matches_from(argv);
            let uri = matches.get_one::<String>("FPM_SCRAPE_URI");

            assert_eq!(uri, Some(&"http://10.0.0.1/fpm_status".into()));
        });
    }

    #[test]
    fn env_set_web_listen_address() {
        env_test("WEB_LISTEN_ADDRESS", "127.0.1.2:9113", || {
            let argv = vec!["fpm_exporter"];
            let matches = create_app().get_matches_from(argv);
            let listen_address = matches.get_one::<String>("WEB_LISTEN_ADDRESS");

            assert_eq!(listen_address, Some(&"127.0.1.2:9113".into()));
        });
    }

    #[test]
    fn env_set_web_telemetry_path() {
        env_test("WEB_TELEMETRY_PATH", "/test", || {
            let argv = vec!["fpm_exporter"];
            let matches = create_app().get_matches_from(argv);
            let telemetry_path = matches.get_one::<String>("WEB_TELEMETRY_PATH");

            assert_eq!(telemetry_path, Some(&"/test".into()));
        });
    }
}
