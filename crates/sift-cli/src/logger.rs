//! Logging infrastructure for the Sift CLI.
//!
//! Library crates emit `tracing` events; this module installs the subscriber
//! that prints them.
//!
//! # Example
//!
//! ```rust,no_run
//! use sift_cli::logger::init_logger;
//! use sift_config::GlobalSettings;
//! use tracing::{debug, info};
//!
//! init_logger(false, false, false, &GlobalSettings::default());
//!
//! info!("Planning module graph");
//! debug!("Evaluating module: {}", "native.js");
//! ```

use sift_config::{GlobalSettings, LogFormat};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "sift=debug,sift_config=debug,sift_graph=debug,sift_cli=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "sift=info,sift_config=info,sift_graph=info,sift_cli=info";

/// Pick the filter directive for the given flags.
///
/// 1. `--verbose`: debug for sift crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG` when set
/// 4. `settings.log_level` from the config file
/// 5. info for sift crates
pub fn filter_for(verbose: bool, quiet: bool, log_level: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new(VERBOSE_FILTER);
    }
    if quiet {
        return EnvFilter::new(QUIET_FILTER);
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    log_level
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize the tracing subscriber.
///
/// Call once, before any logging occurs. Log lines go to stderr so command
/// output on stdout stays machine-readable.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool, settings: &GlobalSettings) {
    init_logger_with_filter(
        filter_for(verbose, quiet, settings.log_level.as_deref()),
        settings.log_format.unwrap_or_default(),
        no_color,
    );
}

/// Initialize logger with custom environment filter.
pub fn init_logger_with_filter(filter: EnvFilter, format: LogFormat, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color);

    let registry = tracing_subscriber::registry().with(filter);

    // A second initialization (e.g. in tests) keeps the first subscriber.
    let _ = match format {
        LogFormat::Compact => registry.with(fmt_layer.compact()).try_init(),
        LogFormat::Full => registry.with(fmt_layer).try_init(),
        LogFormat::Pretty => registry.with(fmt_layer.pretty()).try_init(),
    };
}
