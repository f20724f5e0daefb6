//! Logging setup for the Kiln CLI.
//!
//! Verbosity is chosen in this order:
//! 1. `--verbose`: DEBUG for kiln crates
//! 2. `--quiet`: ERROR only
//! 3. `RUST_LOG`: custom filter
//! 4. default: INFO for kiln crates
//!
//! ```rust,no_run
//! use kiln_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//! info!("serving dist/");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "kiln=debug,kiln_config=debug,kiln_cli=debug";
const QUIET_FILTER: &str = "kiln=error,kiln_config=error,kiln_cli=error";
const DEFAULT_FILTER: &str = "kiln=info,kiln_config=info,kiln_cli=info";

/// Initialize the global tracing subscriber.
///
/// Call once, before anything logs. `verbose` wins over `quiet`.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Initialize the subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color && should_use_colors())
        .compact();

    // A second initialization (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Whether the terminal should get ANSI colours.
///
/// `NO_COLOR` disables, `FORCE_COLOR` forces, otherwise the terminal is
/// asked.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_takes_precedence_over_quiet() {
        assert_eq!(filter_for(true, true).to_string(), EnvFilter::new(VERBOSE_FILTER).to_string());
    }

    #[test]
    fn quiet_filter_only_lets_errors_through() {
        let filter = filter_for(false, true).to_string();
        assert!(filter.contains("kiln_config=error"));
        assert!(!filter.contains("info"));
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_logger(false, true, true);
        init_logger(true, false, true);
    }
}
