//! Status message functions for terminal output.

use owo_colors::OwoColorize;

use super::colors_enabled;

/// Print a success message to stderr.
pub fn success(message: &str) {
    if colors_enabled() {
        eprintln!("{} {}", "✓".green().bold(), message);
    } else {
        eprintln!("✓ {message}");
    }
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    if colors_enabled() {
        eprintln!("{} {}", "ℹ".blue().bold(), message);
    } else {
        eprintln!("ℹ {message}");
    }
}

/// Print a warning message to stderr.
///
/// # Examples
///
/// ```no_run
/// use kiln_cli::ui::warning;
///
/// warning("Port 3030 is already in use");
/// ```
pub fn warning(message: &str) {
    if colors_enabled() {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    } else {
        eprintln!("⚠ {message}");
    }
}
