//! Terminal status output.
//!
//! ```no_run
//! use kiln_cli::ui;
//!
//! ui::init_colors(false);
//! ui::success("Configuration is valid");
//! ui::warning("Unrecognized NODE_ENV 'staging'");
//! ```

mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use messages::{info, success, warning};

static COLORS: AtomicBool = AtomicBool::new(true);

/// Decide once whether status messages are coloured.
///
/// `--no-color` always wins; otherwise the terminal and the
/// `NO_COLOR`/`FORCE_COLOR` conventions decide.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && crate::logger::should_use_colors();
    console::set_colors_enabled_stderr(enabled);
    COLORS.store(enabled, Ordering::Relaxed);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_color_flag_disables_colors() {
        init_colors(true);
        assert!(!colors_enabled());
    }
}
