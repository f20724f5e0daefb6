//! Stylesheet loader chain selection.

use crate::mode::BuildMode;
use crate::steps::Loader;

/// Loader chain for stylesheets ending in `last` (e.g. [`Loader::Sass`]).
///
/// Production extracts styles into cacheable files and vendor-prefixes
/// them. Every other mode injects styles through `<style>` tags and skips
/// prefixing.
pub fn css_loaders(mode: BuildMode, last: Loader) -> Vec<Loader> {
    if mode.is_production() {
        vec![
            Loader::ExtractCss {
                hmr: mode.is_development(),
                reload_all: true,
            },
            Loader::Css,
            Loader::PostCss,
            last,
        ]
    } else {
        vec![Loader::Style, Loader::Css, last]
    }
}
