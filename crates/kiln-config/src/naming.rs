//! Output file naming policy.

use crate::mode::BuildMode;

pub const NAME_PLACEHOLDER: &str = "[name]";
pub const HASH_PLACEHOLDER: &str = "[hash]";

/// Name template for emitted files of the given extension.
///
/// Development keeps names stable (`[name].js`); every other mode
/// qualifies them with a content hash (`[name].[hash].js`).
///
/// ```
/// use kiln_config::{filename, BuildMode};
///
/// assert_eq!(filename("js", BuildMode::Development), "[name].js");
/// assert_eq!(filename("css", BuildMode::Production), "[name].[hash].css");
/// ```
pub fn filename(extension: &str, mode: BuildMode) -> String {
    if mode.is_development() {
        format!("{NAME_PLACEHOLDER}.{extension}")
    } else {
        format!("{NAME_PLACEHOLDER}.{HASH_PLACEHOLDER}.{extension}")
    }
}

/// Whether a name template carries a content hash.
pub fn has_hash_segment(template: &str) -> bool {
    template.contains(HASH_PLACEHOLDER)
}
