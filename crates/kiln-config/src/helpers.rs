use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

// Helper defaults
pub(crate) fn default_root() -> PathBuf {
    PathBuf::from(".")
}

pub(crate) fn default_polyfill_entry() -> Option<String> {
    Some("@babel/polyfill".to_string())
}

pub(crate) fn default_entry() -> PathBuf {
    PathBuf::from("src/index")
}

pub(crate) fn default_template() -> PathBuf {
    PathBuf::from("src/index.html")
}

pub(crate) fn default_html_filename() -> String {
    "index.html".to_string()
}

pub(crate) fn default_static_dir() -> PathBuf {
    PathBuf::from("src/static")
}

pub(crate) fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

pub(crate) fn default_output_static() -> PathBuf {
    PathBuf::from("static")
}

pub(crate) fn default_dev_port() -> u16 {
    3030
}

pub(crate) fn default_aliases() -> BTreeMap<String, PathBuf> {
    BTreeMap::from([("@".to_string(), PathBuf::from("src"))])
}

pub(crate) fn default_extensions() -> Vec<String> {
    [".tsx", ".ts", ".js", ".jsx"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Lexically normalize `path` without touching the filesystem. The current
/// directory comes back empty so that it prefixes every relative path.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let cleaned = path.clean();
    if cleaned == Path::new(".") {
        PathBuf::new()
    } else {
        cleaned
    }
}

/// Whether emptying or writing into `output` would touch `input`: either
/// contains the other.
pub(crate) fn paths_overlap(output: &Path, input: &Path) -> bool {
    let output = normalize_path(output);
    let input = normalize_path(input);
    input.starts_with(&output) || output.starts_with(&input)
}
