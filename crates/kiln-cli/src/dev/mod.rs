//! Development server: static serving of the output directory plus
//! push-based reload notifications over Server-Sent Events.

mod server;
mod state;
mod watcher;

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Serialize;

pub use server::{DevServer, EVENTS_PATH, RELOAD_SCRIPT_PATH, inject_reload_script};
pub use state::ReloadHub;
pub use watcher::OutputWatcher;

/// Debounce window for repeated changes to the same path.
pub const DEBOUNCE_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevConfig {
    pub addr: SocketAddr,
    /// Directory served over HTTP
    pub content_base: PathBuf,
    /// Document served for `/`
    pub index: String,
    /// Inject the reload client and watch `content_base`
    pub hot: bool,
}

impl DevConfig {
    pub fn server_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Event pushed to connected browsers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ReloadEvent {
    /// Sent once to each new subscriber
    Connected,
    Reload {
        /// Changed file, relative to the served directory
        path: String,
    },
}

impl ReloadEvent {
    /// SSE event name.
    pub fn name(&self) -> &'static str {
        match self {
            ReloadEvent::Connected => "connected",
            ReloadEvent::Reload { .. } => "reload",
        }
    }
}
