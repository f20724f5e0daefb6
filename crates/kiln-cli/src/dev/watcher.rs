//! Watches the served directory and turns file changes into reload events.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, warn};

use super::{ReloadEvent, ReloadHub};
use crate::error::{CliError, Result};

/// Recursive watcher publishing a [`ReloadEvent::Reload`] per changed
/// file. Dropping it stops the watch.
pub struct OutputWatcher {
    _watcher: RecommendedWatcher,
    root: PathBuf,
}

impl OutputWatcher {
    /// Start watching `root`, which must exist.
    pub fn spawn(root: &Path, hub: ReloadHub, debounce: Duration) -> Result<Self> {
        let root = root
            .canonicalize()
            .map_err(|_| CliError::FileNotFound(root.to_path_buf()))?;

        let watch_root = root.clone();
        let mut debouncer = Debouncer::new(debounce);

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(err) => {
                    warn!(error = %err, "file watcher error");
                    return;
                }
            };

            if !matches!(
                event.kind,
                EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
            ) {
                return;
            }

            for path in &event.paths {
                let Some(relative) = relative_path(path, &watch_root) else {
                    continue;
                };
                if !debouncer.should_emit(path, Instant::now()) {
                    continue;
                }

                debug!(path = %relative, "output changed");
                hub.publish(ReloadEvent::Reload { path: relative });
            }
        })?;

        watcher.watch(&root, RecursiveMode::Recursive)?;

        Ok(Self {
            _watcher: watcher,
            root,
        })
    }

    /// The canonical directory being watched.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Path relative to `root` with `/` separators, or `None` for paths outside
/// the root and hidden files.
fn relative_path(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;

    let mut parts = Vec::new();
    for component in relative.components() {
        let name = component.as_os_str().to_str()?;
        if name.starts_with('.') {
            return None;
        }
        parts.push(name);
    }

    (!parts.is_empty()).then(|| parts.join("/"))
}

/// Drops repeated events for the same path inside the window.
struct Debouncer {
    window: Duration,
    last_seen: HashMap<PathBuf, Instant>,
}

impl Debouncer {
    fn new(window: Duration) -> Self {
        Self {
            window,
            last_seen: HashMap::new(),
        }
    }

    fn should_emit(&mut self, path: &Path, now: Instant) -> bool {
        if let Some(last) = self.last_seen.get(path) {
            if now.duration_since(*last) < self.window {
                return false;
            }
        }

        if self.last_seen.len() > 1024 {
            let window = self.window;
            self.last_seen
                .retain(|_, seen| now.duration_since(*seen) < window);
        }
        self.last_seen.insert(path.to_path_buf(), now);
        true
    }
}
