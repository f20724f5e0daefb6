//! Development server with hot reload via Server-Sent Events.
//!
//! Files come straight from the output directory. When hot reload is on,
//! HTML documents are read from disk and get the reload client injected.

use std::convert::Infallible;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use async_stream::stream;
use axum::{
    Router,
    extract::{Request, State},
    http::{Method, header},
    middleware::{self, Next},
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::get,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio_stream::Stream;
use tower_http::services::ServeDir;
use tracing::{debug, info, warn};

use super::{DEBOUNCE_MS, DevConfig, OutputWatcher, ReloadEvent, ReloadHub};
use crate::error::{CliError, Result, ResultExt};
use crate::ui;

/// SSE endpoint for reload events.
pub const EVENTS_PATH: &str = "/__kiln/events";
/// Reload client script.
pub const RELOAD_SCRIPT_PATH: &str = "/__kiln/reload.js";

const RELOAD_SCRIPT: &str = include_str!("../../assets/dev/reload-client.js");
const KEEP_ALIVE: Duration = Duration::from_secs(15);

#[derive(Clone)]
struct ServerState {
    hub: ReloadHub,
    content_base: PathBuf,
    index: String,
    hot: bool,
    shutdown: watch::Receiver<bool>,
}

pub struct DevServer {
    config: DevConfig,
    hub: ReloadHub,
    shutdown: watch::Sender<bool>,
}

impl DevServer {
    pub fn new(config: DevConfig) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            config,
            hub: ReloadHub::new(),
            shutdown,
        }
    }

    /// Hub the server publishes through; events sent here reach every
    /// connected browser.
    pub fn hub(&self) -> &ReloadHub {
        &self.hub
    }

    /// Bind, start the watcher when hot reload is on, and serve until
    /// Ctrl-C.
    ///
    /// # Errors
    ///
    /// Fails if the output directory cannot be created, the address is
    /// taken or the watcher cannot start.
    pub async fn start(self) -> Result<()> {
        let addr = self.config.addr;

        tokio::fs::create_dir_all(&self.config.content_base)
            .await
            .with_path(&self.config.content_base)?;

        let _watcher = if self.config.hot {
            let watcher = OutputWatcher::spawn(
                &self.config.content_base,
                self.hub.clone(),
                Duration::from_millis(DEBOUNCE_MS),
            )?;
            debug!(root = %watcher.root().display(), "watching output directory");
            Some(watcher)
        } else {
            None
        };

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| CliError::Server(format!("failed to bind to {addr}: {e}")))?;

        ui::success(&format!(
            "Serving {} at {}",
            self.config.content_base.display(),
            self.config.server_url()
        ));
        if !self.config.hot {
            ui::info("Hot reload is off for this mode");
        }

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `signal` resolves.
    ///
    /// Open event streams are closed when the signal fires so that
    /// connected browsers do not hold the shutdown open.
    ///
    /// # Errors
    ///
    /// Fails if the underlying server errors while accepting connections.
    pub async fn serve<F>(self, listener: TcpListener, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.router();
        let closing = self.shutdown.clone();

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                signal.await;
                debug!("closing event streams");
                closing.send_replace(true);
            })
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        info!("dev server stopped");
        Ok(())
    }

    /// The axum router, without binding.
    pub fn router(&self) -> Router {
        let state = ServerState {
            hub: self.hub.clone(),
            content_base: self.config.content_base.clone(),
            index: self.config.index.clone(),
            hot: self.config.hot,
            shutdown: self.shutdown.subscribe(),
        };

        Router::new()
            .route(EVENTS_PATH, get(handle_events))
            .route(RELOAD_SCRIPT_PATH, get(handle_reload_script))
            .fallback_service(ServeDir::new(&self.config.content_base))
            .layer(middleware::from_fn_with_state(state.clone(), serve_html))
            .with_state(state)
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// Resolves once the server starts shutting down. Never resolves if the
/// server is gone without having signalled.
async fn stopping(shutdown: &mut watch::Receiver<bool>) {
    if shutdown.wait_for(|stopping| *stopping).await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Stream reload events to one browser until the hub closes or the server
/// shuts down.
async fn handle_events(
    State(state): State<ServerState>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let mut rx = state.hub.subscribe();
    let mut shutdown = state.shutdown.clone();
    debug!(subscribers = state.hub.subscriber_count(), "client connected");

    let events = stream! {
        yield Ok::<_, Infallible>(sse_event(&ReloadEvent::Connected));
        loop {
            let received = tokio::select! {
                () = stopping(&mut shutdown) => break,
                received = rx.recv() => received,
            };
            match received {
                Ok(event) => {
                    yield Ok::<_, Infallible>(sse_event(&event));
                }
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "client lagged behind reload events");
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(events).keep_alive(KeepAlive::new().interval(KEEP_ALIVE).text("ping"))
}

fn sse_event(event: &ReloadEvent) -> Event {
    let data = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
    Event::default().event(event.name()).data(data)
}

async fn handle_reload_script() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "application/javascript"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        RELOAD_SCRIPT,
    )
}

/// Serve HTML documents with the reload client injected; everything else
/// falls through to the static file service.
async fn serve_html(State(state): State<ServerState>, request: Request, next: Next) -> Response {
    if !state.hot || request.method() != Method::GET {
        return next.run(request).await;
    }

    let Some(file) = html_document(&state.content_base, request.uri().path(), &state.index) else {
        return next.run(request).await;
    };

    match tokio::fs::read_to_string(&file).await {
        Ok(html) => (
            [
                (header::CONTENT_TYPE, "text/html; charset=utf-8"),
                (header::CACHE_CONTROL, "no-cache"),
            ],
            inject_reload_script(&html),
        )
            .into_response(),
        Err(err) => {
            debug!(path = %file.display(), error = %err, "html document not readable");
            next.run(request).await
        }
    }
}

/// Map a request path to an HTML file under `base`.
///
/// `/` and paths ending in `/` map to the index document. Paths that try
/// to leave `base` yield `None`.
fn html_document(base: &Path, request_path: &str, index: &str) -> Option<PathBuf> {
    let relative = request_path.trim_start_matches('/');
    let relative = if relative.is_empty() || relative.ends_with('/') {
        format!("{relative}{index}")
    } else if relative.ends_with(".html") {
        relative.to_string()
    } else {
        return None;
    };

    let relative = Path::new(&relative);
    if !relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
    {
        return None;
    }
    Some(base.join(relative))
}

/// Add the reload client before the closing `</body>` tag, or at the end
/// when there is none.
pub fn inject_reload_script(html: &str) -> String {
    let script_tag = format!(r#"<script src="{RELOAD_SCRIPT_PATH}"></script>"#);

    match html.rfind("</body>") {
        Some(pos) => {
            let mut result = String::with_capacity(html.len() + script_tag.len());
            result.push_str(&html[..pos]);
            result.push_str(&script_tag);
            result.push_str(&html[pos..]);
            result
        }
        None => format!("{html}{script_tag}"),
    }
}
