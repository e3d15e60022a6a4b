//! Preview server with live reload support

use std::{convert::Infallible, path::Path, sync::Arc, time::Duration};

use axum::{
    Router,
    extract::State,
    http::header,
    response::{
        IntoResponse,
        sse::{Event, KeepAlive, Sse},
    },
    routing::get,
};
use tokio::sync::broadcast;
use tokio_stream::{Stream, StreamExt, wrappers::BroadcastStream};
use tower_http::services::ServeDir;

/// Path of the live reload event stream.
pub const LIVERELOAD_PATH: &str = "/__livereload";

/// Path of the live reload client script.
pub const LIVERELOAD_SCRIPT_PATH: &str = "/__livereload.js";

/// Live reload message type.
#[derive(Debug, Clone)]
pub enum ReloadMessage {
    /// Manifests were rebuilt; reload the page.
    Reload,
    /// A rebuild failed; the page stays as it is.
    BuildFailed(String),
}

/// Server state containing the reload broadcaster.
#[derive(Clone)]
pub struct ServerState {
    /// Broadcast channel for live reload events.
    pub reload_tx: broadcast::Sender<ReloadMessage>,
}

impl ServerState {
    /// Create a new server state.
    pub fn new() -> Self {
        let (reload_tx, _) = broadcast::channel(16);
        Self { reload_tx }
    }

    /// Send a reload notification to all connected clients.
    pub fn notify_reload(&self) {
        let _ = self.reload_tx.send(ReloadMessage::Reload);
    }

    /// Tell connected clients that a rebuild failed.
    pub fn notify_failure(&self, message: impl Into<String>) {
        let _ = self.reload_tx.send(ReloadMessage::BuildFailed(message.into()));
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the preview server router serving `site_root`.
pub fn create_router(site_root: &Path, state: Arc<ServerState>) -> Router {
    Router::new()
        .route(LIVERELOAD_PATH, get(livereload_handler))
        .route(LIVERELOAD_SCRIPT_PATH, get(script_handler))
        .fallback_service(ServeDir::new(site_root))
        .with_state(state)
}

fn to_event(message: ReloadMessage) -> Event {
    match message {
        ReloadMessage::Reload => Event::default().data("reload"),
        ReloadMessage::BuildFailed(error) => Event::default().event("build-error").data(error),
    }
}

/// Server-Sent Events handler for live reload.
async fn livereload_handler(
    State(state): State<Arc<ServerState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.reload_tx.subscribe();
    // Lagged receivers skip missed messages.
    let stream = BroadcastStream::new(rx).filter_map(|msg| msg.ok().map(|m| Ok(to_event(m))));

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(30))
            .text("ping"),
    )
}

async fn script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        LIVERELOAD_SCRIPT,
    )
}

/// Client script; pages opt in with `<script src="/__livereload.js"></script>`.
pub const LIVERELOAD_SCRIPT: &str = r#"(function() {
    const source = new EventSource('/__livereload');
    source.onmessage = function(event) {
        if (event.data === 'reload') {
            window.location.reload();
        }
    };
    source.addEventListener('build-error', function(event) {
        console.error('[folio] rebuild failed: ' + event.data);
    });
    source.onerror = function() {
        console.log('[livereload] Connection lost, retrying...');
    };
})();
"#;
