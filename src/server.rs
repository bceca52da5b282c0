//! HTTP server exposing the download handler.
//!
//! Routes:
//! - `/api/download` and `/download` → [`DownloadHandler`] (any method; the
//!   handler does its own dispatch)
//! - anything else → `404 Not found` as plain text

use std::future::Future;
use std::io;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::Response;
use axum::routing::any;
use tokio::net::TcpListener;
use tracing::{info, instrument, warn};

use crate::delivery::DownloadHandler;

/// Primary download route.
pub const DOWNLOAD_ROUTE: &str = "/api/download";

/// Short alias kept for older links.
pub const DOWNLOAD_ALIAS_ROUTE: &str = "/download";

/// Builds the application router.
pub fn router(handler: DownloadHandler) -> Router {
    Router::new()
        .route(DOWNLOAD_ROUTE, any(download))
        .route(DOWNLOAD_ALIAS_ROUTE, any(download))
        .fallback(not_found)
        .with_state(handler)
}

async fn download(
    State(handler): State<DownloadHandler>,
    method: Method,
    headers: HeaderMap,
) -> Response {
    handler.handle(&method, &headers).await
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Logs a warning when the advertised size and the real size disagree.
///
/// Only the real size is used on the wire; the declared size is decorative.
/// Returns the real size when the artifact is present.
pub async fn check_artifact(handler: &DownloadHandler) -> Option<u64> {
    let artifact = handler.artifact();
    match handler.store().size().await {
        Ok(size) => {
            if size != artifact.declared_size() {
                warn!(
                    artifact = %artifact.name(),
                    declared = artifact.declared_size(),
                    actual = size,
                    "declared artifact size differs from file size"
                );
            }
            Some(size)
        }
        Err(err) => {
            warn!(error = %err, "artifact not available yet; downloads will return 404");
            None
        }
    }
}

/// Serves until `shutdown` resolves.
#[instrument(skip_all, fields(addr = ?listener.local_addr().ok()))]
pub async fn serve<F>(listener: TcpListener, handler: DownloadHandler, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    check_artifact(&handler).await;
    info!("Download API server running");
    axum::serve(listener, router(handler))
        .with_graceful_shutdown(shutdown)
        .await
}
