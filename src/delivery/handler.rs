//! The per-request download handler.

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{ACCEPT_RANGES, CONTENT_LENGTH, CONTENT_RANGE, HeaderMap, HeaderValue, RANGE};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::TryStreamExt;
use tokio_util::io::ReaderStream;
use tracing::instrument;

use super::error::DeliveryError;
use super::events::{DeliveryEvents, TracingEvents};
use super::headers::{apply_cors, apply_security, download_headers};
use super::range::{ByteRange, RangeOutcome, resolve_range};
use crate::artifact::{ArtifactDescriptor, ArtifactReader, ArtifactStore};

/// Serves one artifact from one store.
///
/// Cloning is cheap; every field is shared. The handler keeps no
/// per-request state.
#[derive(Debug, Clone)]
pub struct DownloadHandler {
    artifact: Arc<ArtifactDescriptor>,
    store: Arc<dyn ArtifactStore>,
    events: Arc<dyn DeliveryEvents>,
}

impl DownloadHandler {
    /// Creates a handler that reports through `tracing`.
    pub fn new(artifact: Arc<ArtifactDescriptor>, store: Arc<dyn ArtifactStore>) -> Self {
        Self {
            artifact,
            store,
            events: Arc::new(TracingEvents),
        }
    }

    /// Replaces the diagnostics sink.
    #[must_use]
    pub fn with_events(mut self, events: Arc<dyn DeliveryEvents>) -> Self {
        self.events = events;
        self
    }

    /// The artifact this handler serves.
    #[must_use]
    pub fn artifact(&self) -> &ArtifactDescriptor {
        &self.artifact
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn ArtifactStore> {
        &self.store
    }

    /// Produces exactly one response for the request. Never fails.
    #[instrument(level = "debug", skip(self, headers), fields(artifact = %self.artifact.name()))]
    pub async fn handle(&self, method: &Method, headers: &HeaderMap) -> Response {
        let result = if method == Method::OPTIONS {
            Ok(preflight_response())
        } else if method == Method::GET {
            self.deliver(headers).await
        } else {
            Err(DeliveryError::method_not_allowed(method.as_str()))
        };

        result.unwrap_or_else(|err| {
            self.events.request_failed(&err);
            err.into_response()
        })
    }

    async fn deliver(&self, request_headers: &HeaderMap) -> Result<Response, DeliveryError> {
        let size = self.store.size().await.map_err(DeliveryError::not_found)?;

        let mut headers = download_headers(&self.artifact)
            .map_err(|e| DeliveryError::internal(format!("invalid header value: {e}")))?;

        let range_header = request_headers.get(RANGE).and_then(|v| v.to_str().ok());
        let (status, range) = match resolve_range(range_header, size) {
            RangeOutcome::Full => (StatusCode::OK, None),
            RangeOutcome::Partial(range) => (StatusCode::PARTIAL_CONTENT, Some(range)),
            RangeOutcome::NotSatisfiable => {
                return Err(DeliveryError::range_not_satisfiable(
                    range_header.unwrap_or_default(),
                    size,
                ));
            }
        };

        headers.insert(CONTENT_LENGTH, HeaderValue::from(range.map_or(size, ByteRange::len)));
        if let Some(range) = range {
            let content_range = HeaderValue::try_from(range.content_range(size))
                .map_err(|e| DeliveryError::internal(format!("invalid Content-Range: {e}")))?;
            headers.insert(CONTENT_RANGE, content_range);
            headers.insert(ACCEPT_RANGES, HeaderValue::from_static("bytes"));
        }

        let reader = self
            .store
            .open(range)
            .await
            .map_err(DeliveryError::stream_failure)?;

        self.events
            .download_started(self.artifact.name(), size, range);

        let mut response = Response::new(self.stream_body(reader));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(response)
    }

    /// Wraps the reader in a body. Errors after this point can only abort
    /// the transfer; they are reported to the events sink.
    fn stream_body(&self, reader: ArtifactReader) -> Body {
        let events = Arc::clone(&self.events);
        let artifact = self.artifact.name().to_string();
        let stream = ReaderStream::new(reader)
            .inspect_err(move |err| events.stream_failed(&artifact, err));
        Body::from_stream(stream)
    }
}

fn preflight_response() -> Response {
    let mut headers = HeaderMap::new();
    apply_cors(&mut headers);
    apply_security(&mut headers);
    (StatusCode::OK, headers).into_response()
}
