//! Diagnostic events raised by the delivery handler.
//!
//! The handler never logs directly; it reports to a [`DeliveryEvents`] sink.
//! [`TracingEvents`] forwards to `tracing` and is what the server uses.
//! [`RecordingEvents`] keeps events in memory so tests can assert on them.

use std::fmt;
use std::io;
use std::sync::Mutex;

use axum::http::StatusCode;
use tracing::{debug, error, info};

use super::ByteRange;
use super::error::DeliveryError;

/// Receiver for per-request diagnostics.
pub trait DeliveryEvents: Send + Sync + fmt::Debug {
    /// Headers are about to be sent and the body stream is open.
    fn download_started(&self, artifact: &str, size: u64, range: Option<ByteRange>);

    /// The body stream failed after headers were sent.
    fn stream_failed(&self, artifact: &str, error: &io::Error);

    /// The request ended with an error response.
    fn request_failed(&self, error: &DeliveryError);
}

/// Sink that emits structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEvents;

impl DeliveryEvents for TracingEvents {
    fn download_started(&self, artifact: &str, size: u64, range: Option<ByteRange>) {
        match range {
            Some(range) => info!(
                artifact,
                size,
                range = %range,
                bytes = range.len(),
                "partial download initiated"
            ),
            None => info!(artifact, size, "download initiated"),
        }
    }

    fn stream_failed(&self, artifact: &str, error: &io::Error) {
        error!(artifact, error = %error, "file stream error");
    }

    fn request_failed(&self, error: &DeliveryError) {
        match error {
            DeliveryError::MethodNotAllowed { .. } | DeliveryError::RangeNotSatisfiable { .. } => {
                debug!(status = error.status().as_u16(), error = %error, "request rejected");
            }
            _ => error!(status = error.status().as_u16(), error = %error, "download failed"),
        }
    }
}

/// One event captured by [`RecordingEvents`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedEvent {
    /// See [`DeliveryEvents::download_started`].
    Started {
        /// Artifact display name.
        artifact: String,
        /// Real artifact size.
        size: u64,
        /// Range being served, if any.
        range: Option<ByteRange>,
    },
    /// See [`DeliveryEvents::stream_failed`].
    StreamFailed {
        /// Artifact display name.
        artifact: String,
        /// Kind of the IO error.
        kind: io::ErrorKind,
    },
    /// See [`DeliveryEvents::request_failed`].
    Failed {
        /// Status sent to the client.
        status: StatusCode,
        /// Operator-facing error text.
        detail: String,
    },
}

/// Sink that stores events in memory.
#[derive(Debug, Default)]
pub struct RecordingEvents {
    events: Mutex<Vec<RecordedEvent>>,
}

impl RecordingEvents {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn push(&self, event: RecordedEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl DeliveryEvents for RecordingEvents {
    fn download_started(&self, artifact: &str, size: u64, range: Option<ByteRange>) {
        self.push(RecordedEvent::Started {
            artifact: artifact.to_string(),
            size,
            range,
        });
    }

    fn stream_failed(&self, artifact: &str, error: &io::Error) {
        self.push(RecordedEvent::StreamFailed {
            artifact: artifact.to_string(),
            kind: error.kind(),
        });
    }

    fn request_failed(&self, error: &DeliveryError) {
        self.push(RecordedEvent::Failed {
            status: error.status(),
            detail: error.to_string(),
        });
    }
}
