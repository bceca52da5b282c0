//! Range-aware delivery of the downloadable artifact.
//!
//! [`DownloadHandler`] turns one request (method + headers) into one
//! response:
//!
//! - `OPTIONS` answers the CORS preflight with an empty `200`
//! - `GET` streams the artifact, whole (`200`) or a single byte range (`206`)
//! - other methods get `405`
//!
//! Failures are answered with an [`ErrorBody`] JSON document and reported to
//! the injected [`DeliveryEvents`] sink.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use axum::http::{HeaderMap, Method};
//! use converter_download::artifact::{ArtifactDescriptor, FsArtifactStore};
//! use converter_download::delivery::DownloadHandler;
//!
//! # async fn example() {
//! let artifact = ArtifactDescriptor::default_in(std::path::Path::new("."));
//! let store = FsArtifactStore::new(artifact.location());
//! let handler = DownloadHandler::new(Arc::new(artifact), Arc::new(store));
//! let response = handler.handle(&Method::GET, &HeaderMap::new()).await;
//! println!("status: {}", response.status());
//! # }
//! ```

mod error;
mod events;
mod handler;
pub mod headers;
mod range;

pub use error::{DeliveryError, ErrorBody};
pub use events::{DeliveryEvents, RecordedEvent, RecordingEvents, TracingEvents};
pub use handler::DownloadHandler;
pub use range::{ByteRange, RangeOutcome, resolve_range};
