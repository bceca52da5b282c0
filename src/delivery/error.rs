//! Error types for the delivery handler and their JSON wire form.

use axum::Json;
use axum::http::header::{ALLOW, CONTENT_RANGE, HeaderMap, HeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::headers::{ALLOWED_METHODS, apply_cors};
use crate::artifact::StoreError;

/// Errors that terminate a download request.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The artifact is absent or inaccessible.
    #[error("artifact unavailable: {source}")]
    NotFound {
        /// The store error that reported the absence.
        #[source]
        source: StoreError,
    },

    /// The request used a method other than GET or OPTIONS.
    #[error("method {method} not allowed")]
    MethodNotAllowed {
        /// The rejected method.
        method: String,
    },

    /// The `Range` header was well-formed but cannot be satisfied.
    #[error("range {range:?} not satisfiable for artifact of {size} bytes")]
    RangeNotSatisfiable {
        /// Raw header value.
        range: String,
        /// Real artifact size.
        size: u64,
    },

    /// The byte stream could not be opened before headers were sent.
    #[error("stream failure: {source}")]
    StreamFailure {
        /// The store error raised while opening.
        #[source]
        source: StoreError,
    },

    /// Anything else that prevented building the response.
    #[error("internal failure: {detail}")]
    InternalFailure {
        /// Operator-facing description.
        detail: String,
    },
}

impl DeliveryError {
    /// Creates a not-found error.
    pub fn not_found(source: StoreError) -> Self {
        Self::NotFound { source }
    }

    /// Creates a method-not-allowed error.
    pub fn method_not_allowed(method: impl Into<String>) -> Self {
        Self::MethodNotAllowed {
            method: method.into(),
        }
    }

    /// Creates a range-not-satisfiable error.
    pub fn range_not_satisfiable(range: impl Into<String>, size: u64) -> Self {
        Self::RangeNotSatisfiable {
            range: range.into(),
            size,
        }
    }

    /// Creates a stream failure.
    pub fn stream_failure(source: StoreError) -> Self {
        Self::StreamFailure { source }
    }

    /// Creates an internal failure.
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::InternalFailure {
            detail: detail.into(),
        }
    }

    /// HTTP status sent for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::RangeNotSatisfiable { .. } => StatusCode::RANGE_NOT_SATISFIABLE,
            Self::StreamFailure { .. } | Self::InternalFailure { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client-facing message. Details stay in the server log.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "APK file not found",
            Self::MethodNotAllowed { .. } => "Method not allowed",
            Self::RangeNotSatisfiable { .. } => "Requested range not satisfiable",
            Self::StreamFailure { .. } => "File transfer error",
            Self::InternalFailure { .. } => "Download failed",
        }
    }
}

/// JSON body sent with every error status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Always `true`.
    pub error: bool,
    /// Mirrors the HTTP status code.
    pub status: u16,
    /// Short human-readable message.
    pub message: String,
    /// ISO-8601 UTC time the error was produced.
    pub timestamp: String,
}

impl ErrorBody {
    /// Creates a body stamped with the current time.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            error: true,
            status: status.as_u16(),
            message: message.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

impl From<&DeliveryError> for ErrorBody {
    fn from(err: &DeliveryError) -> Self {
        Self::new(err.status(), err.public_message())
    }
}

impl IntoResponse for DeliveryError {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        apply_cors(&mut headers);

        match &self {
            Self::MethodNotAllowed { .. } => {
                headers.insert(ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
            }
            Self::RangeNotSatisfiable { size, .. } => {
                if let Ok(value) = HeaderValue::try_from(format!("bytes */{size}")) {
                    headers.insert(CONTENT_RANGE, value);
                }
            }
            _ => {}
        }

        (self.status(), headers, Json(ErrorBody::from(&self))).into_response()
    }
}
