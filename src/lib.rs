//! Converter Download Library
//!
//! Serves the Unit Converter Android package over HTTP with byte-range
//! support, and provides the converter's unit arithmetic.
//!
//! # Architecture
//!
//! - [`artifact`] - Artifact descriptor and byte stores (filesystem, memory)
//! - [`delivery`] - Range-aware download handler, headers, JSON errors
//! - [`server`] - axum router and serve loop
//! - [`convert`] - Length and temperature conversion

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod artifact;
pub mod convert;
pub mod delivery;
pub mod server;

// Re-export commonly used types
pub use artifact::{ArtifactDescriptor, ArtifactStore, FsArtifactStore, MemoryArtifactStore};
pub use convert::{ConvertError, Domain, convert, format_number};
pub use delivery::{DeliveryError, DeliveryEvents, DownloadHandler, ErrorBody};
pub use server::router;
