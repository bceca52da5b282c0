//! The downloadable artifact and the byte store that holds it.
//!
//! An [`ArtifactDescriptor`] is built once at process start and shared
//! read-only with every request. The bytes themselves live behind the
//! [`ArtifactStore`] trait so the delivery handler can be exercised against
//! an in-memory store in tests and the filesystem in production.

mod store;

use std::path::{Path, PathBuf};

pub use store::{ArtifactReader, ArtifactStore, FsArtifactStore, MemoryArtifactStore, StoreError};

/// Default display filename of the packaged app.
pub const DEFAULT_ARTIFACT_NAME: &str = "UnitConverter-v2.1.0.apk";

/// MIME type for Android application packages.
pub const DEFAULT_MEDIA_TYPE: &str = "application/vnd.android.package-archive";

/// Advertised package size (15.2 MB). Advisory only.
pub const DEFAULT_DECLARED_SIZE: u64 = 15_200_000;

/// Directory, relative to the working directory, that holds the artifact.
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Static description of the artifact served by the download endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDescriptor {
    name: String,
    location: PathBuf,
    media_type: String,
    declared_size: u64,
}

impl ArtifactDescriptor {
    /// Creates a descriptor with an explicit name, location and media type.
    pub fn new(
        name: impl Into<String>,
        location: impl Into<PathBuf>,
        media_type: impl Into<String>,
        declared_size: u64,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            media_type: media_type.into(),
            declared_size,
        }
    }

    /// Descriptor for the default package under `<base_dir>/public/`.
    #[must_use]
    pub fn default_in(base_dir: &Path) -> Self {
        Self::new(
            DEFAULT_ARTIFACT_NAME,
            base_dir.join(DEFAULT_PUBLIC_DIR).join(DEFAULT_ARTIFACT_NAME),
            DEFAULT_MEDIA_TYPE,
            DEFAULT_DECLARED_SIZE,
        )
    }

    /// Filename advertised in `Content-Disposition`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the bytes live.
    #[must_use]
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// MIME type advertised to clients.
    #[must_use]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Advertised size. The store's real size wins for all protocol math.
    #[must_use]
    pub fn declared_size(&self) -> u64 {
        self.declared_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_in_places_artifact_under_public_dir() {
        let descriptor = ArtifactDescriptor::default_in(Path::new("/srv/app"));
        assert_eq!(descriptor.name(), "UnitConverter-v2.1.0.apk");
        assert_eq!(
            descriptor.location(),
            Path::new("/srv/app/public/UnitConverter-v2.1.0.apk")
        );
        assert_eq!(
            descriptor.media_type(),
            "application/vnd.android.package-archive"
        );
        assert_eq!(descriptor.declared_size(), 15_200_000);
    }

    #[test]
    fn test_new_keeps_explicit_values() {
        let descriptor = ArtifactDescriptor::new("a.bin", "/tmp/a.bin", "application/octet-stream", 3);
        assert_eq!(descriptor.name(), "a.bin");
        assert_eq!(descriptor.location(), Path::new("/tmp/a.bin"));
        assert_eq!(descriptor.media_type(), "application/octet-stream");
        assert_eq!(descriptor.declared_size(), 3);
    }
}
