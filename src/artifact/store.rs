//! Byte stores that can report the artifact's size and stream its contents.

use std::fmt;
use std::io::{self, Cursor, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeekExt};
use tracing::{debug, instrument};

use crate::delivery::ByteRange;

/// Readable byte stream handed to the response body. Dropping it closes the
/// underlying resource.
pub type ArtifactReader = Box<dyn AsyncRead + Send + Unpin>;

/// Errors raised by an [`ArtifactStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The artifact does not exist (or is not a regular file).
    #[error("artifact not found at {location}")]
    NotFound {
        /// Store location that was queried.
        location: String,
    },

    /// The artifact exists but could not be read.
    #[error("IO error accessing {location}: {source}")]
    Io {
        /// Store location that was queried.
        location: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// Creates a not-found error.
    pub fn not_found(location: impl Into<String>) -> Self {
        Self::NotFound {
            location: location.into(),
        }
    }

    /// Creates an IO error, folding `ErrorKind::NotFound` into [`StoreError::NotFound`].
    pub fn io(location: impl Into<String>, source: io::Error) -> Self {
        let location = location.into();
        if source.kind() == io::ErrorKind::NotFound {
            return Self::NotFound { location };
        }
        Self::Io { location, source }
    }
}

/// Storage collaborator for the delivery handler.
///
/// Implementations must be cheap to share across concurrent requests; the
/// handler holds them behind an `Arc<dyn ArtifactStore>`.
#[async_trait]
pub trait ArtifactStore: Send + Sync + fmt::Debug {
    /// Human-readable location used in diagnostics.
    fn location(&self) -> String;

    /// Returns the authoritative size of the artifact in bytes.
    async fn size(&self) -> Result<u64, StoreError>;

    /// Opens a reader over the whole artifact, or only `range` when given.
    async fn open(&self, range: Option<ByteRange>) -> Result<ArtifactReader, StoreError>;

    /// Whether the artifact can currently be served.
    async fn exists(&self) -> bool {
        self.size().await.is_ok()
    }
}

/// Artifact stored as a regular file.
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    path: PathBuf,
}

impl FsArtifactStore {
    /// Creates a store over the file at `path`. The file is not touched until
    /// the first request.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ArtifactStore for FsArtifactStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    async fn size(&self) -> Result<u64, StoreError> {
        let metadata = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| StoreError::io(self.location(), e))?;
        if !metadata.is_file() {
            return Err(StoreError::not_found(self.location()));
        }
        Ok(metadata.len())
    }

    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    async fn open(&self, range: Option<ByteRange>) -> Result<ArtifactReader, StoreError> {
        let mut file = File::open(&self.path)
            .await
            .map_err(|e| StoreError::io(self.location(), e))?;

        let Some(range) = range else {
            return Ok(Box::new(file));
        };

        file.seek(SeekFrom::Start(range.start()))
            .await
            .map_err(|e| StoreError::io(self.location(), e))?;
        debug!(start = range.start(), len = range.len(), "opened bounded reader");
        Ok(Box::new(file.take(range.len())))
    }
}

/// Artifact held in memory. Useful for tests and embedded payloads.
#[derive(Debug, Clone)]
pub struct MemoryArtifactStore {
    label: String,
    bytes: Option<Arc<[u8]>>,
}

impl MemoryArtifactStore {
    /// Creates a store holding `bytes`.
    pub fn new(label: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            label: label.into(),
            bytes: Some(bytes.into()),
        }
    }

    /// Creates a store whose artifact is absent.
    pub fn missing(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            bytes: None,
        }
    }

    fn bytes(&self) -> Result<&Arc<[u8]>, StoreError> {
        self.bytes
            .as_ref()
            .ok_or_else(|| StoreError::not_found(self.location()))
    }
}

#[async_trait]
impl ArtifactStore for MemoryArtifactStore {
    fn location(&self) -> String {
        format!("memory:{}", self.label)
    }

    async fn size(&self) -> Result<u64, StoreError> {
        Ok(self.bytes()?.len() as u64)
    }

    async fn open(&self, range: Option<ByteRange>) -> Result<ArtifactReader, StoreError> {
        let bytes = self.bytes()?;
        let Some(range) = range else {
            return Ok(Box::new(Cursor::new(Arc::clone(bytes))));
        };

        let slice = usize::try_from(range.start())
            .ok()
            .zip(usize::try_from(range.end()).ok())
            .and_then(|(start, end)| bytes.get(start..=end))
            .ok_or_else(|| {
                StoreError::io(
                    self.location(),
                    io::Error::new(io::ErrorKind::InvalidInput, format!("range {range} out of bounds")),
                )
            })?;
        Ok(Box::new(Cursor::new(slice.to_vec())))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    async fn read_all(mut reader: ArtifactReader) -> Vec<u8> {
        let mut out = Vec::new();
        reader.read_to_end(&mut out).await.unwrap();
        out
    }

    fn fixture(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_fs_store_size_reports_file_length() {
        let file = fixture(b"0123456789");
        let store = FsArtifactStore::new(file.path());
        assert_eq!(store.size().await.unwrap(), 10);
        assert!(store.exists().await);
    }

    #[tokio::test]
    async fn test_fs_store_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path().join("absent.apk"));
        let err = store.size().await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }), "got {err:?}");
        assert!(!store.exists().await);
    }

    #[tokio::test]
    async fn test_fs_store_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path());
        assert!(matches!(
            store.size().await.unwrap_err(),
            StoreError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_fs_store_open_full_reads_everything() {
        let file = fixture(b"hello world");
        let store = FsArtifactStore::new(file.path());
        let bytes = read_all(store.open(None).await.unwrap()).await;
        assert_eq!(bytes, b"hello world");
    }

    #[tokio::test]
    async fn test_fs_store_open_range_reads_inclusive_slice() {
        let file = fixture(b"hello world");
        let store = FsArtifactStore::new(file.path());
        let range = ByteRange::new(6, 10).unwrap();
        let bytes = read_all(store.open(Some(range)).await.unwrap()).await;
        assert_eq!(bytes, b"world");
    }

    #[tokio::test]
    async fn test_memory_store_open_range() {
        let store = MemoryArtifactStore::new("t", b"abcdef".to_vec());
        let range = ByteRange::new(1, 3).unwrap();
        let bytes = read_all(store.open(Some(range)).await.unwrap()).await;
        assert_eq!(bytes, b"bcd");
        assert_eq!(store.location(), "memory:t");
    }

    #[tokio::test]
    async fn test_memory_store_out_of_bounds_range_is_io_error() {
        let store = MemoryArtifactStore::new("t", b"abc".to_vec());
        let range = ByteRange::new(1, 9).unwrap();
        assert!(matches!(
            store.open(Some(range)).await.err().unwrap(),
            StoreError::Io { .. }
        ));
    }

    #[tokio::test]
    async fn test_memory_store_missing() {
        let store = MemoryArtifactStore::missing("gone");
        assert!(!store.exists().await);
        assert!(matches!(
            store.open(None).await.err().unwrap(),
            StoreError::NotFound { .. }
        ));
    }

    #[test]
    fn test_store_error_io_folds_not_found_kind() {
        let err = StoreError::io("/x", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, StoreError::NotFound { .. }));

        let err = StoreError::io("/x", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(err.to_string().contains("/x"));
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
