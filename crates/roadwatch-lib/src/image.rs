//! Image attachment encoding.
//!
//! Turns a selected local file into a `data:` URL that can be previewed
//! and embedded in the submitted record. File access goes through the
//! [`FileReader`] trait so tests and other hosts can supply their own.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::{ReportError, Result};
use crate::model::EncodedImage;

/// Reads a selected file's bytes.
#[async_trait]
pub trait FileReader: Send + Sync {
    /// Size of the file in bytes, without reading its contents.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be inspected.
    async fn len(&self, path: &Path) -> std::io::Result<u64>;

    /// Read the whole file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read.
    async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;
}

/// Reads files from the local filesystem with `tokio::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioFileReader;

#[async_trait]
impl FileReader for TokioFileReader {
    async fn len(&self, path: &Path) -> std::io::Result<u64> {
        Ok(tokio::fs::metadata(path).await?.len())
    }

    async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }
}

/// Encodes selected images into inline data URLs.
#[derive(Debug, Clone)]
pub struct ImageEncoder<R = TokioFileReader> {
    reader: R,
    max_bytes: Option<u64>,
}

impl ImageEncoder<TokioFileReader> {
    #[must_use]
    pub const fn new() -> Self {
        Self::with_reader(TokioFileReader)
    }
}

impl Default for ImageEncoder<TokioFileReader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: FileReader> ImageEncoder<R> {
    #[must_use]
    pub const fn with_reader(reader: R) -> Self {
        Self {
            reader,
            max_bytes: None,
        }
    }

    /// Reject files larger than `max_bytes`. `None` disables the cap.
    #[must_use]
    pub const fn max_bytes(mut self, max_bytes: Option<u64>) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Encode the selected file, if any.
    ///
    /// No selection is not an error: it returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, or `ImageTooLarge` if it
    /// exceeds the configured cap.
    pub async fn encode(&self, selection: Option<&Path>) -> Result<Option<EncodedImage>> {
        let Some(path) = selection else {
            tracing::trace!("No image selected");
            return Ok(None);
        };

        // The file can grow between the two checks.
        self.check_size(path, self.reader.len(path).await?)?;
        let bytes = self.reader.read(path).await?;
        let size = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        self.check_size(path, size)?;

        let mime = mime_guess::from_path(path).first_or_octet_stream();
        if mime.type_() != mime_guess::mime::IMAGE {
            tracing::warn!(path = %path.display(), %mime, "Selected file is not an image");
        }

        let mime_type = mime.essence_str().to_string();
        tracing::debug!(path = %path.display(), size, %mime_type, "Encoded image attachment");

        Ok(Some(EncodedImage {
            data_url: data_url(&mime_type, &bytes),
            mime_type,
            byte_len: size,
        }))
    }

    fn check_size(&self, path: &Path, size: u64) -> Result<()> {
        match self.max_bytes {
            Some(limit) if size > limit => Err(ReportError::ImageTooLarge {
                path: PathBuf::from(path),
                size,
                limit,
            }),
            _ => Ok(()),
        }
    }
}

/// Build a base64 `data:` URL.
#[must_use]
pub fn data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[derive(Default)]
    struct FakeReader {
        files: HashMap<PathBuf, Vec<u8>>,
        /// Overrides the size `len` reports, as if the file changed after it was inspected.
        stale_len: Option<u64>,
        bytes_served: AtomicUsize,
    }

    impl FakeReader {
        fn with_file(path: &str, bytes: Vec<u8>) -> Self {
            Self {
                files: HashMap::from([(PathBuf::from(path), bytes)]),
                ..Self::default()
            }
        }

        fn file(&self, path: &Path) -> std::io::Result<&Vec<u8>> {
            self.files
                .get(path)
                .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))
        }
    }

    #[async_trait]
    impl FileReader for FakeReader {
        async fn len(&self, path: &Path) -> std::io::Result<u64> {
            let actual = u64::try_from(self.file(path)?.len()).unwrap();
            Ok(self.stale_len.unwrap_or(actual))
        }

        async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
            let bytes = self.file(path)?.clone();
            self.bytes_served.fetch_add(bytes.len(), Ordering::SeqCst);
            Ok(bytes)
        }
    }

    #[tokio::test]
    async fn test_no_selection_is_a_no_op() {
        let encoder = ImageEncoder::new();
        assert_eq!(encoder.encode(None).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_encodes_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pothole.png");
        std::fs::write(&path, PNG_MAGIC).unwrap();

        let image = ImageEncoder::new()
            .encode(Some(&path))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.byte_len, 8);
        assert_eq!(image.data_url, "data:image/png;base64,iVBORw0KGgo=");
    }

    #[tokio::test]
    async fn test_unknown_extension_falls_back_to_octet_stream() {
        let reader = FakeReader::with_file("evidence.bin", vec![1, 2, 3]);
        let image = ImageEncoder::with_reader(reader)
            .encode(Some(Path::new("evidence.bin")))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(image.mime_type, "application/octet-stream");
        assert!(image.data_url.starts_with("data:application/octet-stream;base64,"));
    }

    #[tokio::test]
    async fn test_size_cap_rejects_large_files_before_reading() {
        let encoder = ImageEncoder::with_reader(FakeReader::with_file("big.jpg", vec![0; 2048]))
            .max_bytes(Some(1024));
        let err = encoder.encode(Some(Path::new("big.jpg"))).await.unwrap_err();
        match err {
            ReportError::ImageTooLarge { size, limit, .. } => {
                assert_eq!(size, 2048);
                assert_eq!(limit, 1024);
            }
            other => panic!("expected ImageTooLarge, got {other:?}"),
        }
        assert_eq!(encoder.reader.bytes_served.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_size_cap_applies_to_bytes_actually_read() {
        let reader = FakeReader {
            stale_len: Some(10),
            ..FakeReader::with_file("grown.jpg", vec![0; 2048])
        };
        let err = ImageEncoder::with_reader(reader)
            .max_bytes(Some(1024))
            .encode(Some(Path::new("grown.jpg")))
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::ImageTooLarge { size: 2048, .. }));
    }

    #[tokio::test]
    async fn test_file_at_the_cap_is_accepted() {
        let encoder = ImageEncoder::with_reader(FakeReader::with_file("edge.png", vec![7; 1024]))
            .max_bytes(Some(1024));
        let image = encoder
            .encode(Some(Path::new("edge.png")))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(image.byte_len, 1024);
        assert_eq!(encoder.reader.bytes_served.load(Ordering::SeqCst), 1024);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let err = ImageEncoder::with_reader(FakeReader::default())
            .encode(Some(Path::new("gone.png")))
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::Io(_)));
    }
}
