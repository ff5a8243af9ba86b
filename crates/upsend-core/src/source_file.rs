//! The file being uploaded: path, byte size, MIME type, and (for files that
//! arrived through an upload form) the client-provided original name.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// A candidate file for one upload session.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    storage_name: String,
    size: u64,
    mime_type: String,
    client_original_name: Option<String>,
}

impl SourceFile {
    /// Opens a file on disk, reading its size from metadata and guessing its
    /// MIME type from the extension (`application/octet-stream` fallback).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let meta = std::fs::metadata(path)
            .with_context(|| format!("failed to stat {}", path.display()))?;
        if !meta.is_file() {
            anyhow::bail!("{} is not a regular file", path.display());
        }
        let storage_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("{} has no file name", path.display()))?;
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(Self {
            path: path.to_path_buf(),
            storage_name,
            size: meta.len(),
            mime_type,
            client_original_name: None,
        })
    }

    /// Opens an uploaded file whose on-disk name differs from the name the
    /// client submitted; the client name wins when deriving the target name.
    pub fn uploaded(path: impl AsRef<Path>, client_original_name: impl Into<String>) -> Result<Self> {
        let mut file = Self::open(path)?;
        file.client_original_name = Some(client_original_name.into());
        Ok(file)
    }

    /// Builds a file from already-known metadata, without touching the disk.
    /// Intended for callers (and tests) that have the size and type in hand.
    pub fn from_parts(path: impl Into<PathBuf>, size: u64, mime_type: impl Into<String>) -> Self {
        let path = path.into();
        let storage_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            storage_name,
            size,
            mime_type: mime_type.into(),
            client_original_name: None,
        }
    }

    /// Overrides the guessed MIME type (for callers that know better, e.g.
    /// a multipart form that carried an explicit type).
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    pub fn with_client_original_name(mut self, name: impl Into<String>) -> Self {
        self.client_original_name = Some(name.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The on-disk (storage) name.
    pub fn filename(&self) -> &str {
        &self.storage_name
    }

    /// The name to upload under: the client-provided original name if there
    /// is one, else the storage name.
    pub fn upload_name(&self) -> &str {
        self.client_original_name
            .as_deref()
            .unwrap_or(&self.storage_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn open_reads_size_and_guesses_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.txt");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"Hello world\n")
            .unwrap();

        let file = SourceFile::open(&path).unwrap();
        assert_eq!(file.size(), 12);
        assert_eq!(file.mime_type(), "text/plain");
        assert_eq!(file.filename(), "test.txt");
        assert_eq!(file.upload_name(), "test.txt");
    }

    #[test]
    fn unknown_extension_falls_back_to_octet_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.weird-ext");
        std::fs::write(&path, b"x").unwrap();

        let file = SourceFile::open(&path).unwrap();
        assert_eq!(file.mime_type(), "application/octet-stream");
    }

    #[test]
    fn client_original_name_wins_for_upload_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phpA1B2.tmp");
        std::fs::write(&path, b"payload").unwrap();

        let file = SourceFile::uploaded(&path, "original_test.txt").unwrap();
        assert_eq!(file.filename(), "phpA1B2.tmp");
        assert_eq!(file.upload_name(), "original_test.txt");
    }

    #[test]
    fn open_missing_file_fails() {
        assert!(SourceFile::open("/nonexistent/definitely-missing.bin").is_err());
    }

    #[test]
    fn from_parts_does_not_touch_the_disk() {
        let file = SourceFile::from_parts("/never/created/video.mp4", 1024, "video/mp4");
        assert_eq!(file.size(), 1024);
        assert_eq!(file.mime_type(), "video/mp4");
        assert_eq!(file.upload_name(), "video.mp4");
    }
}
