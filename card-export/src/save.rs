//! Saving exported bitmaps.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult};
use crate::raster::Bitmap;

/// File name suggested for downloaded cards.
pub const DOWNLOAD_FILE_NAME: &str = "business_card.png";

/// Anchor a browser host clicks to save the bitmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadLink {
    /// Suggested file name (`download` attribute).
    pub file_name: String,
    /// Data URI of the image (`href` attribute).
    pub href: String,
}

impl DownloadLink {
    /// Link saving `bitmap` under [`DOWNLOAD_FILE_NAME`].
    #[must_use]
    pub fn for_bitmap(bitmap: &Bitmap) -> Self {
        Self {
            file_name: DOWNLOAD_FILE_NAME.to_string(),
            href: bitmap.to_data_uri(),
        }
    }
}

/// Where a saved card ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavedFile {
    /// Written to disk.
    Path(PathBuf),
    /// Handed to the host as a download link.
    Link(DownloadLink),
}

/// Persists a rendered card.
#[async_trait]
pub trait FileSaver: Send + Sync {
    /// Save `bitmap`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bitmap cannot be written.
    async fn save(&self, bitmap: &Bitmap) -> ExportResult<SavedFile>;
}

/// Produces a [`DownloadLink`] for the host to click; nothing is written.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkSaver;

#[async_trait]
impl FileSaver for LinkSaver {
    async fn save(&self, bitmap: &Bitmap) -> ExportResult<SavedFile> {
        Ok(SavedFile::Link(DownloadLink::for_bitmap(bitmap)))
    }
}

/// Writes [`DOWNLOAD_FILE_NAME`] into a directory, replacing any previous file.
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    /// Save into `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl FileSaver for DirectorySaver {
    async fn save(&self, bitmap: &Bitmap) -> ExportResult<SavedFile> {
        let path = self.dir.join(DOWNLOAD_FILE_NAME);
        let to_error = |source: std::io::Error| ExportError::Save {
            path: path.display().to_string(),
            source,
        };
        tokio::fs::create_dir_all(&self.dir).await.map_err(to_error)?;
        tokio::fs::write(&path, &bitmap.png).await.map_err(to_error)?;
        tracing::debug!("Wrote {} bytes to {}", bitmap.png.len(), path.display());
        Ok(SavedFile::Path(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bitmap() -> Bitmap {
        Bitmap {
            width: 1,
            height: 1,
            png: vec![137, 80, 78, 71],
        }
    }

    #[tokio::test]
    async fn link_saver_uses_fixed_name() {
        let saved = LinkSaver.save(&bitmap()).await.expect("save");
        let SavedFile::Link(link) = saved else {
            panic!("expected a link");
        };
        assert_eq!(link.file_name, "business_card.png");
        assert!(link.href.starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn directory_saver_writes_png() {
        let dir = tempfile::tempdir().expect("tempdir");
        let saver = DirectorySaver::new(dir.path().join("out"));
        let saved = saver.save(&bitmap()).await.expect("save");

        let path = dir.path().join("out").join(DOWNLOAD_FILE_NAME);
        assert_eq!(saved, SavedFile::Path(path.clone()));
        assert_eq!(std::fs::read(path).expect("read"), bitmap().png);
    }
}
