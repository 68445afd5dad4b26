//! Download and QR export flows.
//!
//! Each flow runs its collaborators in order and stops at the first
//! failure. Failures never propagate: they are logged, reported on the
//! editor's [`StatusChannel`] and returned as [`ExportStatus::Failed`].

use std::fmt;

use card_core::{CardSurface, StatusChannel};
use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::qr::{QrCodeEncoder, QrContainer, QrEncoder, DEFAULT_QR_SIZE};
use crate::raster::{Rasterizer, SvgRasterizer};
use crate::save::{DownloadLink, FileSaver, LinkSaver, SavedFile};
use crate::upload::{MockUploader, Uploader};

/// Step of an export flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportStage {
    /// Rendering the card to a bitmap.
    Rasterize,
    /// Saving the bitmap.
    Save,
    /// Uploading the bitmap.
    Upload,
    /// Encoding the QR symbol.
    Encode,
}

impl fmt::Display for ExportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rasterize => "rasterize",
            Self::Save => "save",
            Self::Upload => "upload",
            Self::Encode => "encode",
        })
    }
}

/// How an export flow ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExportStatus {
    /// Every step succeeded.
    Completed {
        /// What was produced: a file path, a file name or a URL.
        detail: String,
        /// Anchor to click when the card was handed over as a link.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        link: Option<DownloadLink>,
    },
    /// A step failed; later steps did not run.
    Failed {
        /// The failing step.
        stage: ExportStage,
        /// Error text.
        reason: String,
    },
}

impl ExportStatus {
    /// Whether the flow completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Download link produced by the flow, if any.
    #[must_use]
    pub fn download_link(&self) -> Option<&DownloadLink> {
        match self {
            Self::Completed { link, .. } => link.as_ref(),
            Self::Failed { .. } => None,
        }
    }
}

/// Runs the download and QR flows against pluggable collaborators.
pub struct ExportPipeline {
    rasterizer: Box<dyn Rasterizer>,
    saver: Box<dyn FileSaver>,
    uploader: Box<dyn Uploader>,
    encoder: Box<dyn QrEncoder>,
    qr_size: u32,
}

impl Default for ExportPipeline {
    fn default() -> Self {
        Self {
            rasterizer: Box::new(SvgRasterizer::default()),
            saver: Box::new(LinkSaver),
            uploader: Box::new(MockUploader::default()),
            encoder: Box::new(QrCodeEncoder),
            qr_size: DEFAULT_QR_SIZE,
        }
    }
}

impl fmt::Debug for ExportPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportPipeline")
            .field("qr_size", &self.qr_size)
            .finish_non_exhaustive()
    }
}

impl ExportPipeline {
    /// Pipeline with the SVG rasterizer, download links, the mock uploader
    /// and the SVG QR encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different rasterizer.
    #[must_use]
    pub fn with_rasterizer(mut self, rasterizer: impl Rasterizer + 'static) -> Self {
        self.rasterizer = Box::new(rasterizer);
        self
    }

    /// Use a different file saver.
    #[must_use]
    pub fn with_saver(mut self, saver: impl FileSaver + 'static) -> Self {
        self.saver = Box::new(saver);
        self
    }

    /// Use a different uploader.
    #[must_use]
    pub fn with_uploader(mut self, uploader: impl Uploader + 'static) -> Self {
        self.uploader = Box::new(uploader);
        self
    }

    /// Use a different QR encoder.
    #[must_use]
    pub fn with_encoder(mut self, encoder: impl QrEncoder + 'static) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    /// Set the QR symbol size in pixels.
    #[must_use]
    pub fn with_qr_size(mut self, size_px: u32) -> Self {
        self.qr_size = size_px;
        self
    }

    /// Rasterize the card and save it as `business_card.png`.
    pub async fn download(
        &self,
        surface: &CardSurface,
        status: &mut StatusChannel,
    ) -> ExportStatus {
        let bitmap = match self.rasterizer.rasterize(surface).await {
            Ok(bitmap) => bitmap,
            Err(e) => return fail(status, ExportStage::Rasterize, &e),
        };
        let saved = match self.saver.save(&bitmap).await {
            Ok(saved) => saved,
            Err(e) => return fail(status, ExportStage::Save, &e),
        };
        let (detail, link) = match saved {
            SavedFile::Path(path) => (path.display().to_string(), None),
            SavedFile::Link(link) => (link.file_name.clone(), Some(link)),
        };
        tracing::info!("Card downloaded as {detail}");
        status.info(format!("Card saved to {detail}"));
        ExportStatus::Completed { detail, link }
    }

    /// Rasterize the card, upload it and draw a QR code of the returned URL
    /// into `container`. The container is left untouched on failure.
    pub async fn export_qr(
        &self,
        surface: &CardSurface,
        container: &mut QrContainer,
        status: &mut StatusChannel,
    ) -> ExportStatus {
        let bitmap = match self.rasterizer.rasterize(surface).await {
            Ok(bitmap) => bitmap,
            Err(e) => return fail(status, ExportStage::Rasterize, &e),
        };
        let url = match self.uploader.upload(&bitmap.to_data_uri()).await {
            Ok(url) => url,
            Err(e) => return fail(status, ExportStage::Upload, &e),
        };
        let symbol = match self.encoder.encode(url.as_str(), self.qr_size) {
            Ok(symbol) => symbol,
            Err(e) => return fail(status, ExportStage::Encode, &e),
        };
        container.replace(symbol);
        tracing::info!("QR code generated for {url}");
        status.info(format!("QR code ready for {url}"));
        ExportStatus::Completed {
            detail: url.to_string(),
            link: None,
        }
    }
}

fn fail(status: &mut StatusChannel, stage: ExportStage, error: &ExportError) -> ExportStatus {
    status.error(format!("Export failed during {stage}: {error}"));
    ExportStatus::Failed {
        stage,
        reason: error.to_string(),
    }
}
