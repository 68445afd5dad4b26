//! # Cardsmith Export
//!
//! Turns an edited card into something that leaves the editor: a PNG
//! download or a QR code pointing at an uploaded copy.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ CardSurface  │──▶│ SVG → PNG    │──▶│ FileSaver    │  download
//! └──────────────┘   │ (resvg)      │   └──────────────┘
//!                    └──────┬───────┘
//!                           ▼
//!                    ┌──────────────┐   ┌──────────────┐
//!                    │ Uploader     │──▶│ QrEncoder    │  QR export
//!                    └──────────────┘   └──────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod pipeline;
pub mod qr;
pub mod raster;
pub mod render;
pub mod save;
pub mod upload;

pub use error::{ExportError, ExportResult};
pub use pipeline::{ExportPipeline, ExportStage, ExportStatus};
pub use qr::{QrCodeEncoder, QrContainer, QrEncoder, QrSymbol, DEFAULT_QR_SIZE};
pub use raster::{Bitmap, Rasterizer, SvgRasterizer};
pub use render::{CardExporter, ExportConfig};
pub use save::{DirectorySaver, DownloadLink, FileSaver, LinkSaver, SavedFile, DOWNLOAD_FILE_NAME};
pub use upload::{HttpUploader, MockUploader, Uploader, MOCK_UPLOAD_DELAY, MOCK_UPLOAD_URL};
