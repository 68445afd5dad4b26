//! The rasterization collaborator.

use async_trait::async_trait;
use card_core::{CardSurface, DataUri};

use crate::error::{ExportError, ExportResult};
use crate::render::CardExporter;

/// A rendered PNG image of the card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// PNG-encoded pixels.
    pub png: Vec<u8>,
}

impl Bitmap {
    /// `data:image/png;base64,...` form for upload and download links.
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        DataUri::new("image/png", self.png.clone()).to_string()
    }
}

/// Turns a card into a bitmap.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    /// Render `surface`.
    ///
    /// # Errors
    ///
    /// Returns an error if the card holds content that cannot be rendered.
    async fn rasterize(&self, surface: &CardSurface) -> ExportResult<Bitmap>;
}

/// Rasterizer backed by the SVG renderer.
#[derive(Debug, Clone, Default)]
pub struct SvgRasterizer {
    exporter: CardExporter,
}

impl SvgRasterizer {
    /// Create a rasterizer using `exporter` for rendering.
    #[must_use]
    pub fn new(exporter: CardExporter) -> Self {
        Self { exporter }
    }
}

#[async_trait]
impl Rasterizer for SvgRasterizer {
    async fn rasterize(&self, surface: &CardSurface) -> ExportResult<Bitmap> {
        let exporter = self.exporter.clone();
        let surface = surface.clone();
        let (width, height, png) =
            tokio::task::spawn_blocking(move || exporter.render_png(&surface))
                .await
                .map_err(|e| ExportError::Raster(format!("render task failed: {e}")))??;
        tracing::debug!("Rasterized card to {width}x{height} ({} bytes)", png.len());
        Ok(Bitmap { width, height, png })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_is_base64_png() {
        let bitmap = Bitmap {
            width: 1,
            height: 1,
            png: vec![137, 80, 78, 71],
        };
        assert_eq!(bitmap.to_data_uri(), "data:image/png;base64,iVBORw==");
    }

    #[tokio::test]
    async fn rasterizes_template() {
        let bitmap = SvgRasterizer::default()
            .rasterize(&CardSurface::template())
            .await
            .expect("bitmap");
        assert_eq!((bitmap.width, bitmap.height), (350, 200));
        assert!(DataUri::parse_image(&bitmap.to_data_uri()).is_ok());
    }
}
