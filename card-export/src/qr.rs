//! QR symbols and the container they are drawn into.

use qrcode::render::svg;
use qrcode::QrCode;

use crate::error::{ExportError, ExportResult};

/// Default QR symbol edge length in pixels.
pub const DEFAULT_QR_SIZE: u32 = 128;

/// An encoded QR symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrSymbol {
    /// Encoded text.
    pub payload: String,
    /// Requested edge length in pixels.
    pub size_px: u32,
    /// Symbol drawn as an SVG document.
    pub svg: String,
}

/// Encodes text into a QR symbol.
pub trait QrEncoder: Send + Sync {
    /// Encode `text` at roughly `size_px` pixels square.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Qr`] if the text does not fit in a symbol.
    fn encode(&self, text: &str, size_px: u32) -> ExportResult<QrSymbol>;
}

/// Black-on-white SVG encoder backed by the `qrcode` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrCodeEncoder;

impl QrEncoder for QrCodeEncoder {
    fn encode(&self, text: &str, size_px: u32) -> ExportResult<QrSymbol> {
        let code = QrCode::new(text.as_bytes()).map_err(|e| ExportError::Qr(e.to_string()))?;
        let image = code
            .render::<svg::Color>()
            .min_dimensions(size_px, size_px)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build();
        tracing::debug!("Encoded {} chars into a {}-module QR symbol", text.len(), code.width());
        Ok(QrSymbol {
            payload: text.to_string(),
            size_px,
            svg: image,
        })
    }
}

/// Holds the QR symbol currently on display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QrContainer {
    symbol: Option<QrSymbol>,
}

impl QrContainer {
    /// Create an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any previous symbol.
    pub fn replace(&mut self, symbol: QrSymbol) -> Option<QrSymbol> {
        self.symbol.replace(symbol)
    }

    /// Symbol on display.
    #[must_use]
    pub fn symbol(&self) -> Option<&QrSymbol> {
        self.symbol.as_ref()
    }

    /// Whether nothing has been drawn yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbol.is_none()
    }
}
