//! Card rendering to SVG and PNG.
//!
//! Renders a [`CardSurface`] to an SVG intermediate representation, then
//! rasterizes it with resvg/tiny-skia.

use std::fmt::Write;
use std::sync::{Arc, OnceLock};

use card_core::element::{CardElement, DividerOrientation, ElementKind};
use card_core::style::ElementStyle;
use card_core::theme::ResolvedColors;
use card_core::CardSurface;

use crate::error::{ExportError, ExportResult};

/// Default font size when an element sets none.
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Largest raster side in pixels; bigger cards are rejected.
pub const MAX_RASTER_SIDE: u32 = 8192;

/// Families tried, in order, for the generic `sans-serif` name.
const SANS_SERIF_CANDIDATES: [&str; 5] = [
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Arial",
    "Helvetica",
];

/// Configuration for card rendering.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Scale factor (e.g. 2.0 for retina).
    pub scale: f32,
    /// Font family for elements without one.
    pub font_family: String,
    /// Fill used for an empty profile picture.
    pub placeholder_color: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            font_family: "sans-serif".to_string(),
            placeholder_color: "#cccccc".to_string(),
        }
    }
}

/// Renders cards to SVG and PNG.
#[derive(Debug, Clone, Default)]
pub struct CardExporter {
    config: ExportConfig,
}

impl CardExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Render the card to an SVG string.
    ///
    /// Non-numeric card dimensions fall back to the default card size.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn render_svg(&self, surface: &CardSurface) -> String {
        let (width, height) = surface.size_px();
        let (width, height) = (width.max(1.0), height.max(1.0));
        let scale = self.config.scale.max(0.01);
        let out_w = (width * scale).ceil() as u32;
        let out_h = (height * scale).ceil() as u32;
        let colors = surface.theme.resolved();

        let mut svg = String::with_capacity(4096);
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{out_w}\" height=\"{out_h}\" viewBox=\"0 0 {width} {height}\">",
        );
        render_background(&mut svg, &colors);

        for element in surface.elements() {
            self.render_element(&mut svg, element, &colors);
        }

        svg.push_str("</svg>");
        svg
    }

    /// Render the card to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the SVG cannot be parsed or encoded.
    pub fn render_png(&self, surface: &CardSurface) -> ExportResult<(u32, u32, Vec<u8>)> {
        let pixmap = self.render_pixmap(surface)?;
        let png = pixmap
            .encode_png()
            .map_err(|e| ExportError::Raster(format!("PNG encoding failed: {e}")))?;
        Ok((pixmap.width(), pixmap.height(), png))
    }

    fn render_pixmap(&self, surface: &CardSurface) -> ExportResult<tiny_skia::Pixmap> {
        rasterize_svg(&self.render_svg(surface))
    }

    fn render_element(&self, svg: &mut String, element: &CardElement, colors: &ResolvedColors) {
        let (x, y) = element.position();
        let frame = &element.frame;
        match &element.kind {
            ElementKind::Text | ElementKind::IconLabel => {
                self.render_text(svg, element, x, y, colors);
            }
            ElementKind::Divider(orientation) => {
                let (w, h) = match orientation {
                    DividerOrientation::Horizontal => (frame.width, frame.height.max(1.0)),
                    DividerOrientation::Vertical => (frame.width.max(1.0), frame.height),
                };
                let fill = escape_xml(&colors.text);
                let _ = write!(
                    svg,
                    "<rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" fill=\"{fill}\"/>",
                );
            }
            ElementKind::ProfileImage { src } => {
                let r = frame.width.min(frame.height) / 2.0;
                let cx = x + frame.width / 2.0;
                let cy = y + frame.height / 2.0;
                if src.is_empty() {
                    let fill = escape_xml(&self.config.placeholder_color);
                    let _ = write!(
                        svg,
                        "<circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\" fill=\"{fill}\"/>",
                    );
                } else {
                    let clip = format!("clip-{}", element.id);
                    let href = escape_xml(src);
                    let _ = write!(
                        svg,
                        "<clipPath id=\"{clip}\"><circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\"/></clipPath><image x=\"{x}\" y=\"{y}\" width=\"{}\" height=\"{}\" href=\"{href}\" clip-path=\"url(#{clip})\" preserveAspectRatio=\"xMidYMid slice\"/>",
                        frame.width, frame.height,
                    );
                }
            }
        }
    }

    fn render_text(
        &self,
        svg: &mut String,
        element: &CardElement,
        x: f32,
        y: f32,
        colors: &ResolvedColors,
    ) {
        let style = &element.style;
        let size = style
            .font_size
            .as_ref()
            .and_then(card_core::Dimension::px)
            .unwrap_or(DEFAULT_FONT_SIZE);
        let fill = escape_xml(style.color.as_deref().unwrap_or(&colors.text));
        let family = escape_xml(
            style
                .font_family
                .as_deref()
                .unwrap_or(&self.config.font_family),
        );

        // Icon fonts are not available to the rasterizer; mark icons with a dot.
        let mut text_x = x;
        if element.content.icon.is_some() {
            let r = size / 4.0;
            let _ = write!(
                svg,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{r}\" fill=\"{fill}\"/>",
                x + r,
                y + size / 2.0,
            );
            text_x += size;
        }

        let baseline = y + size;
        let escaped = escape_xml(&element.content.text);
        let _ = write!(
            svg,
            "<text x=\"{text_x}\" y=\"{baseline}\" font-size=\"{size}\" fill=\"{fill}\" font-family=\"{family}\"{}>{escaped}</text>",
            text_attributes(style),
        );
    }
}

fn render_background(svg: &mut String, colors: &ResolvedColors) {
    let start = escape_xml(&colors.background);
    match &colors.background_end {
        Some(end) => {
            let end = escape_xml(end);
            let _ = write!(
                svg,
                "<defs><linearGradient id=\"card-bg\" x1=\"0\" y1=\"0\" x2=\"1\" y2=\"0\"><stop offset=\"0\" stop-color=\"{start}\"/><stop offset=\"1\" stop-color=\"{end}\"/></linearGradient></defs><rect width=\"100%\" height=\"100%\" fill=\"url(#card-bg)\"/>",
            );
        }
        None => {
            let _ = write!(svg, "<rect width=\"100%\" height=\"100%\" fill=\"{start}\"/>");
        }
    }
}

fn text_attributes(style: &ElementStyle) -> String {
    let mut attrs = String::new();
    if style.bold {
        attrs.push_str(" font-weight=\"bold\"");
    }
    if style.italic {
        attrs.push_str(" font-style=\"italic\"");
    }
    if style.underline {
        attrs.push_str(" text-decoration=\"underline\"");
    }
    attrs
}

/// System fonts, loaded once per process.
///
/// The generic `sans-serif` family is pointed at the first installed
/// candidate, or at any installed face when none of them is present.
fn font_database() -> Arc<usvg::fontdb::Database> {
    static FONTS: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            let installed: Vec<String> = db
                .faces()
                .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
                .collect();
            let sans = SANS_SERIF_CANDIDATES
                .iter()
                .find(|candidate| installed.iter().any(|name| name == *candidate))
                .map(ToString::to_string)
                .or_else(|| installed.first().cloned());
            match sans {
                Some(family) => {
                    tracing::debug!("Loaded {} font faces, sans-serif is {family}", db.len());
                    db.set_sans_serif_family(family);
                }
                None => tracing::warn!("No system fonts found; card text will not be rasterized"),
            }
            Arc::new(db)
        })
        .clone()
}

/// Rasterize an SVG string to a tiny-skia Pixmap.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rasterize_svg(svg_string: &str) -> ExportResult<tiny_skia::Pixmap> {
    let opt = usvg::Options {
        fontdb: font_database(),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(svg_string, &opt)
        .map_err(|e| ExportError::Raster(format!("SVG parsing failed: {e}")))?;

    let px_w = tree.size().width().ceil() as u32;
    let px_h = tree.size().height().ceil() as u32;
    if px_w > MAX_RASTER_SIDE || px_h > MAX_RASTER_SIDE {
        return Err(ExportError::Raster(format!(
            "card is {px_w}x{px_h}px, larger than {MAX_RASTER_SIDE}px per side"
        )));
    }

    let mut pixmap = tiny_skia::Pixmap::new(px_w.max(1), px_h.max(1))
        .ok_or_else(|| ExportError::Raster("Failed to create pixmap".to_string()))?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    Ok(pixmap)
}

/// Escape special XML characters.
pub(crate) fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_core::element::ElementContent;
    use card_core::theme::ThemeClass;
    use card_core::Dimension;

    #[test]
    fn svg_has_card_dimensions() {
        let svg = CardExporter::default().render_svg(&CardSurface::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("width=\"350\""));
        assert!(svg.contains("height=\"200\""));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn scale_multiplies_output_size() {
        let exporter = CardExporter::new(ExportConfig {
            scale: 2.0,
            ..ExportConfig::default()
        });
        let svg = exporter.render_svg(&CardSurface::default());
        assert!(svg.contains("width=\"700\""));
        assert!(svg.contains("viewBox=\"0 0 350 200\""));
    }

    #[test]
    fn text_is_escaped_and_styled() {
        let mut surface = CardSurface::default();
        let mut element = CardElement::new(ElementKind::Text)
            .with_content(ElementContent::text("Smith & <Sons>"));
        element.style.bold = true;
        element.style.underline = true;
        element.style.font_size = Some(Dimension::Px(20.0));
        surface.add_element(element);

        let svg = CardExporter::default().render_svg(&surface);
        assert!(svg.contains("Smith &amp; &lt;Sons&gt;"));
        assert!(svg.contains("font-weight=\"bold\""));
        assert!(svg.contains("text-decoration=\"underline\""));
        assert!(svg.contains("font-size=\"20\""));
        assert!(!svg.contains("font-style=\"italic\""));
    }

    #[test]
    fn gradient_theme_emits_gradient() {
        let mut surface = CardSurface::default();
        surface.theme.select(Some(ThemeClass::Gradient2));
        let svg = CardExporter::default().render_svg(&surface);
        assert!(svg.contains("<linearGradient"));
        assert!(svg.contains("#a18cd1"));
    }

    #[test]
    fn drag_offset_moves_element() {
        let mut surface = CardSurface::default();
        let mut element =
            CardElement::new(ElementKind::Divider(DividerOrientation::Horizontal));
        element.frame = card_core::Frame::new(10.0, 10.0, 100.0, 2.0);
        element.offset = card_core::Offset::new(5.0, 7.0);
        surface.add_element(element);

        let svg = CardExporter::default().render_svg(&surface);
        assert!(svg.contains("<rect x=\"15\" y=\"17\" width=\"100\" height=\"2\""));
    }

    #[test]
    fn template_renders_to_png() {
        let (width, height, png) = CardExporter::default()
            .render_png(&CardSurface::template())
            .expect("png");
        assert_eq!((width, height), (350, 200));
        assert_eq!(&png[0..4], &[137, 80, 78, 71]);
    }

    #[test]
    fn text_reaches_the_raster() {
        let exporter = CardExporter::default();
        let blank = exporter
            .render_pixmap(&CardSurface::default())
            .expect("blank");

        let mut surface = CardSurface::default();
        let mut name = CardElement::new(ElementKind::Text)
            .with_content(ElementContent::text("JANE DOE"));
        name.frame = card_core::Frame::new(20.0, 40.0, 300.0, 50.0);
        name.style.font_size = Some(Dimension::Px(40.0));
        name.style.color = Some("#000000".to_string());
        surface.add_element(name);
        let with_text = exporter.render_pixmap(&surface).expect("text");

        assert_ne!(blank.data(), with_text.data());
    }

    #[test]
    fn oversized_card_is_rejected() {
        let mut surface = CardSurface::default();
        surface.width = Dimension::parse("100000");
        let result = CardExporter::default().render_png(&surface);
        assert!(matches!(result, Err(ExportError::Raster(msg)) if msg.contains("larger than")));
    }

    #[test]
    fn escape_xml_handles_all_specials() {
        assert_eq!(escape_xml("<a href=\"x\">'&'</a>"), "&lt;a href=&quot;x&quot;&gt;&apos;&amp;&apos;&lt;/a&gt;");
    }
}
