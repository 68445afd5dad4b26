//! Card elements - the positioned units placed on a card.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::style::ElementStyle;

/// Icon class shown in front of free-text elements.
pub const INFO_ICON: &str = "fas fa-info-circle";

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Orientation of a divider line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DividerOrientation {
    /// A horizontal rule.
    Horizontal,
    /// A vertical rule.
    Vertical,
}

impl DividerOrientation {
    /// CSS class the divider is drawn with.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Horizontal => "line-horizontal",
            Self::Vertical => "line-vertical",
        }
    }
}

/// The kind of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ElementKind {
    /// Free text, optionally led by an icon.
    Text,
    /// A social network label: icon plus display name.
    IconLabel,
    /// A divider line without text.
    Divider(DividerOrientation),
    /// The profile picture.
    ProfileImage {
        /// Image source, usually a data URI.
        src: String,
    },
}

/// Gestures an element kind responds to.
///
/// Bindings are a property of the kind, so elements never need re-binding
/// when new ones are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Gestures {
    /// Responds to pointer drags.
    pub draggable: bool,
    /// Eligible for the element context menu.
    pub editable: bool,
    /// Double-click opens the in-place text editor.
    pub text_editable: bool,
    /// Double-click opens an image picker.
    pub image_replaceable: bool,
}

impl ElementKind {
    /// Gestures bound to this kind.
    #[must_use]
    pub fn gestures(&self) -> Gestures {
        match self {
            Self::Text | Self::IconLabel => Gestures {
                draggable: true,
                editable: true,
                text_editable: true,
                image_replaceable: false,
            },
            Self::Divider(_) => Gestures {
                draggable: true,
                editable: true,
                text_editable: false,
                image_replaceable: false,
            },
            Self::ProfileImage { .. } => Gestures {
                draggable: false,
                editable: false,
                text_editable: false,
                image_replaceable: true,
            },
        }
    }

    /// Whether this kind carries text content.
    #[must_use]
    pub fn has_text(&self) -> bool {
        matches!(self, Self::Text | Self::IconLabel)
    }
}

/// Where an element lives on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Directly on the card surface.
    #[default]
    Surface,
    /// Inside the contact info block.
    ContactInfo,
}

/// Cumulative translation applied by drag gestures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    /// Horizontal translation in pixels.
    pub x: f32,
    /// Vertical translation in pixels.
    pub y: f32,
}

impl Offset {
    /// Create an offset.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// CSS `transform` value for this offset.
    #[must_use]
    pub fn css_transform(&self) -> String {
        format!("translate({}px, {}px)", self.x, self.y)
    }
}

/// Layout box of an element before any drag offset is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// X position (pixels from the card's left edge).
    pub x: f32,
    /// Y position (pixels from the card's top edge).
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 200.0,
            height: 24.0,
        }
    }
}

impl Frame {
    /// Create a frame.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Rendered content: an optional leading icon followed by text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementContent {
    /// Icon class of the leading glyph.
    pub icon: Option<String>,
    /// Visible text.
    pub text: String,
}

impl ElementContent {
    /// Content with text only.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            icon: None,
            text: text.into(),
        }
    }

    /// Content led by an icon glyph.
    #[must_use]
    pub fn with_icon(icon: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            icon: Some(icon.into()),
            text: text.into(),
        }
    }

    /// Markup for the content, icon first.
    #[must_use]
    pub fn to_html(&self) -> String {
        match &self.icon {
            Some(icon) => format!("<i class=\"{icon}\"></i> {}", self.text),
            None => self.text.clone(),
        }
    }
}

/// A positioned element on the card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardElement {
    /// Unique identifier.
    pub id: ElementId,
    /// Element kind.
    pub kind: ElementKind,
    /// Region the element belongs to.
    pub region: Region,
    /// Icon and text.
    pub content: ElementContent,
    /// Typography.
    pub style: ElementStyle,
    /// Layout box.
    pub frame: Frame,
    /// Cumulative drag offset.
    pub offset: Offset,
    /// Whether the content is currently replaced by a text input.
    #[serde(default)]
    pub editing: bool,
}

impl CardElement {
    /// Create a new element with the given kind.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(),
            kind,
            region: Region::default(),
            content: ElementContent::default(),
            style: ElementStyle::default(),
            frame: Frame::default(),
            offset: Offset::default(),
            editing: false,
        }
    }

    /// Set the content.
    #[must_use]
    pub fn with_content(mut self, content: ElementContent) -> Self {
        self.content = content;
        self
    }

    /// Set the region.
    #[must_use]
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    /// Set the layout frame.
    #[must_use]
    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = frame;
        self
    }

    /// Set the style.
    #[must_use]
    pub fn with_style(mut self, style: ElementStyle) -> Self {
        self.style = style;
        self
    }

    /// Gestures this element responds to.
    #[must_use]
    pub fn gestures(&self) -> Gestures {
        self.kind.gestures()
    }

    /// On-card position after applying the drag offset.
    #[must_use]
    pub fn position(&self) -> (f32, f32) {
        (self.frame.x + self.offset.x, self.frame.y + self.offset.y)
    }

    /// Check if a point (in card coordinates) is within this element.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        let (left, top) = self.position();
        x >= left && x <= left + self.frame.width && y >= top && y <= top + self.frame.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_kinds_are_fully_interactive() {
        for kind in [ElementKind::Text, ElementKind::IconLabel] {
            let gestures = kind.gestures();
            assert!(gestures.draggable);
            assert!(gestures.editable);
            assert!(gestures.text_editable);
        }
    }

    #[test]
    fn dividers_are_editable_but_not_text_editable() {
        let gestures = ElementKind::Divider(DividerOrientation::Vertical).gestures();
        assert!(gestures.draggable);
        assert!(gestures.editable);
        assert!(!gestures.text_editable);
    }

    #[test]
    fn profile_image_is_only_replaceable() {
        let gestures = ElementKind::ProfileImage { src: String::new() }.gestures();
        assert!(!gestures.editable);
        assert!(gestures.image_replaceable);
    }

    #[test]
    fn content_markup_puts_icon_first() {
        let content = ElementContent::with_icon("fab fa-facebook", "Facebook");
        assert_eq!(
            content.to_html(),
            "<i class=\"fab fa-facebook\"></i> Facebook"
        );
        assert_eq!(ElementContent::text("plain").to_html(), "plain");
    }

    #[test]
    fn offset_renders_translate() {
        assert_eq!(
            Offset::new(12.0, -3.5).css_transform(),
            "translate(12px, -3.5px)"
        );
    }

    #[test]
    fn contains_point_follows_offset() {
        let mut element =
            CardElement::new(ElementKind::Text).with_frame(Frame::new(10.0, 10.0, 50.0, 20.0));
        assert!(element.contains_point(20.0, 20.0));

        element.offset = Offset::new(100.0, 0.0);
        assert!(!element.contains_point(20.0, 20.0));
        assert!(element.contains_point(120.0, 20.0));
    }
}
