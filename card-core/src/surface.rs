//! The card surface: the root container holding every card element.

use serde::{Deserialize, Serialize};

use crate::element::{CardElement, ElementContent, ElementId, ElementKind, Frame, Offset, Region};
use crate::style::{Dimension, ElementStyle};
use crate::theme::Theme;
use crate::{CardError, CardResult};

/// Default card width in pixels (3.5in at 100dpi).
pub const DEFAULT_WIDTH: f32 = 350.0;

/// Default card height in pixels (2in at 100dpi).
pub const DEFAULT_HEIGHT: f32 = 200.0;

/// Vertical distance between stacked contact info rows.
pub const CONTACT_ROW_HEIGHT: f32 = 24.0;

/// A serialized copy of the surface content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(String);

impl Snapshot {
    /// The serialized JSON.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Content captured in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotBody {
    elements: Vec<CardElement>,
    width: Dimension,
    height: Dimension,
    #[serde(default)]
    offset: Offset,
    theme: Theme,
}

/// The business card being edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSurface {
    /// Elements in document order.
    elements: Vec<CardElement>,
    /// Card width.
    pub width: Dimension,
    /// Card height.
    pub height: Dimension,
    /// Translation applied when resizing from the left or top edge.
    #[serde(default)]
    pub offset: Offset,
    /// Visual theme.
    #[serde(default)]
    pub theme: Theme,
    /// Box of the contact info block new text elements are stacked into.
    pub contact_info: Frame,
}

impl Default for CardSurface {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl CardSurface {
    /// Create an empty card of the given size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            elements: Vec::new(),
            width: Dimension::Px(width),
            height: Dimension::Px(height),
            offset: Offset::default(),
            theme: Theme::default(),
            contact_info: Frame::new(20.0, 96.0, width - 40.0, height - 106.0),
        }
    }

    /// The starter card: photo, name, title and two contact rows.
    #[must_use]
    pub fn template() -> Self {
        let mut surface = Self::default();
        surface.add_element(
            CardElement::new(ElementKind::ProfileImage { src: String::new() })
                .with_frame(Frame::new(20.0, 20.0, 64.0, 64.0)),
        );
        surface.add_element(
            CardElement::new(ElementKind::Text)
                .with_content(ElementContent::text("Jane Doe"))
                .with_frame(Frame::new(100.0, 24.0, 230.0, 28.0))
                .with_style(ElementStyle {
                    font_size: Some(Dimension::Px(22.0)),
                    bold: true,
                    ..ElementStyle::default()
                }),
        );
        surface.add_element(
            CardElement::new(ElementKind::Text)
                .with_content(ElementContent::text("Product Designer"))
                .with_frame(Frame::new(100.0, 56.0, 230.0, 20.0))
                .with_style(ElementStyle {
                    italic: true,
                    ..ElementStyle::default()
                }),
        );
        for (icon, text) in [
            ("fas fa-phone", "+1 555 0100"),
            ("fas fa-envelope", "jane@example.com"),
        ] {
            let frame = surface.next_contact_frame();
            surface.add_element(
                CardElement::new(ElementKind::IconLabel)
                    .with_region(Region::ContactInfo)
                    .with_content(ElementContent::with_icon(icon, text))
                    .with_frame(frame),
            );
        }
        surface
    }

    /// Append an element at the end of the element sequence.
    pub fn add_element(&mut self, element: CardElement) -> ElementId {
        let id = element.id;
        self.elements.push(element);
        id
    }

    /// Remove an element, keeping the relative order of the rest.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not found.
    pub fn remove_element(&mut self, id: &ElementId) -> CardResult<CardElement> {
        let index = self
            .elements
            .iter()
            .position(|e| e.id == *id)
            .ok_or_else(|| CardError::ElementNotFound(id.to_string()))?;
        Ok(self.elements.remove(index))
    }

    /// Get an element by ID.
    #[must_use]
    pub fn get_element(&self, id: ElementId) -> Option<&CardElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an element by ID.
    pub fn get_element_mut(&mut self, id: ElementId) -> Option<&mut CardElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Elements in document order.
    #[must_use]
    pub fn elements(&self) -> &[CardElement] {
        &self.elements
    }

    pub(crate) fn elements_mut(&mut self) -> &mut [CardElement] {
        &mut self.elements
    }

    /// Elements belonging to a region, in document order.
    pub fn elements_in(&self, region: Region) -> impl Iterator<Item = &CardElement> {
        self.elements.iter().filter(move |e| e.region == region)
    }

    /// Find the topmost element at the given card coordinates.
    #[must_use]
    pub fn element_at(&self, x: f32, y: f32) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.contains_point(x, y))
            .map(|e| e.id)
    }

    /// Frame for the next row appended to the contact info block.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn next_contact_frame(&self) -> Frame {
        let rows = self.elements_in(Region::ContactInfo).count() as f32;
        Frame::new(
            self.contact_info.x,
            self.contact_info.y + rows * CONTACT_ROW_HEIGHT,
            self.contact_info.width,
            CONTACT_ROW_HEIGHT,
        )
    }

    /// Numeric card size, falling back to defaults for non-numeric input.
    #[must_use]
    pub fn size_px(&self) -> (f32, f32) {
        (
            self.width.px_or(DEFAULT_WIDTH),
            self.height.px_or(DEFAULT_HEIGHT),
        )
    }

    /// Get the number of elements on the card.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Check if the card has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Serialize the full content (elements, size, position and theme).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn snapshot(&self) -> CardResult<Snapshot> {
        let body = SnapshotBody {
            elements: self.elements.clone(),
            width: self.width.clone(),
            height: self.height.clone(),
            offset: self.offset,
            theme: self.theme.clone(),
        };
        Ok(Snapshot(serde_json::to_string(&body)?))
    }

    /// Restore everything captured in a snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be parsed.
    pub fn restore(&mut self, snapshot: &Snapshot) -> CardResult<()> {
        let body: SnapshotBody = serde_json::from_str(snapshot.as_str())?;
        self.elements = body.elements;
        self.width = body.width;
        self.height = body.height;
        self.offset = body.offset;
        self.theme = body.theme;
        Ok(())
    }

    /// Restore elements, dimensions and position, leaving the theme
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be parsed.
    pub fn restore_content(&mut self, snapshot: &Snapshot) -> CardResult<()> {
        let body: SnapshotBody = serde_json::from_str(snapshot.as_str())?;
        self.elements = body.elements;
        self.width = body.width;
        self.height = body.height;
        self.offset = body.offset;
        Ok(())
    }

    /// Serialize the surface to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CardResult<String> {
        serde_json::to_string(self).map_err(CardError::Serialization)
    }

    /// Deserialize a surface from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> CardResult<Self> {
        serde_json::from_str(json).map_err(CardError::Serialization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeClass;

    fn text(content: &str) -> CardElement {
        CardElement::new(ElementKind::Text).with_content(ElementContent::text(content))
    }

    #[test]
    fn test_surface_add_remove() {
        let mut surface = CardSurface::default();
        assert!(surface.is_empty());

        let id = surface.add_element(text("Hello"));
        assert_eq!(surface.element_count(), 1);
        assert!(surface.get_element(id).is_some());

        surface.remove_element(&id).expect("should remove");
        assert!(surface.is_empty());
    }

    #[test]
    fn removing_unknown_element_fails() {
        let mut surface = CardSurface::default();
        let result = surface.remove_element(&ElementId::new());
        assert!(matches!(result, Err(CardError::ElementNotFound(_))));
    }

    #[test]
    fn removal_preserves_order() {
        let mut surface = CardSurface::default();
        let a = surface.add_element(text("a"));
        let b = surface.add_element(text("b"));
        let c = surface.add_element(text("c"));

        surface.remove_element(&b).expect("remove");
        let ids: Vec<_> = surface.elements().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn element_at_prefers_later_elements() {
        let mut surface = CardSurface::default();
        surface.add_element(text("below").with_frame(Frame::new(0.0, 0.0, 100.0, 100.0)));
        let top = surface.add_element(text("above").with_frame(Frame::new(10.0, 10.0, 20.0, 20.0)));

        assert_eq!(surface.element_at(15.0, 15.0), Some(top));
        assert!(surface.element_at(300.0, 190.0).is_none());
    }

    #[test]
    fn contact_rows_stack_downwards() {
        let mut surface = CardSurface::default();
        let first = surface.next_contact_frame();
        surface.add_element(text("row").with_region(Region::ContactInfo).with_frame(first));
        let second = surface.next_contact_frame();
        assert!((second.y - first.y - CONTACT_ROW_HEIGHT).abs() < f32::EPSILON);
    }

    #[test]
    fn template_has_photo_name_and_contacts() {
        let surface = CardSurface::template();
        assert_eq!(surface.element_count(), 5);
        assert_eq!(surface.elements_in(Region::ContactInfo).count(), 2);
    }

    #[test]
    fn snapshot_restores_surface_offset() {
        let mut surface = CardSurface::default();
        let snapshot = surface.snapshot().expect("snapshot");

        surface.width = Dimension::Px(300.0);
        surface.offset = Offset::new(50.0, 0.0);
        surface.restore(&snapshot).expect("restore");
        assert_eq!(surface.offset, Offset::default());

        surface.offset = Offset::new(0.0, 30.0);
        surface.restore_content(&snapshot).expect("restore content");
        assert_eq!(surface.offset, Offset::default());
    }

    #[test]
    fn restore_content_keeps_theme() {
        let mut surface = CardSurface::template();
        let snapshot = surface.snapshot().expect("snapshot");

        surface.theme.select(Some(ThemeClass::Dark));
        surface.width = Dimension::Px(500.0);
        surface.add_element(text("extra"));

        surface.restore_content(&snapshot).expect("restore");
        assert_eq!(surface.element_count(), 5);
        assert_eq!(surface.width, Dimension::Px(DEFAULT_WIDTH));
        assert_eq!(surface.theme.class, Some(ThemeClass::Dark));

        surface.restore(&snapshot).expect("restore");
        assert_eq!(surface.theme.class, None);
    }

    #[test]
    fn json_roundtrip_preserves_layout() {
        let surface = CardSurface::template();
        let json = surface.to_json().expect("json");
        let parsed = CardSurface::from_json(&json).expect("parse");
        assert_eq!(parsed.elements(), surface.elements());
        assert_eq!(parsed.size_px(), surface.size_px());
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(CardSurface::from_json("{ not json }").is_err());
    }
}
