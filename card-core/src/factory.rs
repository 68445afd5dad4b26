//! Constructors for new card elements.
//!
//! Text and social labels are stacked into the contact info block; dividers
//! are placed directly on the card.

use serde::{Deserialize, Serialize};

use crate::element::{
    CardElement, DividerOrientation, ElementContent, ElementKind, Frame, Region, INFO_ICON,
};
use crate::surface::CardSurface;

/// Thickness of divider lines in pixels.
pub const DIVIDER_THICKNESS: f32 = 2.0;

/// The fixed social network presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum SocialPreset {
    Facebook,
    Twitter,
    LinkedIn,
    Instagram,
}

impl SocialPreset {
    /// All presets, in toolbar order.
    pub const ALL: [Self; 4] = [
        Self::Facebook,
        Self::Twitter,
        Self::LinkedIn,
        Self::Instagram,
    ];

    /// Icon class for the preset.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Facebook => "fab fa-facebook",
            Self::Twitter => "fab fa-twitter",
            Self::LinkedIn => "fab fa-linkedin",
            Self::Instagram => "fab fa-instagram",
        }
    }

    /// Display name for the preset.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Facebook => "Facebook",
            Self::Twitter => "Twitter",
            Self::LinkedIn => "LinkedIn",
            Self::Instagram => "Instagram",
        }
    }
}

/// Free text led by the info glyph. `None` for empty input.
#[must_use]
pub fn text_element(surface: &CardSurface, input: &str) -> Option<CardElement> {
    if input.is_empty() {
        return None;
    }
    Some(contact_row(
        surface,
        ElementKind::Text,
        ElementContent::with_icon(INFO_ICON, input),
    ))
}

/// A social network label with the preset's icon and name.
#[must_use]
pub fn icon_label(surface: &CardSurface, preset: SocialPreset) -> CardElement {
    contact_row(
        surface,
        ElementKind::IconLabel,
        ElementContent::with_icon(preset.icon(), preset.name()),
    )
}

/// A divider line centered on the card.
#[must_use]
pub fn divider(surface: &CardSurface, orientation: DividerOrientation) -> CardElement {
    let (width, height) = surface.size_px();
    let frame = match orientation {
        DividerOrientation::Horizontal => Frame::new(
            width * 0.1,
            (height - DIVIDER_THICKNESS) / 2.0,
            width * 0.8,
            DIVIDER_THICKNESS,
        ),
        DividerOrientation::Vertical => Frame::new(
            (width - DIVIDER_THICKNESS) / 2.0,
            height * 0.1,
            DIVIDER_THICKNESS,
            height * 0.8,
        ),
    };
    CardElement::new(ElementKind::Divider(orientation)).with_frame(frame)
}

fn contact_row(surface: &CardSurface, kind: ElementKind, content: ElementContent) -> CardElement {
    CardElement::new(kind)
        .with_region(Region::ContactInfo)
        .with_content(content)
        .with_frame(surface.next_contact_frame())
}
