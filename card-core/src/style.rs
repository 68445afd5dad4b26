//! Style values for card elements and the card surface.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A pixel length taken from user input.
///
/// Input is not validated: text that does not parse as a number is kept
/// verbatim and still rendered with a `px` suffix, producing a degenerate
/// but harmless style value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum Dimension {
    /// A numeric pixel length.
    Px(f32),
    /// Raw input that is not a number.
    Raw(String),
}

impl Dimension {
    /// Interpret a form field value as a pixel length.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.parse::<f32>() {
            Ok(value) if value.is_finite() => Self::Px(value),
            _ => Self::Raw(trimmed.to_string()),
        }
    }

    /// Numeric value in pixels, if the input was numeric.
    #[must_use]
    pub fn px(&self) -> Option<f32> {
        match self {
            Self::Px(value) => Some(*value),
            Self::Raw(_) => None,
        }
    }

    /// Numeric value, or `fallback` for non-numeric input.
    #[must_use]
    pub fn px_or(&self, fallback: f32) -> f32 {
        self.px().unwrap_or(fallback)
    }

    /// Whether the value is a usable number.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Px(_))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(value) => write!(f, "{value}px"),
            Self::Raw(raw) => write!(f, "{raw}px"),
        }
    }
}

impl From<f32> for Dimension {
    fn from(value: f32) -> Self {
        Self::Px(value)
    }
}

/// Typography applied to a single element.
///
/// Unset properties inherit from the card theme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct ElementStyle {
    /// Font family name.
    pub font_family: Option<String>,
    /// Font size.
    pub font_size: Option<Dimension>,
    /// Text color as a CSS color string.
    pub color: Option<String>,
    /// Bold weight.
    pub bold: bool,
    /// Italic style.
    pub italic: bool,
    /// Underline decoration.
    pub underline: bool,
}

impl ElementStyle {
    /// CSS `font-weight` value.
    #[must_use]
    pub fn font_weight(&self) -> &'static str {
        if self.bold {
            "bold"
        } else {
            "normal"
        }
    }

    /// CSS `font-style` value.
    #[must_use]
    pub fn font_style(&self) -> &'static str {
        if self.italic {
            "italic"
        } else {
            "normal"
        }
    }

    /// CSS `text-decoration` value.
    #[must_use]
    pub fn text_decoration(&self) -> &'static str {
        if self.underline {
            "underline"
        } else {
            "none"
        }
    }

    /// Inline CSS declarations for this style.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = Vec::new();
        if let Some(family) = &self.font_family {
            css.push(format!("font-family: {family}"));
        }
        if let Some(size) = &self.font_size {
            css.push(format!("font-size: {size}"));
        }
        if let Some(color) = &self.color {
            css.push(format!("color: {color}"));
        }
        css.push(format!("font-weight: {}", self.font_weight()));
        css.push(format!("font-style: {}", self.font_style()));
        css.push(format!("text-decoration: {}", self.text_decoration()));
        css.join("; ")
    }
}
