//! Card themes: named theme classes and custom colors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Named theme classes a card can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum ThemeClass {
    Default,
    Dark,
    Corporate,
    Modern,
    #[serde(rename = "gradient-1")]
    Gradient1,
    #[serde(rename = "gradient-2")]
    Gradient2,
    #[serde(rename = "gradient-3")]
    Gradient3,
    RichBlue,
    RichPurple,
    RichGreen,
    MultishadeOrange,
    MultishadePink,
    MultishadeAqua,
}

/// Error returned for unknown theme class names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown theme: {0}")]
pub struct UnknownTheme(pub String);

impl ThemeClass {
    /// Every theme class, in selector order.
    pub const ALL: [Self; 13] = [
        Self::Default,
        Self::Dark,
        Self::Corporate,
        Self::Modern,
        Self::Gradient1,
        Self::Gradient2,
        Self::Gradient3,
        Self::RichBlue,
        Self::RichPurple,
        Self::RichGreen,
        Self::MultishadeOrange,
        Self::MultishadePink,
        Self::MultishadeAqua,
    ];

    /// CSS class name.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Default => "theme-default",
            Self::Dark => "theme-dark",
            Self::Corporate => "theme-corporate",
            Self::Modern => "theme-modern",
            Self::Gradient1 => "theme-gradient-1",
            Self::Gradient2 => "theme-gradient-2",
            Self::Gradient3 => "theme-gradient-3",
            Self::RichBlue => "theme-rich-blue",
            Self::RichPurple => "theme-rich-purple",
            Self::RichGreen => "theme-rich-green",
            Self::MultishadeOrange => "theme-multishade-orange",
            Self::MultishadePink => "theme-multishade-pink",
            Self::MultishadeAqua => "theme-multishade-aqua",
        }
    }

    /// Background fill stops and text color used when rasterizing.
    ///
    /// Single-stop entries are flat fills; two stops describe a left to
    /// right gradient.
    #[must_use]
    pub const fn palette(self) -> Palette {
        match self {
            Self::Default => Palette::flat("#ffffff", "#333333"),
            Self::Dark => Palette::flat("#222831", "#eeeeee"),
            Self::Corporate => Palette::flat("#f4f6f8", "#1f3a5f"),
            Self::Modern => Palette::flat("#fafafa", "#111111"),
            Self::Gradient1 => Palette::gradient("#ff9a9e", "#fad0c4", "#333333"),
            Self::Gradient2 => Palette::gradient("#a18cd1", "#fbc2eb", "#222222"),
            Self::Gradient3 => Palette::gradient("#84fab0", "#8fd3f4", "#1b1b1b"),
            Self::RichBlue => Palette::flat("#0d47a1", "#ffffff"),
            Self::RichPurple => Palette::flat("#4a148c", "#ffffff"),
            Self::RichGreen => Palette::flat("#1b5e20", "#ffffff"),
            Self::MultishadeOrange => Palette::gradient("#ff7e5f", "#feb47b", "#ffffff"),
            Self::MultishadePink => Palette::gradient("#ee9ca7", "#ffdde1", "#3b3b3b"),
            Self::MultishadeAqua => Palette::gradient("#13547a", "#80d0c7", "#ffffff"),
        }
    }
}

impl fmt::Display for ThemeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}

impl FromStr for ThemeClass {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|theme| theme.css_class() == wanted)
            .ok_or_else(|| UnknownTheme(wanted.to_string()))
    }
}

/// Colors a theme paints with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// First background stop.
    pub background: &'static str,
    /// Second background stop for gradients.
    pub background_end: Option<&'static str>,
    /// Text color.
    pub text: &'static str,
}

impl Palette {
    const fn flat(background: &'static str, text: &'static str) -> Self {
        Self {
            background,
            background_end: None,
            text,
        }
    }

    const fn gradient(start: &'static str, end: &'static str, text: &'static str) -> Self {
        Self {
            background: start,
            background_end: Some(end),
            text,
        }
    }
}

/// Custom colors set directly on the card surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomColors {
    /// Background color.
    pub background: String,
    /// Text color.
    pub text: String,
}

/// The visual theme of a card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Applied theme class, if any.
    pub class: Option<ThemeClass>,
    /// Custom colors overriding the theme class.
    pub custom: Option<CustomColors>,
}

impl Theme {
    /// Replace the theme class. `None` removes every theme class.
    pub fn select(&mut self, class: Option<ThemeClass>) {
        self.class = class;
    }

    /// Set custom background and text colors.
    pub fn set_custom(&mut self, background: impl Into<String>, text: impl Into<String>) {
        self.custom = Some(CustomColors {
            background: background.into(),
            text: text.into(),
        });
    }

    /// Effective colors: custom colors win over the theme class palette.
    #[must_use]
    pub fn resolved(&self) -> ResolvedColors {
        let palette = self.class.unwrap_or(ThemeClass::Default).palette();
        match &self.custom {
            Some(custom) => ResolvedColors {
                background: custom.background.clone(),
                background_end: None,
                text: custom.text.clone(),
            },
            None => ResolvedColors {
                background: palette.background.to_string(),
                background_end: palette.background_end.map(str::to_string),
                text: palette.text.to_string(),
            },
        }
    }
}

/// Colors after resolving custom overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColors {
    /// Background color or first gradient stop.
    pub background: String,
    /// Second gradient stop.
    pub background_end: Option<String>,
    /// Text color.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_round_trip_through_from_str() {
        for theme in ThemeClass::ALL {
            assert_eq!(theme.css_class().parse::<ThemeClass>(), Ok(theme));
        }
    }

    #[test]
    fn unknown_theme_is_rejected() {
        let err = "theme-neon".parse::<ThemeClass>().unwrap_err();
        assert_eq!(err, UnknownTheme("theme-neon".to_string()));
    }

    #[test]
    fn selecting_replaces_previous_class() {
        let mut theme = Theme::default();
        theme.select(Some(ThemeClass::Dark));
        theme.select(Some(ThemeClass::RichBlue));
        assert_eq!(theme.class, Some(ThemeClass::RichBlue));
        theme.select(None);
        assert_eq!(theme.class, None);
    }

    #[test]
    fn custom_colors_override_palette() {
        let mut theme = Theme::default();
        theme.select(Some(ThemeClass::Gradient1));
        assert!(theme.resolved().background_end.is_some());

        theme.set_custom("#000000", "#ffffff");
        let colors = theme.resolved();
        assert_eq!(colors.background, "#000000");
        assert_eq!(colors.text, "#ffffff");
        assert!(colors.background_end.is_none());
    }
}
