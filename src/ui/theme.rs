//! Color themes and ANSI escape sequence generation.
//!
//! Themes are TOML documents with a `name` and a flat `[colors]` table of hex
//! strings. Three ship with the plugin and any other can be loaded from a
//! file with the `theme_file` option.
//!
//! # Built-in Themes
//!
//! - `saffron`: warm dark theme in festival colors (default)
//! - `catppuccin-mocha`: dark pastel
//! - `catppuccin-latte`: light pastel
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#ffb347"
//! selection_fg = "#1c1410"
//! selection_bg = "#ff9933"
//! text_normal = "#f5e6d3"
//! text_dim = "#8c7a68"
//! border = "#4a3b2f"
//! accent = "#ff9933"
//! search_bar_border = "#ff9933"
//! match_highlight_fg = "#1c1410"
//! match_highlight_bg = "#ffd166"
//! empty_state_fg = "#ffb347"
//! favorite_fg = "#ef476f"
//! alert_border = "#ef476f"
//! crowd_low = "#06d6a0"
//! crowd_moderate = "#ffd166"
//! crowd_high = "#f78c6b"
//! crowd_very_high = "#ef476f"
//! ```

use crate::domain::error::{MandalGuideError, Result};
use crate::domain::CrowdLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "saffron";

/// A named color scheme.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors for every UI element.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected row.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, locations, secondary text.
    pub text_dim: String,

    pub border: String,

    /// Active tab and selected area chip.
    pub accent: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Favorite marker.
    pub favorite_fg: String,

    /// Border and title of alert boxes.
    pub alert_border: String,

    pub crowd_low: String,
    pub crowd_moderate: String,
    pub crowd_high: String,
    pub crowd_very_high: String,
}

impl ThemeColors {
    /// Color for a crowd level badge.
    #[must_use]
    pub fn crowd(&self, level: CrowdLevel) -> &str {
        match level {
            CrowdLevel::Low => &self.crowd_low,
            CrowdLevel::Moderate => &self.crowd_moderate,
            CrowdLevel::High => &self.crowd_high,
            CrowdLevel::VeryHigh => &self.crowd_very_high,
        }
    }

    /// Color for a crowd label as shown in list rows.
    ///
    /// Unknown labels render in the normal text color.
    #[must_use]
    pub fn crowd_label(&self, label: &str) -> &str {
        [CrowdLevel::Low, CrowdLevel::Moderate, CrowdLevel::High, CrowdLevel::VeryHigh]
            .into_iter()
            .find(|level| level.label() == label)
            .map_or(&self.text_normal, |level| self.crowd(level))
    }
}

impl Theme {
    /// Loads a built-in theme by name, `None` for unknown names.
    ///
    /// ```
    /// use mandalguide::ui::Theme;
    ///
    /// assert_eq!(Theme::from_name("catppuccin-latte").map(|t| t.name), Some("catppuccin-latte".into()));
    /// assert!(Theme::from_name("neon").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let source = match name {
            "saffron" => include_str!("../../themes/saffron.toml"),
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(source).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// [`MandalGuideError::Io`] when the file cannot be read,
    /// [`MandalGuideError::Theme`] when it is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| MandalGuideError::Theme(format!("{}: {e}", path.display())))
    }

    /// Parses `#rrggbb` (or `rrggbb`); `None` for anything else.
    fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// 24-bit foreground escape. Invalid colors fall back to white.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::parse_hex(hex).unwrap_or((255, 255, 255));
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape. Invalid colors fall back to white.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::parse_hex(hex).unwrap_or((255, 255, 255));
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// The `saffron` theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded theme fails to parse.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("built-in saffron theme should always parse")
    }
}
