//! Theme and color palette for Ace Planner
//!
//! Two themes are supported:
//! - Light: the default teal-on-white look
//! - Dark: near-black surfaces with the same teal brand color
//!
//! ```rust
//! use app_ui::theme::{get_theme, ThemeName};
//!
//! let theme = get_theme(ThemeName::Light);
//! assert_eq!(theme.colors.primary, "#01796F");
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// Color Types
// =============================================================================

/// A color represented as an RGBA hex string (e.g., "#FFFFFF" or "#FFFFFF80")
pub type Color = String;

// =============================================================================
// Brand Colors
// =============================================================================

/// Ace Planner brand colors
pub mod brand {
    /// Primary teal
    pub const PRIMARY: &str = "#01796F";
    /// Destructive red
    pub const DANGER: &str = "#FF3E30";
    /// Light surface
    pub const SURFACE: &str = "#F5F5F5";
    /// Pure white
    pub const WHITE: &str = "#FFFFFF";
}

// =============================================================================
// Theme
// =============================================================================

/// Theme name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    /// Light theme
    #[default]
    Light,
    /// Dark theme
    Dark,
}

/// Semantic colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    /// Brand color for buttons, checkmarks and the drawer
    pub primary: Color,
    /// Screen background
    pub background: Color,
    /// Cards, inputs and list rows
    pub surface: Color,
    /// Primary text
    pub text: Color,
    /// Secondary text
    pub text_muted: Color,
    /// Borders and dividers
    pub border: Color,
    /// Destructive actions
    pub danger: Color,
    /// Text on top of `primary`
    pub on_primary: Color,
}

/// Complete theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Theme name
    pub name: ThemeName,
    /// Semantic colors
    pub colors: ThemeColors,
}

impl Theme {
    /// Whether this is a dark theme
    pub fn is_dark(&self) -> bool {
        self.name == ThemeName::Dark
    }
}

impl Default for Theme {
    fn default() -> Self {
        light_theme()
    }
}

/// Create the light theme
pub fn light_theme() -> Theme {
    Theme {
        name: ThemeName::Light,
        colors: ThemeColors {
            primary: brand::PRIMARY.to_string(),
            background: brand::WHITE.to_string(),
            surface: brand::SURFACE.to_string(),
            text: "#1F1F1F".to_string(),
            text_muted: "#6B6B6B".to_string(),
            border: "#E0E0E0".to_string(),
            danger: brand::DANGER.to_string(),
            on_primary: brand::WHITE.to_string(),
        },
    }
}

/// Create the dark theme
pub fn dark_theme() -> Theme {
    Theme {
        name: ThemeName::Dark,
        colors: ThemeColors {
            primary: brand::PRIMARY.to_string(),
            background: "#0A0A0A".to_string(),
            surface: "#1F1F1F".to_string(),
            text: "#F0F0F0".to_string(),
            text_muted: "#8F8F8F".to_string(),
            border: "#3D3D3D".to_string(),
            danger: brand::DANGER.to_string(),
            on_primary: brand::WHITE.to_string(),
        },
    }
}

/// Get a theme by name
pub fn get_theme(name: ThemeName) -> Theme {
    match name {
        ThemeName::Light => light_theme(),
        ThemeName::Dark => dark_theme(),
    }
}
