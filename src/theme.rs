//! Accent theme selection and palette lookup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Accent colour theme chosen by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppTheme {
    /// Pink accent (default).
    #[default]
    Rose,
    /// Green accent.
    Emerald,
    /// Blue-violet accent.
    Indigo,
    /// Orange accent.
    Amber,
}

/// Colours a renderer needs for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Primary accent (buttons, progress bars).
    pub primary: &'static str,
    /// Secondary tint (cards, chips).
    pub secondary: &'static str,
    /// Page background.
    pub background: &'static str,
    /// Gradient end stop paired with `primary`.
    pub gradient_end: &'static str,
}

impl AppTheme {
    /// Return all theme variants.
    pub fn all() -> &'static [AppTheme] {
        &[
            AppTheme::Rose,
            AppTheme::Emerald,
            AppTheme::Indigo,
            AppTheme::Amber,
        ]
    }

    /// Canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rose => "rose",
            Self::Emerald => "emerald",
            Self::Indigo => "indigo",
            Self::Amber => "amber",
        }
    }

    /// Palette for this theme.
    #[must_use]
    pub fn palette(self) -> Palette {
        match self {
            Self::Rose => Palette {
                primary: "#db2777",
                secondary: "#fdf2f8",
                background: "#fdf2f8",
                gradient_end: "#f43f5e",
            },
            Self::Emerald => Palette {
                primary: "#059669",
                secondary: "#ecfdf5",
                background: "#f0fdf4",
                gradient_end: "#10b981",
            },
            Self::Indigo => Palette {
                primary: "#4f46e5",
                secondary: "#eef2ff",
                background: "#f5f7ff",
                gradient_end: "#6366f1",
            },
            Self::Amber => Palette {
                primary: "#d97706",
                secondary: "#fffbeb",
                background: "#fffcf0",
                gradient_end: "#f59e0b",
            },
        }
    }
}

impl fmt::Display for AppTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a theme name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeParseError(pub String);

impl fmt::Display for ThemeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme: {}", self.0)
    }
}

impl std::error::Error for ThemeParseError {}

impl FromStr for AppTheme {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rose" => Ok(Self::Rose),
            "emerald" => Ok(Self::Emerald),
            "indigo" => Ok(Self::Indigo),
            "amber" => Ok(Self::Amber),
            _ => Err(ThemeParseError(s.to_owned())),
        }
    }
}
