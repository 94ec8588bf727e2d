//! Theme configuration for the desktop app

/// Resolved theme (light or dark)
///
/// The preference is a single persisted boolean; there is no system-follow
/// mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Check if the theme is dark
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Resolve the persisted dark-mode flag to a theme
    #[must_use]
    pub const fn from_dark_flag(dark_mode: bool) -> Self {
        if dark_mode {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// The theme after a toggle
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Get the color palette for this theme
    #[must_use]
    pub const fn palette(self) -> &'static ColorPalette {
        match self {
            Self::Light => &LIGHT_PALETTE,
            Self::Dark => &DARK_PALETTE,
        }
    }
}

/// Color palette for the application
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub bg_primary: &'static str,
    pub bg_secondary: &'static str,
    pub bg_tertiary: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub text_muted: &'static str,
    pub border: &'static str,
    pub border_light: &'static str,
    pub accent: &'static str,
    pub accent_hover: &'static str,
    pub accent_text: &'static str,
    pub danger: &'static str,
    pub success: &'static str,
}

/// Light theme colors
pub const LIGHT_PALETTE: ColorPalette = ColorPalette {
    bg_primary: "#f8f7fc",
    bg_secondary: "#ffffff",
    bg_tertiary: "#eef0f4",
    text_primary: "#1f2430",
    text_secondary: "#5c6370",
    text_muted: "#9aa2ad",
    border: "#d7dae0",
    border_light: "#e9ebef",
    accent: "#6366f1",
    accent_hover: "#4f46e5",
    accent_text: "#ffffff",
    danger: "#dc2626",
    success: "#16a34a",
};

/// Dark theme colors
pub const DARK_PALETTE: ColorPalette = ColorPalette {
    bg_primary: "#16181d",
    bg_secondary: "#1e2128",
    bg_tertiary: "#282c35",
    text_primary: "#e6e8ec",
    text_secondary: "#9aa2ad",
    text_muted: "#5c6370",
    border: "#363b45",
    border_light: "#2c313a",
    accent: "#818cf8",
    accent_hover: "#a5b4fc",
    accent_text: "#16181d",
    danger: "#f87171",
    success: "#4ade80",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dark_flag() {
        assert_eq!(Theme::from_dark_flag(true), Theme::Dark);
        assert_eq!(Theme::from_dark_flag(false), Theme::Light);
    }

    #[test]
    fn test_toggled_is_an_involution() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }
}
