use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme color palette defining all colors used in the application. The
/// active theme is threaded down through rendering as an explicit value
/// rather than ambient global state.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    // Primary colors
    pub primary: ColorSpec,
    pub secondary: ColorSpec,
    pub accent: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_secondary: ColorSpec,
    pub text_muted: ColorSpec,

    // Background colors
    pub background: ColorSpec,
    pub surface: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,
    pub info: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,

    // Footer mode colors
    pub footer_auth: ColorSpec,
    pub footer_sessions: ColorSpec,
    pub footer_session: ColorSpec,
    pub footer_wizard: ColorSpec,
    pub footer_settings: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Theme {
    /// Get the default theme (light).
    ///
    pub fn default() -> Self {
        Self::light()
    }

    /// Light theme, matching the application's original palette.
    ///
    pub fn light() -> Self {
        Theme {
            name: "light".to_string(),
            primary: ColorSpec {
                r: 52,
                g: 152,
                b: 219,
            }, // Blue
            secondary: ColorSpec {
                r: 241,
                g: 196,
                b: 15,
            }, // Yellow
            accent: ColorSpec {
                r: 161,
                g: 178,
                b: 195,
            }, // Slate
            text: ColorSpec {
                r: 44,
                g: 62,
                b: 80,
            }, // Midnight
            text_secondary: ColorSpec {
                r: 84,
                g: 104,
                b: 120,
            }, // Subtext
            text_muted: ColorSpec {
                r: 127,
                g: 140,
                b: 141,
            }, // Muted
            background: ColorSpec {
                r: 255,
                g: 255,
                b: 255,
            }, // White
            surface: ColorSpec {
                r: 236,
                g: 240,
                b: 241,
            }, // Clouds
            success: ColorSpec {
                r: 39,
                g: 174,
                b: 96,
            }, // Green
            warning: ColorSpec {
                r: 243,
                g: 156,
                b: 18,
            }, // Orange
            error: ColorSpec {
                r: 231,
                g: 76,
                b: 60,
            }, // Red
            info: ColorSpec {
                r: 52,
                g: 152,
                b: 219,
            }, // Blue
            border_active: ColorSpec {
                r: 52,
                g: 152,
                b: 219,
            }, // Blue
            border_normal: ColorSpec {
                r: 127,
                g: 140,
                b: 141,
            }, // Muted
            highlight_bg: ColorSpec {
                r: 52,
                g: 152,
                b: 219,
            }, // Blue
            highlight_fg: ColorSpec {
                r: 255,
                g: 255,
                b: 255,
            }, // White
            footer_auth: ColorSpec {
                r: 52,
                g: 152,
                b: 219,
            }, // Blue
            footer_sessions: ColorSpec {
                r: 39,
                g: 174,
                b: 96,
            }, // Green
            footer_session: ColorSpec {
                r: 161,
                g: 178,
                b: 195,
            }, // Slate
            footer_wizard: ColorSpec {
                r: 241,
                g: 196,
                b: 15,
            }, // Yellow
            footer_settings: ColorSpec {
                r: 243,
                g: 156,
                b: 18,
            }, // Orange
        }
    }

    /// Dark theme.
    ///
    pub fn dark() -> Self {
        Theme {
            name: "dark".to_string(),
            primary: ColorSpec {
                r: 93,
                g: 173,
                b: 226,
            }, // Blue
            secondary: ColorSpec {
                r: 244,
                g: 208,
                b: 63,
            }, // Yellow
            accent: ColorSpec {
                r: 133,
                g: 146,
                b: 158,
            }, // Slate
            text: ColorSpec {
                r: 234,
                g: 236,
                b: 238,
            }, // Foreground
            text_secondary: ColorSpec {
                r: 174,
                g: 182,
                b: 191,
            }, // Subtext
            text_muted: ColorSpec {
                r: 113,
                g: 125,
                b: 126,
            }, // Muted
            background: ColorSpec {
                r: 23,
                g: 32,
                b: 42,
            }, // Midnight
            surface: ColorSpec {
                r: 33,
                g: 47,
                b: 61,
            }, // Surface
            success: ColorSpec {
                r: 88,
                g: 214,
                b: 141,
            }, // Green
            warning: ColorSpec {
                r: 245,
                g: 176,
                b: 65,
            }, // Orange
            error: ColorSpec {
                r: 236,
                g: 112,
                b: 99,
            }, // Red
            info: ColorSpec {
                r: 93,
                g: 173,
                b: 226,
            }, // Blue
            border_active: ColorSpec {
                r: 93,
                g: 173,
                b: 226,
            }, // Blue
            border_normal: ColorSpec {
                r: 113,
                g: 125,
                b: 126,
            }, // Muted
            highlight_bg: ColorSpec {
                r: 93,
                g: 173,
                b: 226,
            }, // Blue
            highlight_fg: ColorSpec {
                r: 23,
                g: 32,
                b: 42,
            }, // Midnight
            footer_auth: ColorSpec {
                r: 93,
                g: 173,
                b: 226,
            }, // Blue
            footer_sessions: ColorSpec {
                r: 88,
                g: 214,
                b: 141,
            }, // Green
            footer_session: ColorSpec {
                r: 133,
                g: 146,
                b: 158,
            }, // Slate
            footer_wizard: ColorSpec {
                r: 244,
                g: 208,
                b: 63,
            }, // Yellow
            footer_settings: ColorSpec {
                r: 245,
                g: 176,
                b: 65,
            }, // Orange
        }
    }

    /// Get a theme by name.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "light" => Some(Self::light()),
            "dark" => Some(Self::dark()),
            _ => None,
        }
    }

    /// Get list of all available theme names.
    ///
    pub fn available_themes() -> Vec<String> {
        vec!["light".to_string(), "dark".to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_resolves_known_themes() {
        for name in Theme::available_themes() {
            let theme = Theme::from_name(&name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn test_color_spec_to_color() {
        let spec = ColorSpec {
            r: 52,
            g: 152,
            b: 219,
        };
        assert_eq!(spec.to_color(), Color::Rgb(52, 152, 219));
    }
}
