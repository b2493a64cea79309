use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    // Primary colors
    pub primary: ColorSpec,
    pub secondary: ColorSpec,
    pub accent: ColorSpec,
    pub banner: ColorSpec,

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
    pub footer_site: ColorSpec,
    pub footer_admin: ColorSpec,
    pub footer_typing: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        ColorSpec { r, g, b }
    }

    /// Parse a `#rrggbb` colour. Anything else is rejected.
    ///
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.trim().strip_prefix('#')?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(ColorSpec {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Linear mix towards `other`; `t` is clamped to `0..=1`.
    ///
    pub fn mix(&self, other: &ColorSpec, t: f32) -> ColorSpec {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        ColorSpec {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }

    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::rose_pine_dawn()
    }
}

impl Theme {
    /// Rose Pine Dawn theme.
    ///
    pub fn rose_pine_dawn() -> Self {
        Theme {
            name: "rose-pine-dawn".to_string(),
            primary: ColorSpec::rgb(144, 122, 169),        // Iris
            secondary: ColorSpec::rgb(40, 105, 131),       // Pine
            accent: ColorSpec::rgb(215, 130, 126),         // Rose
            banner: ColorSpec::rgb(180, 99, 122),          // Love
            text: ColorSpec::rgb(87, 82, 121),             // Text
            text_secondary: ColorSpec::rgb(121, 117, 147), // Subtle
            text_muted: ColorSpec::rgb(152, 147, 165),     // Muted
            background: ColorSpec::rgb(250, 244, 237),     // Base
            surface: ColorSpec::rgb(255, 250, 243),        // Surface
            success: ColorSpec::rgb(40, 105, 131),
            warning: ColorSpec::rgb(234, 157, 52),         // Gold
            error: ColorSpec::rgb(180, 99, 122),
            info: ColorSpec::rgb(86, 148, 159),            // Foam
            border_active: ColorSpec::rgb(144, 122, 169),
            border_normal: ColorSpec::rgb(152, 147, 165),
            highlight_bg: ColorSpec::rgb(223, 218, 217),
            highlight_fg: ColorSpec::rgb(87, 82, 121),
            footer_site: ColorSpec::rgb(40, 105, 131),
            footer_admin: ColorSpec::rgb(144, 122, 169),
            footer_typing: ColorSpec::rgb(234, 157, 52),
        }
    }

    /// Rose Pine theme.
    ///
    pub fn rose_pine() -> Self {
        Theme {
            name: "rose-pine".to_string(),
            primary: ColorSpec::rgb(196, 167, 231),
            secondary: ColorSpec::rgb(49, 116, 143),
            accent: ColorSpec::rgb(235, 188, 186),
            banner: ColorSpec::rgb(235, 111, 146),
            text: ColorSpec::rgb(224, 222, 244),
            text_secondary: ColorSpec::rgb(144, 140, 170),
            text_muted: ColorSpec::rgb(110, 106, 134),
            background: ColorSpec::rgb(25, 23, 36),
            surface: ColorSpec::rgb(31, 29, 46),
            success: ColorSpec::rgb(156, 207, 216),
            warning: ColorSpec::rgb(246, 193, 119),
            error: ColorSpec::rgb(235, 111, 146),
            info: ColorSpec::rgb(156, 207, 216),
            border_active: ColorSpec::rgb(196, 167, 231),
            border_normal: ColorSpec::rgb(110, 106, 134),
            highlight_bg: ColorSpec::rgb(64, 61, 82),
            highlight_fg: ColorSpec::rgb(224, 222, 244),
            footer_site: ColorSpec::rgb(156, 207, 216),
            footer_admin: ColorSpec::rgb(196, 167, 231),
            footer_typing: ColorSpec::rgb(246, 193, 119),
        }
    }

    /// Dracula theme.
    ///
    pub fn dracula() -> Self {
        Theme {
            name: "dracula".to_string(),
            primary: ColorSpec::rgb(189, 147, 249),
            secondary: ColorSpec::rgb(80, 250, 123),
            accent: ColorSpec::rgb(255, 121, 198),
            banner: ColorSpec::rgb(255, 121, 198),
            text: ColorSpec::rgb(248, 248, 242),
            text_secondary: ColorSpec::rgb(189, 189, 189),
            text_muted: ColorSpec::rgb(98, 114, 164),
            background: ColorSpec::rgb(40, 42, 54),
            surface: ColorSpec::rgb(68, 71, 90),
            success: ColorSpec::rgb(80, 250, 123),
            warning: ColorSpec::rgb(241, 250, 140),
            error: ColorSpec::rgb(255, 85, 85),
            info: ColorSpec::rgb(139, 233, 253),
            border_active: ColorSpec::rgb(189, 147, 249),
            border_normal: ColorSpec::rgb(98, 114, 164),
            highlight_bg: ColorSpec::rgb(68, 71, 90),
            highlight_fg: ColorSpec::rgb(248, 248, 242),
            footer_site: ColorSpec::rgb(139, 233, 253),
            footer_admin: ColorSpec::rgb(189, 147, 249),
            footer_typing: ColorSpec::rgb(241, 250, 140),
        }
    }

    /// Catppuccin Mocha theme.
    ///
    pub fn catppuccin_mocha() -> Self {
        Theme {
            name: "catppuccin-mocha".to_string(),
            primary: ColorSpec::rgb(203, 166, 247),
            secondary: ColorSpec::rgb(166, 227, 161),
            accent: ColorSpec::rgb(245, 194, 231),
            banner: ColorSpec::rgb(243, 139, 168),
            text: ColorSpec::rgb(205, 214, 244),
            text_secondary: ColorSpec::rgb(186, 194, 222),
            text_muted: ColorSpec::rgb(108, 112, 134),
            background: ColorSpec::rgb(30, 30, 46),
            surface: ColorSpec::rgb(49, 50, 68),
            success: ColorSpec::rgb(166, 227, 161),
            warning: ColorSpec::rgb(249, 226, 175),
            error: ColorSpec::rgb(243, 139, 168),
            info: ColorSpec::rgb(137, 180, 250),
            border_active: ColorSpec::rgb(203, 166, 247),
            border_normal: ColorSpec::rgb(108, 112, 134),
            highlight_bg: ColorSpec::rgb(69, 71, 90),
            highlight_fg: ColorSpec::rgb(205, 214, 244),
            footer_site: ColorSpec::rgb(137, 180, 250),
            footer_admin: ColorSpec::rgb(203, 166, 247),
            footer_typing: ColorSpec::rgb(249, 226, 175),
        }
    }

    /// Tokyo Night theme.
    ///
    pub fn tokyo_night() -> Self {
        Theme {
            name: "tokyo-night".to_string(),
            primary: ColorSpec::rgb(122, 162, 247),
            secondary: ColorSpec::rgb(158, 206, 106),
            accent: ColorSpec::rgb(187, 154, 247),
            banner: ColorSpec::rgb(247, 118, 142),
            text: ColorSpec::rgb(192, 202, 245),
            text_secondary: ColorSpec::rgb(169, 177, 214),
            text_muted: ColorSpec::rgb(86, 95, 137),
            background: ColorSpec::rgb(26, 27, 38),
            surface: ColorSpec::rgb(36, 40, 59),
            success: ColorSpec::rgb(158, 206, 106),
            warning: ColorSpec::rgb(224, 175, 104),
            error: ColorSpec::rgb(247, 118, 142),
            info: ColorSpec::rgb(125, 207, 255),
            border_active: ColorSpec::rgb(122, 162, 247),
            border_normal: ColorSpec::rgb(86, 95, 137),
            highlight_bg: ColorSpec::rgb(41, 46, 66),
            highlight_fg: ColorSpec::rgb(192, 202, 245),
            footer_site: ColorSpec::rgb(125, 207, 255),
            footer_admin: ColorSpec::rgb(187, 154, 247),
            footer_typing: ColorSpec::rgb(224, 175, 104),
        }
    }

    /// Get theme by name.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rose-pine-dawn" => Some(Self::rose_pine_dawn()),
            "rose-pine" => Some(Self::rose_pine()),
            "dracula" => Some(Self::dracula()),
            "catppuccin-mocha" => Some(Self::catppuccin_mocha()),
            "tokyo-night" => Some(Self::tokyo_night()),
            _ => None,
        }
    }

    /// Get list of all available theme names.
    ///
    pub fn available_themes() -> Vec<String> {
        vec![
            "rose-pine-dawn".to_string(),
            "rose-pine".to_string(),
            "dracula".to_string(),
            "catppuccin-mocha".to_string(),
            "tokyo-night".to_string(),
        ]
    }
}
