use ratatui::style::Color;

use crate::model::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    /// Selected row, active tab and prompt labels
    pub accent: Color,
    /// Text drawn on top of `accent`
    pub on_accent: Color,
    pub dim: Color,
    /// Overdue tasks and error messages
    pub red: Color,
    pub green: Color,
    pub footer: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Reset,
            text: Color::Rgb(0xE4, 0xE4, 0xE4),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            accent: Color::Rgb(0x94, 0xB4, 0xC1),
            on_accent: Color::Rgb(0x21, 0x34, 0x48),
            dim: Color::Rgb(0x80, 0x80, 0x80),
            red: Color::Rgb(0xF3, 0x9E, 0xB6),
            green: Color::Rgb(0x9E, 0xD2, 0xA6),
            footer: Color::Rgb(0xEA, 0xE0, 0xCF),
        }
    }
}

/// Parse a hex color string like "#F39EB6" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from the `[ui]` config section, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(key = %key, value = %value, "ignoring invalid color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "accent" => theme.accent = color,
                "on_accent" => theme.on_accent = color,
                "dim" => theme.dim = color,
                "red" => theme.red = color,
                "green" => theme.green = color,
                "footer" => theme.footer = color,
                _ => tracing::warn!(key = %key, "unknown color key"),
            }
        }

        theme
    }
}
