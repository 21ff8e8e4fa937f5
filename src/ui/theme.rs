//! Light and dark palettes for the TUI
//!
//! Color palette and style helpers. The palette follows the persisted
//! dark-mode flag.

use ratatui::style::{Color, Modifier, Style};

use crate::theme::ThemePreference;

/// Color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub background_light: Color,
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub text: Color,
    pub dim: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub favorite: Color,
    pub border: Color,
}

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // PALETTES
    // ═══════════════════════════════════════════════════════════════════════

    /// Dark palette: soft white on near-black, TMDB teal accents
    pub const fn dark() -> Self {
        Self {
            background: Color::Rgb(0x0d, 0x11, 0x17),
            background_light: Color::Rgb(0x1b, 0x22, 0x2c),
            primary: Color::Rgb(0x01, 0xb4, 0xe4),
            secondary: Color::Rgb(0x90, 0xce, 0xa1),
            accent: Color::Rgb(0xf5, 0xc5, 0x18),
            text: Color::Rgb(0xe6, 0xe6, 0xe6),
            dim: Color::Rgb(0x8b, 0x94, 0x9e),
            success: Color::Rgb(0x3f, 0xb9, 0x50),
            warning: Color::Rgb(0xd2, 0x99, 0x22),
            error: Color::Rgb(0xf8, 0x51, 0x49),
            favorite: Color::Rgb(0xff, 0x5c, 0x7a),
            border: Color::Rgb(0x30, 0x36, 0x3d),
        }
    }

    /// Light palette: near-black on white, darker accents
    pub const fn light() -> Self {
        Self {
            background: Color::Rgb(0xff, 0xff, 0xff),
            background_light: Color::Rgb(0xf0, 0xf2, 0xf5),
            primary: Color::Rgb(0x03, 0x25, 0x41),
            secondary: Color::Rgb(0x0b, 0x6e, 0x4f),
            accent: Color::Rgb(0x9a, 0x67, 0x00),
            text: Color::Rgb(0x1f, 0x23, 0x28),
            dim: Color::Rgb(0x57, 0x60, 0x6a),
            success: Color::Rgb(0x1a, 0x7f, 0x37),
            warning: Color::Rgb(0x9a, 0x67, 0x00),
            error: Color::Rgb(0xcf, 0x22, 0x2e),
            favorite: Color::Rgb(0xc2, 0x18, 0x51),
            border: Color::Rgb(0xd0, 0xd7, 0xde),
        }
    }

    pub fn for_preference(pref: ThemePreference) -> Self {
        if pref.is_dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    /// Highlighted text (inverted with primary color)
    pub fn highlighted(&self) -> Style {
        Style::default()
            .fg(self.background)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Dimmed/muted text
    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    /// Title/header style
    pub fn title(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn secondary_style(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    /// Search input field
    pub fn input(&self) -> Style {
        Style::default().fg(self.text).bg(self.background_light)
    }

    /// Keybinding hint style
    pub fn keybind(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn status_bar(&self) -> Style {
        Style::default().fg(self.text).bg(self.background_light)
    }

    /// Loading/spinner indicator
    pub fn loading(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    /// Heart marker for favorites
    pub fn favorite_style(&self) -> Style {
        Style::default().fg(self.favorite).add_modifier(Modifier::BOLD)
    }

    /// Year/date metadata
    pub fn year(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    /// Vote average: green from 7, amber from 5, dim below
    pub fn rating(&self, vote_average: f64) -> Style {
        if vote_average >= 7.0 {
            Style::default().fg(self.success)
        } else if vote_average >= 5.0 {
            Style::default().fg(self.warning)
        } else {
            self.dimmed()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COLOR UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Calculate relative luminance for a color (used in contrast ratio)
/// Formula: https://www.w3.org/TR/WCAG20/#relativeluminancedef
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel_luminance(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel_luminance(r) + 0.7152 * channel_luminance(g) + 0.0722 * channel_luminance(b)
}

/// Calculate contrast ratio between two colors
/// Returns a value between 1 (same color) and 21 (black/white)
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);

    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };

    (lighter + 0.05) / (darker + 0.05)
}

/// Check if a foreground/background pair meets WCAG AA for normal text
pub fn meets_wcag_aa(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 4.5
}

/// Check if a foreground/background pair meets WCAG AA for large text
pub fn meets_wcag_aa_large(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 3.0
}

/// Extract RGB tuple from ratatui Color (only works for Rgb variant)
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}
