//! TUI colors: fixed chrome from ratatui's Tailwind palette, plus the
//! visitor's background and font colors from their settings.

use proto::Settings;
use ratatui::style::Color;
use ratatui::style::palette::tailwind;

/// All visual tokens for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    // ── Surface (from settings) ──
    pub bg: Color,
    pub fg: Color,

    // ── Chrome ──
    pub fg_dim: Color,
    pub border: Color,
    pub border_active: Color,

    // ── Prompt ──
    /// The `➜` arrow.
    pub prompt_arrow: Color,
    /// The `~` directory marker.
    pub prompt_dir: Color,
    pub link: Color,

    // ── Tab bar ──
    pub tab_active_bg: Color,
    pub tab_active_fg: Color,
    pub tab_inactive_fg: Color,

    // ── Semantic ──
    pub warning: Color,
    pub accent: Color,

    // ── Status bar ──
    pub status_hint: Color,
    pub status_spinner: Color,
}

impl Theme {
    pub const fn default_dark() -> Self {
        Self {
            bg: tailwind::SLATE.c950,
            fg: tailwind::SLATE.c200,

            fg_dim: tailwind::SLATE.c500,
            border: tailwind::SLATE.c700,
            border_active: tailwind::EMERALD.c500,

            prompt_arrow: tailwind::GREEN.c400,
            prompt_dir: tailwind::BLUE.c400,
            link: tailwind::SKY.c400,

            tab_active_bg: tailwind::SLATE.c700,
            tab_active_fg: tailwind::SLATE.c100,
            tab_inactive_fg: tailwind::SLATE.c400,

            warning: tailwind::AMBER.c400,
            accent: tailwind::EMERALD.c400,

            status_hint: tailwind::SLATE.c500,
            status_spinner: tailwind::AMBER.c400,
        }
    }

    /// The dark theme with the surface colors taken from `settings`.
    /// Unparseable colors keep the default.
    pub fn from_settings(settings: &Settings) -> Self {
        let base = Self::default_dark();
        Self {
            bg: parse_hex(&settings.background_color).unwrap_or(base.bg),
            fg: parse_hex(&settings.font_color).unwrap_or(base.fg),
            ..base
        }
    }
}

/// Parses `#rrggbb` or `#rgb`.
pub fn parse_hex(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some(Color::Rgb(short(0)?, short(1)?, short(2)?))
        }
        _ => None,
    }
}
