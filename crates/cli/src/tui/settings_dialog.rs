//! Settings overlay: font size, color pair, and the preset gallery.

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use terminal::{MAX_FONT_SIZE, MIN_FONT_SIZE, THEME_PRESETS};

use super::app::TuiApp;
use super::theme::{Theme, parse_hex};

/// Centers a `width` x `height` box inside `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

fn swatch(color: &str) -> Span<'static> {
    match parse_hex(color) {
        Some(c) => Span::styled("  ", Style::default().bg(c)),
        None => Span::raw("  "),
    }
}

pub fn render(app: &TuiApp, theme: &Theme, frame: &mut Frame<'_>, area: Rect) {
    let settings = app.session.settings();
    let popup = centered(area, 56, 18);

    let label = Style::default().fg(theme.fg_dim);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Font size   ", label),
            Span::raw(format!(
                "{}  ({MIN_FONT_SIZE}-{MAX_FONT_SIZE})",
                settings.font_size
            )),
        ]),
        Line::from(vec![
            Span::styled("Background  ", label),
            swatch(&settings.background_color),
            Span::raw(format!(" {}", settings.background_color)),
        ]),
        Line::from(vec![
            Span::styled("Font color  ", label),
            swatch(&settings.font_color),
            Span::raw(format!(" {}", settings.font_color)),
        ]),
        Line::from(""),
        Line::from(Span::styled("Presets", label)),
    ];

    // Window of presets around the highlighted one.
    const VISIBLE: usize = 7;
    let start = app
        .preset_index
        .saturating_sub(VISIBLE / 2)
        .min(THEME_PRESETS.len().saturating_sub(VISIBLE));
    for (i, preset) in THEME_PRESETS.iter().enumerate().skip(start).take(VISIBLE) {
        let selected = i == app.preset_index;
        let active = app.session.active_theme() == Some(preset.name);
        let marker = if selected { "▶ " } else { "  " };
        let style = if selected {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, style),
            swatch(preset.background_color),
            swatch(preset.font_color),
            Span::styled(format!(" {:<18}", preset.name), style),
            Span::styled(preset.category.label(), Style::default().fg(theme.fg_dim)),
            Span::raw(if active { " *" } else { "" }),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "+/- font  ←→ preset  Enter apply  r reset  Esc close",
        Style::default().fg(theme.status_hint),
    )));

    let dialog = Paragraph::new(lines)
        .style(Style::default().fg(theme.fg).bg(theme.bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_active))
                .title(" Settings "),
        );
    frame.render_widget(Clear, popup);
    frame.render_widget(dialog, popup);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_box_is_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered(area, 56, 18);
        assert_eq!((popup.width, popup.height), (56, 18));
        assert_eq!(popup.x, 22);
        assert_eq!(popup.y, 11);
    }

    #[test]
    fn centered_box_shrinks_to_small_area() {
        let area = Rect::new(0, 0, 30, 10);
        let popup = centered(area, 56, 18);
        assert!(popup.width <= 30);
        assert!(popup.height <= 10);
    }
}
