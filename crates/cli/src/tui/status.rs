//! Status bar: mode, running indicator, key hints.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::action::Mode;
use super::app::TuiApp;
use super::theme::Theme;

/// Braille-pattern spinner frames.
const SPINNER: &[char] = &['⣾', '⣽', '⣻', '⢿', '⡿', '⣟', '⣯', '⣷'];

/// Key hints for `mode`.
pub fn hints(mode: Mode) -> &'static str {
    match mode {
        Mode::Prompt => {
            "Enter:run  Tab:complete  ↑↓:recall  PgUp/PgDn:scroll  ^T/^W:tab  Alt+←→:switch  F2:settings  ^C:quit"
        }
        Mode::Settings => "+/-:font  ←→:preset  Enter:apply  r:reset  Esc:close",
        Mode::Confirm => "y:confirm  n:cancel",
    }
}

pub fn render(app: &TuiApp, theme: &Theme, frame: &mut Frame<'_>, area: Rect) {
    let mut spans = Vec::new();

    if app.reloading {
        spans.push(Span::styled(
            " Reloading… ",
            Style::default()
                .fg(theme.warning)
                .add_modifier(Modifier::BOLD),
        ));
    } else if app.is_busy() {
        let spinner = SPINNER[(app.spinner_tick as usize) % SPINNER.len()];
        spans.push(Span::styled(
            format!(" {spinner} Running… "),
            Style::default().fg(theme.status_spinner),
        ));
    }

    if let Some(theme_name) = app.session.active_theme() {
        spans.push(Span::styled(
            format!(" {theme_name} "),
            Style::default().fg(theme.accent),
        ));
    }
    spans.push(Span::styled(
        format!(" {}pt ", app.session.settings().font_size),
        Style::default().fg(theme.fg_dim),
    ));
    spans.push(Span::styled(
        format!(" {}", hints(app.mode())),
        Style::default().fg(theme.status_hint),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
