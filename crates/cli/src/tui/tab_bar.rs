//! One-line tab strip.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::app::TuiApp;
use super::theme::Theme;

pub fn render(app: &TuiApp, theme: &Theme, frame: &mut Frame<'_>, area: Rect) {
    let tabs = app.session.tabs();
    let active = tabs.active_id();

    let mut spans = vec![Span::styled(
        " termfolio ",
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )];
    for (i, tab) in tabs.tabs().iter().enumerate() {
        let busy = if app.session.has_pending(&tab.id) {
            "…"
        } else {
            ""
        };
        let label = format!(" {}:{}{busy} ", i + 1, tab.title);
        let style = if &tab.id == active {
            Style::default()
                .bg(theme.tab_active_bg)
                .fg(theme.tab_active_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.tab_inactive_fg)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
