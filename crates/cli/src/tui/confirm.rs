//! Yes/no overlay for `clear-data`.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use terminal::ConfirmRequest;

use super::settings_dialog::centered;
use super::theme::Theme;

pub fn render(request: &ConfirmRequest, theme: &Theme, frame: &mut Frame<'_>, area: Rect) {
    let prompt = request.prompt();
    let popup = centered(area, 60, prompt.len() as u16 + 4);

    let mut lines: Vec<Line<'_>> = prompt.iter().map(|line| Line::from(*line)).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(theme.warning)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" confirm   "),
        Span::styled("n", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" cancel"),
    ]));

    let dialog = Paragraph::new(lines)
        .style(Style::default().fg(theme.fg).bg(theme.bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.warning))
                .title(format!(" {} ", request.input)),
        );
    frame.render_widget(Clear, popup);
    frame.render_widget(dialog, popup);
}
