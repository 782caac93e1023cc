//! Scrollback of the active tab and the prompt line below it.

use proto::CommandEntry;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::app::TuiApp;
use super::theme::Theme;

pub const PROMPT_ARROW: &str = "➜";
pub const PROMPT_DIR: &str = "~";

fn prompt_spans<'a>(theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::styled(PROMPT_ARROW, Style::default().fg(theme.prompt_arrow)),
        Span::raw(" "),
        Span::styled(PROMPT_DIR, Style::default().fg(theme.prompt_dir)),
        Span::raw(" "),
    ]
}

/// Lines for one scrollback entry, followed by a blank separator.
pub fn entry_lines<'a>(entry: &'a CommandEntry, theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = Vec::with_capacity(entry.output.len() + 2);
    if entry.shows_prompt() {
        let mut spans = prompt_spans(theme);
        spans.push(Span::raw(entry.input.as_str()));
        lines.push(Line::from(spans));
    }
    lines.extend(entry.output.iter().map(|line| Line::from(line.as_str())));
    if let Some(url) = entry.link_url.as_deref().filter(|_| entry.has_link) {
        lines.push(Line::from(Span::styled(
            format!("🔗 Write Recommendation on LinkedIn → {url}"),
            Style::default()
                .fg(theme.link)
                .add_modifier(Modifier::UNDERLINED),
        )));
    }
    lines.push(Line::from(""));
    lines
}

/// First visible line so that `scroll_back` lines are hidden below.
pub fn scroll_offset(total: usize, height: usize, scroll_back: u16) -> u16 {
    let max_scroll = total.saturating_sub(height);
    let back = (scroll_back as usize).min(max_scroll);
    (max_scroll - back).min(u16::MAX as usize) as u16
}

pub fn render_history(app: &TuiApp, theme: &Theme, frame: &mut Frame<'_>, area: Rect) {
    let tab = app.session.tabs().active();
    let lines: Vec<Line<'_>> = tab
        .history
        .iter()
        .flat_map(|entry| entry_lines(entry, theme))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(format!(" {} ", tab.title));
    let inner_height = block.inner(area).height as usize;
    let offset = scroll_offset(lines.len(), inner_height, app.scroll_back);

    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(theme.fg).bg(theme.bg))
        .block(block)
        .scroll((offset, 0));
    frame.render_widget(paragraph, area);
}

pub fn render_prompt(app: &TuiApp, theme: &Theme, frame: &mut Frame<'_>, area: Rect) {
    let input = app.input();
    let mut spans = prompt_spans(theme);
    spans.push(Span::raw(input));

    let accepts_input = !app.reloading && app.confirm.is_none() && !app.session.settings_visible();
    let border = if accepts_input {
        theme.border_active
    } else {
        theme.border
    };
    let prompt = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(theme.fg).bg(theme.bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
    frame.render_widget(prompt, area);

    if accepts_input {
        let prefix = format!("{PROMPT_ARROW} {PROMPT_DIR} ");
        let cursor_col = UnicodeWidthStr::width(prefix.as_str())
            + UnicodeWidthStr::width(&input[..app.cursor_pos.min(input.len())]);
        frame.set_cursor_position((area.x + 1 + cursor_col as u16, area.y + 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_follows_bottom_until_scrolled_back() {
        assert_eq!(scroll_offset(100, 20, 0), 80);
        assert_eq!(scroll_offset(100, 20, 30), 50);
        assert_eq!(scroll_offset(100, 20, 500), 0);
        assert_eq!(scroll_offset(5, 20, 3), 0);
    }

    #[test]
    fn entry_lines_show_prompt_output_and_link() {
        let theme = Theme::default_dark();
        let entry =
            CommandEntry::new("recommend", ["Thanks!"]).with_link("https://example.com/r");
        let lines = entry_lines(&entry, &theme);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].to_string().ends_with("recommend"));
        assert_eq!(lines[1].to_string(), "Thanks!");
        assert!(lines[2].to_string().contains("https://example.com/r"));
        assert_eq!(lines[3].to_string(), "");
    }

    #[test]
    fn output_only_entries_have_no_prompt_line() {
        let theme = Theme::default_dark();
        let entry = CommandEntry::output_only(["Welcome"]);
        let lines = entry_lines(&entry, &theme);
        assert_eq!(lines[0].to_string(), "Welcome");
    }
}
