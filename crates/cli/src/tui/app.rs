//! TUI application state and input handling.

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::Style,
    widgets::Block,
};
use terminal::{ConfirmRequest, Session, Suggestions, THEME_PRESETS};

use super::action::{Action, Effect, Mode, action_for_key};
use super::theme::Theme;
use super::{confirm, scrollback, settings_dialog, status, tab_bar};

// ─── TuiApp ──────────────────────────────────────────────────

/// Full state for the TUI.
pub struct TuiApp {
    pub session: Session,
    /// Cursor position within the active tab's input (byte offset).
    pub cursor_pos: usize,
    /// Lines scrolled back from the bottom of the scrollback.
    pub scroll_back: u16,
    /// A `clear-data` waiting for y/n.
    pub confirm: Option<ConfirmRequest>,
    /// Highlighted preset in the settings dialog.
    pub preset_index: usize,
    /// Set between a confirmed `clear-data` and the reload.
    pub reloading: bool,
    /// Spinner animation tick counter.
    pub spinner_tick: u8,
    pub should_quit: bool,
    suggestions: Suggestions,
}

impl TuiApp {
    pub fn new(session: Session) -> Self {
        let mut app = Self {
            session,
            cursor_pos: 0,
            scroll_back: 0,
            confirm: None,
            preset_index: 0,
            reloading: false,
            spinner_tick: 0,
            should_quit: false,
            suggestions: Suggestions::new(),
        };
        app.cursor_to_end();
        app
    }

    /// Swaps in a freshly restored session.
    pub fn replace_session(&mut self, session: Session) {
        self.session.replace(session);
        self.confirm = None;
        self.reloading = false;
        self.scroll_back = 0;
        self.suggestions.reset();
        self.cursor_to_end();
    }

    pub fn input(&self) -> &str {
        &self.session.tabs().active().current_input
    }

    fn set_input(&mut self, text: impl Into<String>) {
        let id = self.session.active_tab_id();
        self.session.tabs_mut().update_input(&id, text);
        self.cursor_to_end();
    }

    fn cursor_to_end(&mut self) {
        self.cursor_pos = self.input().len();
    }

    /// Re-syncs view state after the dispatcher touched the session.
    pub fn after_dispatch(&mut self) {
        self.scroll_back = 0;
        self.cursor_to_end();
    }

    pub fn mode(&self) -> Mode {
        if self.confirm.is_some() {
            Mode::Confirm
        } else if self.session.settings_visible() {
            Mode::Settings
        } else {
            Mode::Prompt
        }
    }

    /// Whether the active tab is waiting on a background command.
    pub fn is_busy(&self) -> bool {
        self.session.has_pending(&self.session.active_tab_id())
    }

    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent) -> Effect {
        match action_for_key(self.mode(), key) {
            Some(action) => self.update(action),
            None => Effect::None,
        }
    }

    /// Applies one action. The only place actions are matched.
    pub fn update(&mut self, action: Action) -> Effect {
        self.cursor_pos = self.cursor_pos.min(self.input().len());
        match action {
            // ── Prompt ──
            Action::InsertChar(c) => {
                let mut text = self.input().to_string();
                text.insert(self.cursor_pos, c);
                let cursor = self.cursor_pos + c.len_utf8();
                self.set_input(text);
                self.cursor_pos = cursor;
            }
            Action::DeleteChar => {
                if self.cursor_pos > 0 {
                    let mut text = self.input().to_string();
                    let prev = text[..self.cursor_pos]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                    text.drain(prev..self.cursor_pos);
                    self.set_input(text);
                    self.cursor_pos = prev;
                }
            }
            Action::MoveCursorLeft => {
                self.cursor_pos = self.input()[..self.cursor_pos]
                    .char_indices()
                    .last()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
            }
            Action::MoveCursorRight => {
                let input = self.input();
                if self.cursor_pos < input.len() {
                    self.cursor_pos = input[self.cursor_pos..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor_pos + i)
                        .unwrap_or(input.len());
                }
            }
            Action::Submit => {
                if self.reloading {
                    return Effect::None;
                }
                let text = self.input().to_string();
                self.cursor_pos = 0;
                self.scroll_back = 0;
                self.suggestions.reset();
                return Effect::Submit(text);
            }
            Action::Complete => {
                let input = self.input().to_string();
                if let Some(completion) = self.suggestions.complete(&input) {
                    self.set_input(completion);
                }
            }
            Action::Recall(direction) => {
                if let Some(command) = self.session.recall_mut().navigate(direction) {
                    self.set_input(command);
                }
            }

            // ── Scrollback ──
            Action::ScrollUp(n) => self.scroll_back = self.scroll_back.saturating_add(n),
            Action::ScrollDown(n) => self.scroll_back = self.scroll_back.saturating_sub(n),
            Action::ClearScreen => {
                let id = self.session.active_tab_id();
                self.session.tabs_mut().update_history(&id, Vec::new());
                self.scroll_back = 0;
            }

            // ── Tabs ──
            Action::NewTab => {
                self.session.tabs_mut().add();
                self.on_tab_changed();
            }
            Action::CloseTab => {
                let id = self.session.active_tab_id();
                if self.session.close_tab(&id) {
                    self.on_tab_changed();
                }
            }
            Action::NextTab => {
                self.session.tabs_mut().next();
                self.on_tab_changed();
            }
            Action::PreviousTab => {
                self.session.tabs_mut().previous();
                self.on_tab_changed();
            }
            Action::JumpToTab(index) => {
                if self.session.tabs_mut().switch_index(index) {
                    self.on_tab_changed();
                }
            }

            // ── Settings dialog ──
            Action::ToggleSettings => {
                if self.session.toggle_settings() {
                    self.preset_index = self
                        .session
                        .active_theme()
                        .and_then(|name| THEME_PRESETS.iter().position(|p| p.name == name))
                        .unwrap_or(0);
                }
            }
            Action::CloseSettings => self.session.set_settings_visible(false),
            Action::AdjustFontSize(delta) => {
                self.session.adjust_font_size(delta);
            }
            Action::BrowsePreset(step) => {
                let len = THEME_PRESETS.len() as i32;
                self.preset_index = (self.preset_index as i32 + step).rem_euclid(len) as usize;
            }
            Action::ApplyPreset => {
                if let Some(preset) = THEME_PRESETS.get(self.preset_index) {
                    self.session.apply_theme(preset);
                }
            }
            Action::ResetSettings => {
                self.session.reset_settings();
            }

            // ── Confirmation ──
            Action::Answer(confirmed) => {
                if let Some(request) = self.confirm.take() {
                    return Effect::ResolveConfirm(request, confirmed);
                }
            }

            // ── System ──
            Action::Quit => {
                self.should_quit = true;
                return Effect::Quit;
            }
        }
        Effect::None
    }

    fn on_tab_changed(&mut self) {
        self.scroll_back = 0;
        self.suggestions.reset();
        self.session.recall_mut().reset_cursor();
        self.cursor_to_end();
    }

    // ── Rendering ────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame<'_>) {
        let theme = Theme::from_settings(self.session.settings());
        let area = frame.area();
        frame.render_widget(
            Block::default().style(Style::default().bg(theme.bg).fg(theme.fg)),
            area,
        );

        // Layout: tabs(1) | scrollback(fill) | status(1) | prompt(3)
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

        tab_bar::render(self, &theme, frame, chunks[0]);
        scrollback::render_history(self, &theme, frame, chunks[1]);
        status::render(self, &theme, frame, chunks[2]);
        scrollback::render_prompt(self, &theme, frame, chunks[3]);

        if self.session.settings_visible() {
            settings_dialog::render(self, &theme, frame, area);
        }
        if let Some(request) = &self.confirm {
            confirm::render(request, &theme, frame, area);
        }
    }
}
