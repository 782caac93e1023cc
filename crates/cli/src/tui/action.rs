//! Elm Architecture (TEA) action and effect types for the TUI.
//!
//! Key presses become [`Action`] values, `TuiApp::update()` applies them to
//! the session, and anything that has to go through the dispatcher comes back
//! as an [`Effect`] for the event loop to run.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use terminal::{ConfirmRequest, Direction};

// ─── Action ──────────────────────────────────────────────────────────────────

/// Every state mutation the TUI performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ── Prompt ───────────────────────────────────────────────
    InsertChar(char),
    /// Backspace.
    DeleteChar,
    MoveCursorLeft,
    MoveCursorRight,
    /// Enter on the prompt.
    Submit,
    /// Tab completion.
    Complete,
    /// Up/Down through the recall buffer.
    Recall(Direction),

    // ── Scrollback ───────────────────────────────────────────
    ScrollUp(u16),
    ScrollDown(u16),
    /// Ctrl+L / Ctrl+K.
    ClearScreen,

    // ── Tabs ─────────────────────────────────────────────────
    NewTab,
    CloseTab,
    NextTab,
    PreviousTab,
    /// Zero-based.
    JumpToTab(usize),

    // ── Settings dialog ──────────────────────────────────────
    ToggleSettings,
    CloseSettings,
    AdjustFontSize(i32),
    /// Moves the preset cursor by the given step.
    BrowsePreset(i32),
    ApplyPreset,
    ResetSettings,

    // ── Confirmation prompt ──────────────────────────────────
    Answer(bool),

    // ── System ───────────────────────────────────────────────
    Quit,
}

// ─── Effect ──────────────────────────────────────────────────────────────────

/// Side effects returned by `TuiApp::update()`.
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Hand the text to the dispatcher.
    Submit(String),
    /// Finish a `clear-data` with the visitor's answer.
    ResolveConfirm(ConfirmRequest, bool),
    Quit,
}

/// Which key map applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Prompt,
    Settings,
    Confirm,
}

/// Maps a key press to an action for the current mode.
pub fn action_for_key(mode: Mode, key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    // Global bindings
    match key.code {
        KeyCode::Char('c') if ctrl => return Some(Action::Quit),
        KeyCode::F(2) => return Some(Action::ToggleSettings),
        _ => {}
    }

    match mode {
        Mode::Confirm => match key.code {
            KeyCode::Char('y' | 'Y') => Some(Action::Answer(true)),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::Answer(false)),
            _ => None,
        },
        Mode::Settings => match key.code {
            KeyCode::Esc => Some(Action::CloseSettings),
            KeyCode::Char('+' | '=') => Some(Action::AdjustFontSize(1)),
            KeyCode::Char('-' | '_') => Some(Action::AdjustFontSize(-1)),
            KeyCode::Left | KeyCode::Up => Some(Action::BrowsePreset(-1)),
            KeyCode::Right | KeyCode::Down => Some(Action::BrowsePreset(1)),
            KeyCode::Enter => Some(Action::ApplyPreset),
            KeyCode::Char('r' | 'R') => Some(Action::ResetSettings),
            _ => None,
        },
        Mode::Prompt => match key.code {
            KeyCode::Char('t') if ctrl => Some(Action::NewTab),
            KeyCode::Char('w') if ctrl => Some(Action::CloseTab),
            KeyCode::Char('l' | 'k') if ctrl => Some(Action::ClearScreen),
            KeyCode::Right if alt => Some(Action::NextTab),
            KeyCode::Left if alt => Some(Action::PreviousTab),
            KeyCode::Char(c @ '1'..='9') if alt => {
                Some(Action::JumpToTab(c as usize - '1' as usize))
            }
            KeyCode::Char(_) if ctrl || alt => None,
            KeyCode::Char(c) => Some(Action::InsertChar(c)),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Left => Some(Action::MoveCursorLeft),
            KeyCode::Right => Some(Action::MoveCursorRight),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Tab => Some(Action::Complete),
            KeyCode::Up => Some(Action::Recall(Direction::Up)),
            KeyCode::Down => Some(Action::Recall(Direction::Down)),
            KeyCode::PageUp => Some(Action::ScrollUp(10)),
            KeyCode::PageDown => Some(Action::ScrollDown(10)),
            _ => None,
        },
    }
}
