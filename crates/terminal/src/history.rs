//! Up/Down recall over previously entered commands.

/// Direction of a recall step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Append-only list of submitted commands with a navigation cursor.
///
/// The cursor is `None` while the visitor is not walking the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandHistory {
    commands: Vec<String>,
    cursor: Option<usize>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the buffer from a persisted list.
    pub fn from_commands(commands: Vec<String>) -> Self {
        Self {
            commands,
            cursor: None,
        }
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Appends `command` and stops navigating.
    pub fn add(&mut self, command: impl Into<String>) {
        self.commands.push(command.into());
        self.cursor = None;
    }

    /// Steps through the buffer.
    ///
    /// `Up` starts at the newest entry and stops at the oldest. `Down` is a
    /// no-op (`None`) unless navigating; stepping past the newest entry
    /// yields an empty string and stops navigating.
    pub fn navigate(&mut self, direction: Direction) -> Option<String> {
        if self.commands.is_empty() {
            return None;
        }

        match direction {
            Direction::Up => {
                let index = match self.cursor {
                    None => self.commands.len() - 1,
                    Some(i) => i.saturating_sub(1),
                };
                self.cursor = Some(index);
                Some(self.commands[index].clone())
            }
            Direction::Down => {
                let next = self.cursor? + 1;
                if next >= self.commands.len() {
                    self.cursor = None;
                    return Some(String::new());
                }
                self.cursor = Some(next);
                Some(self.commands[next].clone())
            }
        }
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }
}
