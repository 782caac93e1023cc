use crate::content::AVAILABLE_COMMANDS;

/// Tab completion over [`AVAILABLE_COMMANDS`].
///
/// Matches are computed from the text the visitor typed. Pressing Tab again
/// while the input still holds the last offered completion moves to the next
/// match instead of re-matching against the completion itself.
#[derive(Debug, Default)]
pub struct Suggestions {
    matches: Vec<&'static str>,
    index: usize,
    offered: Option<&'static str>,
}

/// Commands starting with the lowercased `input`; blank input matches nothing.
pub fn matching_commands(input: &str) -> Vec<&'static str> {
    if input.trim().is_empty() {
        return Vec::new();
    }
    let prefix = input.to_lowercase();
    AVAILABLE_COMMANDS
        .iter()
        .copied()
        .filter(|command| command.starts_with(&prefix))
        .collect()
}

impl Suggestions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next completion for `input`, cycling through the matches.
    pub fn complete(&mut self, input: &str) -> Option<&'static str> {
        if self.offered != Some(input) {
            self.matches = matching_commands(input);
            self.index = 0;
        }
        if self.matches.is_empty() {
            self.offered = None;
            return None;
        }

        let suggestion = self.matches[self.index];
        self.index = (self.index + 1) % self.matches.len();
        self.offered = Some(suggestion);
        Some(suggestion)
    }

    /// Forgets the current cycle.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
