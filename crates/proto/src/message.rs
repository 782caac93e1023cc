use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a terminal tab
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub String);

impl TabId {
    /// Creates a new random tab identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the raw tab identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TabId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TabId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One command/output pair in a tab's scrollback.
///
/// `input` is empty for lines that were not typed by the visitor (welcome
/// banner, async results). Entries are never edited once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandEntry {
    /// Raw text as typed.
    pub input: String,
    /// Output lines in display order.
    pub output: Vec<String>,
    /// Whether `link_url` should be rendered as a call-to-action.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub has_link: bool,
    /// External link shown under the output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
}

impl CommandEntry {
    /// Creates an entry echoing `input` followed by `output`.
    pub fn new<I, S>(input: impl Into<String>, output: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: input.into(),
            output: output.into_iter().map(Into::into).collect(),
            has_link: false,
            link_url: None,
        }
    }

    /// Creates an entry with no echoed input.
    pub fn output_only<I, S>(output: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("", output)
    }

    /// Creates a bare prompt line (Enter on empty input).
    pub fn empty_prompt() -> Self {
        Self::new("", Vec::<String>::new())
    }

    /// Attaches a flagged external link.
    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.has_link = true;
        self.link_url = Some(url.into());
        self
    }

    /// Whether the prompt line should be drawn for this entry.
    pub fn shows_prompt(&self) -> bool {
        !self.input.is_empty() || self.output.is_empty()
    }
}
