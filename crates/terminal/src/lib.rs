//! UI-agnostic terminal engine: command parsing and dispatch, tabs, recall,
//! settings, and the session that ties them to the persistent store.

pub mod command;
pub mod content;
pub mod dispatcher;
pub mod history;
pub mod output;
pub mod pending;
pub mod persist;
pub mod session;
pub mod settings;
pub mod suggestions;
pub mod tabs;

pub use command::Command;
pub use content::{
    AVAILABLE_COMMANDS, Page, RECOMMEND_URL, THEME_PRESETS, ThemeCategory, ThemePreset,
    WELCOME_MESSAGE, find_preset,
};
pub use dispatcher::{ConfirmRequest, DEFAULT_RELOAD_DELAY, Dispatcher, Outcome};
pub use history::{CommandHistory, Direction};
pub use pending::{Completion, PendingCommand};
pub use persist::SnapshotWriter;
pub use session::{Session, SessionSnapshot};
pub use settings::{MAX_FONT_SIZE, MIN_FONT_SIZE, SettingsManager};
pub use suggestions::{Suggestions, matching_commands};
pub use tabs::{Tab, TabManager};
