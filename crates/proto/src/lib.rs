//! Shared data types for the termfolio workspace.
//!
//! This crate defines the serializable records (settings, scrollback entries,
//! tabs, backups, package statistics) and the strongly-typed error enums that
//! the store, stats client, and terminal engine exchange.

pub mod error;
pub mod message;
pub mod record;
pub mod settings;
pub mod stats;

/// Re-export of all error types.
pub use error::*;
/// Re-export of scrollback and tab identity types.
pub use message::{CommandEntry, TabId};
/// Re-export of persisted collection record shapes.
pub use record::{
    BackupData, CommandHistoryRecord, StoredTab, TabHistoryRecord, TabsRecord, ThemeRecord,
    now_millis,
};
/// Re-export of terminal appearance settings.
pub use settings::{Settings, SettingsPatch};
/// Re-export of npm statistics types.
pub use stats::{DownloadTotals, PackageInfo, PackageStats, Period};
