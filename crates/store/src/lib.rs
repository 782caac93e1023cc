//! Persisted collections backing the terminal session.
//!
//! [`KvStore`] is the storage seam: five named collections, each addressable
//! by key. [`SqliteStore`] is the on-disk backend, [`MemoryStore`] the
//! fallback when no file can be opened. [`PortfolioStore`] layers the typed
//! record helpers, backup export, and atomic import on top.

pub mod backend;
pub mod memory;
pub mod portfolio;
pub mod sqlite;

/// Storage seam and collection names.
pub use backend::{Collection, KvStore, Write};
/// In-process backend.
pub use memory::MemoryStore;
/// Typed record helpers and backup handling.
pub use portfolio::PortfolioStore;
/// SQLite-backed backend.
pub use sqlite::SqliteStore;
