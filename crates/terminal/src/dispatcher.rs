//! Resolves submitted prompt text into scrollback entries and side effects.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use proto::{
    BackupData, CommandEntry, CommandError, ExportError, ImportError, PackageStats, TabId,
    now_millis,
};
use stats::{MY_PACKAGES, RegistrySource, fetch_all_packages_info, fetch_all_packages_report};
use store::PortfolioStore;
use tracing::{debug, info, warn};

use crate::command::Command;
use crate::content::{Page, RECOMMEND_URL, find_preset};
use crate::output;
use crate::pending::PendingCommand;
use crate::persist::SnapshotWriter;
use crate::session::Session;

pub const DEFAULT_RELOAD_DELAY: Duration = Duration::from_secs(2);
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// What the caller must do after a command was handled.
#[derive(Debug)]
pub enum Outcome {
    /// Nothing further.
    Done,
    /// Ask the visitor, then call [`Dispatcher::resolve_clear_data`].
    Confirm(ConfirmRequest),
    /// Output will arrive later; await it and hand it to
    /// [`Session::apply_completion`].
    Pending(PendingCommand),
    /// Rebuild the session from the store after the delay.
    Reload(Duration),
}

/// A `clear-data` waiting for a yes/no answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub tab_id: TabId,
    pub input: String,
}

impl ConfirmRequest {
    pub fn prompt(&self) -> &'static [&'static str] {
        output::CLEAR_DATA_PROMPT
    }
}

struct CachedStats {
    fetched_at: Instant,
    stats: Vec<PackageStats>,
}

pub struct Dispatcher {
    writer: SnapshotWriter,
    source: Arc<dyn RegistrySource>,
    packages: Arc<Vec<String>>,
    export_dir: PathBuf,
    reload_delay: Duration,
    cache_ttl: Duration,
    cache: Arc<Mutex<Option<CachedStats>>>,
    cancel_pending_on_new_command: bool,
    next_id: AtomicU64,
}

impl Dispatcher {
    pub fn new(store: PortfolioStore, source: Arc<dyn RegistrySource>) -> Self {
        Self {
            writer: SnapshotWriter::new(store),
            source,
            packages: Arc::new(MY_PACKAGES.iter().map(|p| p.to_string()).collect()),
            export_dir: PathBuf::from("."),
            reload_delay: DEFAULT_RELOAD_DELAY,
            cache_ttl: DEFAULT_CACHE_TTL,
            cache: Arc::new(Mutex::new(None)),
            cancel_pending_on_new_command: true,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn with_packages(mut self, packages: Vec<String>) -> Self {
        self.packages = Arc::new(packages);
        self
    }

    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    pub fn with_reload_delay(mut self, delay: Duration) -> Self {
        self.reload_delay = delay;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_cancel_pending(mut self, cancel: bool) -> Self {
        self.cancel_pending_on_new_command = cancel;
        self
    }

    pub fn store(&self) -> &PortfolioStore {
        self.writer.store()
    }

    /// Handle for background snapshot writes.
    pub fn writer(&self) -> &SnapshotWriter {
        &self.writer
    }

    /// Handles text submitted on the active tab's prompt.
    pub async fn submit(&self, session: &mut Session, raw: &str) -> Outcome {
        let tab_id = session.active_tab_id();
        session.tabs_mut().update_input(&tab_id, "");

        let command = Command::parse(raw);
        if command == Command::Empty {
            session.tabs_mut().append(&tab_id, CommandEntry::empty_prompt());
            return Outcome::Done;
        }

        let input = raw.trim();
        session.record_command(input);
        if self.cancel_pending_on_new_command {
            session.cancel_pending(&tab_id);
        }
        debug!(tab = %tab_id, ?command, "Dispatching command");
        self.execute(session, &tab_id, input, command).await
    }

    async fn execute(
        &self,
        session: &mut Session,
        tab_id: &TabId,
        input: &str,
        command: Command,
    ) -> Outcome {
        let entry = match command {
            Command::Empty => CommandEntry::empty_prompt(),
            Command::Clear => {
                session.tabs_mut().update_history(tab_id, Vec::new());
                return Outcome::Done;
            }
            Command::Settings => {
                let message = if session.toggle_settings() {
                    "Settings dialog opened."
                } else {
                    "Settings dialog closed."
                };
                CommandEntry::new(input, [message])
            }
            Command::ClearData => {
                return Outcome::Confirm(ConfirmRequest {
                    tab_id: tab_id.clone(),
                    input: input.to_string(),
                });
            }
            Command::ExportData => match self.export_data().await {
                Ok(path) => CommandEntry::new(input, output::exported(&path)),
                Err(e) => {
                    let entry =
                        CommandEntry::new(input, output::failure("❌ Error exporting data:", &e));
                    log_failure(input, e);
                    entry
                }
            },
            Command::ImportData(None) => CommandEntry::new(input, output::import_usage()),
            Command::ImportData(Some(path)) => {
                return self.import_data(session, tab_id, input, &path).await;
            }
            Command::Packages { refresh } => {
                session
                    .tabs_mut()
                    .append(tab_id, CommandEntry::new(input, [output::FETCHING_STATS]));
                return self.track(session, self.spawn_stats(tab_id.clone(), refresh));
            }
            Command::PackagesInfo => {
                session
                    .tabs_mut()
                    .append(tab_id, CommandEntry::new(input, [output::FETCHING_INFO]));
                return self.track(session, self.spawn_info(tab_id.clone()));
            }
            Command::Theme(None) => {
                CommandEntry::new(input, output::theme_list(session.active_theme()))
            }
            Command::Theme(Some(name)) => match find_preset(&name) {
                Some(preset) => {
                    session.apply_theme(preset);
                    CommandEntry::new(input, [format!("Theme set to {}.", preset.name)])
                }
                None => CommandEntry::new(
                    input,
                    [
                        format!("Unknown theme: {name}"),
                        "Type 'theme' to list available themes.".to_string(),
                    ],
                ),
            },
            Command::Page(Page::Recommend) => {
                CommandEntry::new(input, Page::Recommend.lines().iter().copied())
                    .with_link(RECOMMEND_URL)
            }
            Command::Page(page) => CommandEntry::new(input, page.lines().iter().copied()),
            Command::Unknown(raw) => CommandEntry::new(input, output::not_found(&raw)),
        };

        session.tabs_mut().append(tab_id, entry);
        Outcome::Done
    }

    fn track(&self, session: &mut Session, pending: PendingCommand) -> Outcome {
        session.track_pending(pending.tab_id.clone(), pending.id, pending.abort_handle());
        Outcome::Pending(pending)
    }

    /// Completes a `clear-data` once the visitor has answered.
    pub async fn resolve_clear_data(
        &self,
        session: &mut Session,
        request: ConfirmRequest,
        confirmed: bool,
    ) -> Outcome {
        let ConfirmRequest { tab_id, input } = request;
        if !confirmed {
            log_failure(&input, CommandError::Declined);
            session
                .tabs_mut()
                .append(&tab_id, CommandEntry::new(input, ["❌ Clear data cancelled."]));
            return Outcome::Done;
        }

        let result = {
            let _replace = self.writer.begin_replace().await;
            self.store().clear_all().await
        };
        match result {
            Ok(()) => {
                *self.cache.lock() = None;
                session.tabs_mut().append(
                    &tab_id,
                    CommandEntry::new(input, output::cleared(self.reload_delay.as_secs())),
                );
                Outcome::Reload(self.reload_delay)
            }
            Err(e) => {
                let entry =
                    CommandEntry::new(input.as_str(), output::failure("❌ Error clearing data:", &e));
                log_failure(&input, e);
                session.tabs_mut().append(&tab_id, entry);
                Outcome::Done
            }
        }
    }

    async fn export_data(&self) -> Result<PathBuf, ExportError> {
        let backup = self.store().export_all().await?;
        let text = serde_json::to_string_pretty(&backup)
            .map_err(|e| ExportError::Serialization(e.to_string()))?;

        tokio::fs::create_dir_all(&self.export_dir).await?;
        let path = self.export_dir.join(BackupData::file_name(now_millis()));
        tokio::fs::write(&path, text).await?;
        info!("Backup exported to {}", path.display());
        Ok(path)
    }

    async fn import_data(
        &self,
        session: &mut Session,
        tab_id: &TabId,
        input: &str,
        path: &str,
    ) -> Outcome {
        match self.import_file(Path::new(path)).await {
            Ok(collections) => {
                session.replace(Session::restore(self.store()).await);
                session.push_entry(CommandEntry::new(
                    input,
                    output::imported(path, collections),
                ));
            }
            Err(e) => {
                let entry =
                    CommandEntry::new(input, output::failure("❌ Error importing data:", &e));
                log_failure(input, e);
                session.tabs_mut().append(tab_id, entry);
            }
        }
        Outcome::Done
    }

    async fn import_file(&self, path: &Path) -> Result<usize, ImportError> {
        let text = tokio::fs::read_to_string(path).await?;
        let backup = PortfolioStore::parse_backup(&text)?;
        let _replace = self.writer.begin_replace().await;
        self.store().import_all(&backup).await
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn spawn_stats(&self, tab_id: TabId, refresh: bool) -> PendingCommand {
        let source = Arc::clone(&self.source);
        let packages = Arc::clone(&self.packages);
        let cache = Arc::clone(&self.cache);
        let ttl = self.cache_ttl;

        let handle = tokio::spawn(async move {
            if packages.is_empty() {
                return CommandEntry::output_only(output::no_packages());
            }

            let cached = if refresh {
                None
            } else {
                cache
                    .lock()
                    .as_ref()
                    .filter(|c| c.fetched_at.elapsed() < ttl)
                    .map(|c| c.stats.clone())
            };
            if let Some(stats) = cached {
                debug!("Serving package statistics from cache");
                return CommandEntry::output_only(output::package_stats(&stats));
            }

            let report = fetch_all_packages_report(source.as_ref(), &packages).await;
            if report.all_failed() {
                return CommandEntry::output_only([output::STATS_FAILED]);
            }
            let stats = report.stats;

            *cache.lock() = Some(CachedStats {
                fetched_at: Instant::now(),
                stats: stats.clone(),
            });
            CommandEntry::output_only(output::package_stats(&stats))
        });
        PendingCommand::new(self.next_id(), tab_id, handle)
    }

    fn spawn_info(&self, tab_id: TabId) -> PendingCommand {
        let source = Arc::clone(&self.source);
        let packages = Arc::clone(&self.packages);

        let handle = tokio::spawn(async move {
            if packages.is_empty() {
                return CommandEntry::output_only(output::no_packages());
            }
            let infos = fetch_all_packages_info(source.as_ref(), &packages).await;
            CommandEntry::output_only(output::package_infos(&infos))
        });
        PendingCommand::new(self.next_id(), tab_id, handle)
    }
}

/// Logs a command that did not run to completion. A declined prompt is not a
/// fault.
fn log_failure(input: &str, err: impl Into<proto::Error>) {
    match err.into() {
        proto::Error::Command(e) => debug!("{input}: {e}"),
        e => warn!("{input}: {e}"),
    }
}
