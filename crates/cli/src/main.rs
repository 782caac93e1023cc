//! CLI entrypoint and subcommand orchestration.

mod config;
#[cfg(test)]
mod test_support;
mod tui;

use std::io::{BufRead, Write};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use proto::CommandEntry;
use stats::NpmClient;
use store::PortfolioStore;
use terminal::{Dispatcher, Outcome, Session};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;

/// Top-level command-line arguments.
#[derive(Parser)]
#[command(name = "termfolio")]
#[command(about = "A portfolio you browse like a terminal", version)]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Enable debug logging to ~/.termfolio/logs/
    #[arg(long, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Start the full-screen terminal (default when no subcommand is given)
    Tui,

    /// Run a single command against the saved session and exit
    Run {
        /// Command line to execute, e.g. "packages"
        #[arg(short = 'e', long)]
        exec: String,

        /// Answer yes to confirmation prompts
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

const DEBUG_FILE_FILTER: &str = "debug,hyper_util=info,rustls=info,reqwest=info,sqlx=info";

#[tokio::main]
/// Program entrypoint.
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);
    let is_tui = command == Commands::Tui;

    // Console output is sunk in TUI mode so it cannot corrupt the display.
    // --debug adds a daily-rotated file under ~/.termfolio/logs/.
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    // WorkerGuard must outlive main() so buffered file writes are flushed on exit.
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>;

    let debug_writer = if cli.debug {
        let log_dir = termfolio_home().join("logs");
        std::fs::create_dir_all(&log_dir).ok();
        let appender = tracing_appender::rolling::daily(&log_dir, "debug.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        _file_guard = Some(guard);
        Some(writer)
    } else {
        _file_guard = None;
        None
    };

    let console = if is_tui {
        fmt::layer()
            .with_writer(std::io::sink)
            .with_target(false)
            .with_filter(console_filter)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(console_filter)
            .boxed()
    };
    let file = debug_writer.map(|writer| {
        fmt::layer()
            .with_writer(writer)
            .with_target(true)
            .with_ansi(false)
            .with_filter(EnvFilter::new(DEBUG_FILE_FILTER))
    });
    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .init();

    if cli.debug {
        info!(
            version = env!("CARGO_PKG_VERSION"),
            command = if is_tui { "tui" } else { "run" },
            log_level = %cli.log_level,
            "========== termfolio session start =========="
        );
    }

    let config = Config::load(cli.config.as_deref()).unwrap_or_else(|e| {
        warn!("Failed to load config ({e}), using defaults");
        Config::default()
    });

    let dispatcher = build_dispatcher(&config).await?;

    match command {
        Commands::Tui => tui::run_tui(dispatcher).await,
        Commands::Run { exec, yes } => cmd_run(dispatcher, exec, yes).await,
    }
}

fn termfolio_home() -> std::path::PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    std::path::PathBuf::from(home).join(".termfolio")
}

/// Wires the store, the npm client, and the dispatcher from config.
async fn build_dispatcher(config: &Config) -> anyhow::Result<Dispatcher> {
    let store = PortfolioStore::open_or_memory(&config.storage.url).await;

    let client = NpmClient::with_base_urls(
        config.stats.downloads_url.as_str(),
        config.stats.registry_url.as_str(),
        config.stats.timeout(),
    )?;
    debug!(
        downloads = %config.stats.downloads_url,
        packages = config.stats.packages.len(),
        "npm client ready"
    );

    Ok(Dispatcher::new(store, Arc::new(client))
        .with_packages(config.stats.packages.clone())
        .with_export_dir(&config.export.dir)
        .with_reload_delay(config.session.reload_delay())
        .with_cache_ttl(config.stats.cache_ttl())
        .with_cancel_pending(config.session.cancel_pending_on_new_command))
}

/// Executes one command line against the persisted session and prints what it
/// appended to the active tab.
async fn cmd_run(dispatcher: Dispatcher, exec: String, yes: bool) -> anyhow::Result<()> {
    let mut session = Session::restore(dispatcher.store()).await;
    let before = session.tabs().active().history.clone();

    let mut outcome = dispatcher.submit(&mut session, &exec).await;
    let mut reloading = false;
    loop {
        match outcome {
            Outcome::Done => break,
            Outcome::Confirm(request) => {
                for line in request.prompt() {
                    println!("{line}");
                }
                let confirmed = yes || read_confirmation()?;
                outcome = dispatcher
                    .resolve_clear_data(&mut session, request, confirmed)
                    .await;
            }
            Outcome::Pending(pending) => {
                if let Some(completion) = pending.wait().await {
                    session.apply_completion(completion);
                }
                break;
            }
            Outcome::Reload(_) => {
                reloading = true;
                break;
            }
        }
    }

    let after = &session.tabs().active().history;
    for entry in appended_entries(&before, after) {
        print!("{}", format_entry(entry));
    }

    if !reloading {
        let writer = dispatcher.writer();
        writer.write(&session.snapshot(), writer.generation()).await?;
    }
    Ok(())
}

fn read_confirmation() -> anyhow::Result<bool> {
    print!("> ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Entries the command added. When the history was replaced rather than
/// extended (an import), only the newest entry is reported.
fn appended_entries<'a>(before: &[CommandEntry], after: &'a [CommandEntry]) -> &'a [CommandEntry] {
    if after.len() >= before.len() && after[..before.len()] == *before {
        &after[before.len()..]
    } else if after.is_empty() {
        after
    } else {
        &after[after.len() - 1..]
    }
}

fn format_entry(entry: &CommandEntry) -> String {
    let mut text = String::new();
    if entry.shows_prompt() {
        text.push_str(&format!("➜ ~ {}\n", entry.input));
    }
    for line in &entry.output {
        text.push_str(line);
        text.push('\n');
    }
    if let Some(url) = entry.link_url.as_deref().filter(|_| entry.has_link) {
        text.push_str(&format!("🔗 {url}\n"));
    }
    text
}
