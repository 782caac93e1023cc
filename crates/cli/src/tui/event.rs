//! Async event loop for the TUI: interleaves crossterm input, background
//! command completions, the reload timer, and snapshot persistence.

use std::time::Duration;

use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use terminal::{Completion, Dispatcher, Outcome, PendingCommand, Session};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::action::Effect;
use super::app::TuiApp;

/// RAII guard that restores the terminal on drop (even on panic).
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
    }
}

/// Drives one [`Outcome`] into the app. Returns the reload deadline, if any.
fn apply_outcome(
    app: &mut TuiApp,
    outcome: Outcome,
    completions: &mpsc::Sender<Completion>,
) -> Option<Instant> {
    app.after_dispatch();
    match outcome {
        Outcome::Done => None,
        Outcome::Confirm(request) => {
            app.confirm = Some(request);
            None
        }
        Outcome::Pending(pending) => {
            forward_completion(pending, completions.clone());
            None
        }
        Outcome::Reload(delay) => {
            app.reloading = true;
            Some(Instant::now() + delay)
        }
    }
}

fn forward_completion(pending: PendingCommand, tx: mpsc::Sender<Completion>) {
    tokio::spawn(async move {
        if let Some(completion) = pending.wait().await {
            let _ = tx.send(completion).await;
        }
    });
}

/// Writes a snapshot in the background if the session changed since the
/// last one.
fn persist_if_changed(app: &TuiApp, dispatcher: &Dispatcher, last_revision: &mut u64) {
    let revision = app.session.revision();
    if app.reloading || revision == *last_revision {
        return;
    }
    *last_revision = revision;

    let writer = dispatcher.writer().clone();
    let generation = writer.generation();
    let snapshot = app.session.snapshot();
    tokio::spawn(async move {
        match writer.write(&snapshot, generation).await {
            Ok(written) => debug!(revision, written, "Session snapshot"),
            Err(e) => warn!("Failed to persist session: {e}"),
        }
    });
}

/// Run the full-screen TUI until the visitor quits.
pub async fn run_tui(dispatcher: Dispatcher) -> anyhow::Result<()> {
    let session = Session::restore(dispatcher.store()).await;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard; // Drop restores terminal

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = TuiApp::new(session);
    let mut last_revision = app.session.revision();
    debug!(tabs = app.session.tabs().len(), "TUI started");

    let mut crossterm_stream = EventStream::new();
    let (completion_tx, mut completion_rx) = mpsc::channel::<Completion>(32);
    let mut reload_at: Option<Instant> = None;

    // Spinner tick interval (100ms)
    let mut spinner_interval = tokio::time::interval(Duration::from_millis(100));
    spinner_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        terminal.draw(|frame| app.render(frame))?;

        tokio::select! {
            // Branch 1: crossterm terminal events
            maybe_event = crossterm_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        match app.handle_key(key) {
                            Effect::None => {}
                            Effect::Quit => break,
                            Effect::Submit(text) => {
                                let outcome = dispatcher.submit(&mut app.session, &text).await;
                                if let Some(deadline) = apply_outcome(&mut app, outcome, &completion_tx) {
                                    reload_at = Some(deadline);
                                }
                            }
                            Effect::ResolveConfirm(request, confirmed) => {
                                let outcome = dispatcher
                                    .resolve_clear_data(&mut app.session, request, confirmed)
                                    .await;
                                if let Some(deadline) = apply_outcome(&mut app, outcome, &completion_tx) {
                                    reload_at = Some(deadline);
                                }
                            }
                        }
                    }
                    Some(Ok(Event::Resize(_, _))) => {
                        // Terminal will redraw on next loop iteration
                    }
                    Some(Err(_)) | None => {
                        break; // stream ended or error
                    }
                    _ => {}
                }
            }

            // Branch 2: background command finished
            Some(completion) = completion_rx.recv() => {
                debug!(tab = %completion.tab_id, id = completion.id, "Command completed");
                if app.session.apply_completion(completion) {
                    app.scroll_back = 0;
                }
            }

            // Branch 3: reload after clear-data
            _ = async {
                match reload_at {
                    Some(deadline) => tokio::time::sleep_until(deadline).await,
                    None => std::future::pending().await,
                }
            } => {
                reload_at = None;
                let session = Session::restore(dispatcher.store()).await;
                app.replace_session(session);
                last_revision = app.session.revision();
                debug!("Session reloaded");
            }

            // Branch 4: spinner tick
            _ = spinner_interval.tick() => {
                app.spinner_tick = app.spinner_tick.wrapping_add(1);
            }
        }

        persist_if_changed(&app, &dispatcher, &mut last_revision);

        if app.should_quit {
            break;
        }
    }

    // Flush the latest state before exiting.
    if !app.reloading {
        let writer = dispatcher.writer();
        if let Err(e) = writer.write(&app.session.snapshot(), writer.generation()).await {
            warn!("Failed to persist session on exit: {e}");
        }
    }
    app.session.cancel_all_pending();
    debug!("TUI exited");
    Ok(())
}
