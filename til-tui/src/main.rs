//! TIL TUI entry point.

use crossterm::{
    event::{self, Event as CrosstermEvent, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use til_core::CategoryFilter;
use til_tui::config::TuiConfig;
use til_tui::error::TuiError;
use til_tui::events::TuiEvent;
use til_tui::keys::{map_key, Action};
use til_tui::state::{App, FormField};
use til_tui::store_client::StoreClient;
use til_tui::views::render_view;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    init_logging(&config.log_path)?;
    let client = StoreClient::new(&config)?;
    let mut app = App::new(config);

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard {};

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);

    spawn_input_reader(event_tx.clone());

    // Initial load of the unfiltered feed.
    spawn_fetch(
        client.clone(),
        app.feed.filter,
        app.begin_fetch(),
        event_tx.clone(),
    );

    let tick_rate = Duration::from_millis(app.config.tick_interval_ms);
    let mut ticker = tokio::time::interval(tick_rate);

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => {}
            Some(event) = event_rx.recv() => {
                if handle_event(&mut app, &client, &event_tx, event) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn init_logging(path: &Path) -> Result<(), TuiError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                match evt {
                    CrosstermEvent::Key(key) => {
                        let _ = sender.blocking_send(TuiEvent::Input(key));
                    }
                    CrosstermEvent::Resize(width, height) => {
                        let _ = sender.blocking_send(TuiEvent::Resize { width, height });
                    }
                    _ => {}
                }
            }
        }
    });
}

fn spawn_fetch(
    client: StoreClient,
    filter: CategoryFilter,
    seq: u64,
    sender: mpsc::Sender<TuiEvent>,
) {
    tokio::spawn(async move {
        let result = client.list_facts(&filter).await.map_err(|e| e.to_string());
        let _ = sender.send(TuiEvent::FactsLoaded { seq, result }).await;
    });
}

/// Returns whether the loop should exit.
fn handle_event(
    app: &mut App,
    client: &StoreClient,
    sender: &mpsc::Sender<TuiEvent>,
    event: TuiEvent,
) -> bool {
    match event {
        TuiEvent::Input(key) => {
            if app.form.is_some() {
                handle_form_key(app, client, sender, key);
            } else if let Some(action) = map_key(key) {
                return handle_action(app, client, sender, action);
            }
        }
        TuiEvent::FactsLoaded { seq, result } => {
            app.apply_facts_loaded(seq, result);
        }
        TuiEvent::FactInserted { result } => {
            app.apply_fact_inserted(result);
        }
        TuiEvent::VoteApplied { fact_id, result } => {
            app.apply_vote(fact_id, result);
        }
        TuiEvent::Resize { .. } => {}
    }
    false
}

fn handle_action(
    app: &mut App,
    client: &StoreClient,
    sender: &mpsc::Sender<TuiEvent>,
    action: Action,
) -> bool {
    match action {
        Action::Quit => return true,
        Action::Refresh => {
            spawn_fetch(client.clone(), app.feed.filter, app.begin_fetch(), sender.clone());
        }
        Action::MoveDown => app.feed.select_next(),
        Action::MoveUp => app.feed.select_previous(),
        Action::NextCategory => {
            let next = app.feed.filter.next();
            change_filter(app, client, sender, next);
        }
        Action::PrevCategory => {
            let previous = app.feed.filter.previous();
            change_filter(app, client, sender, previous);
        }
        Action::JumpCategory(index) => {
            if let Some(filter) = CategoryFilter::from_index(index) {
                change_filter(app, client, sender, filter);
            }
        }
        Action::OpenForm => app.open_form(),
        Action::Vote(kind) => {
            if let Some(fact) = app.feed.selected_fact() {
                let client = client.clone();
                let sender = sender.clone();
                let id = fact.id;
                let current = fact.vote_count(kind);
                tokio::spawn(async move {
                    let result = client
                        .apply_vote(id, kind, current)
                        .await
                        .map_err(|e| e.to_string());
                    let _ = sender.send(TuiEvent::VoteApplied { fact_id: id, result }).await;
                });
            }
        }
    }
    false
}

/// Every filter change triggers exactly one re-fetch; the sequence token
/// handed out here lets the state discard superseded responses.
fn change_filter(
    app: &mut App,
    client: &StoreClient,
    sender: &mpsc::Sender<TuiEvent>,
    filter: CategoryFilter,
) {
    if filter == app.feed.filter {
        return;
    }
    app.select_filter(filter);
    spawn_fetch(client.clone(), filter, app.begin_fetch(), sender.clone());
}

fn handle_form_key(
    app: &mut App,
    client: &StoreClient,
    sender: &mpsc::Sender<TuiEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Tab => {
            if let Some(form) = app.form.as_mut() {
                form.focus_next();
            }
        }
        KeyCode::Enter => submit_form(app, client, sender),
        KeyCode::Left | KeyCode::Right => {
            if let Some(form) = app.form.as_mut() {
                match form.focus {
                    FormField::Category => form.cycle_category(key.code == KeyCode::Right),
                    FormField::Text => {
                        form.text.input(key);
                    }
                    FormField::Source => {
                        form.source.input(key);
                    }
                }
            }
        }
        _ => {
            if let Some(form) = app.form.as_mut() {
                match form.focus {
                    FormField::Text => {
                        form.text.input(key);
                    }
                    FormField::Source => {
                        form.source.input(key);
                    }
                    FormField::Category => {}
                }
            }
        }
    }
}

/// Validation gate in front of the insert. An invalid draft is dropped
/// without user feedback; in every case the fields are cleared and the
/// form hidden.
fn submit_form(app: &mut App, client: &StoreClient, sender: &mpsc::Sender<TuiEvent>) {
    let Some(draft) = app.take_submission() else {
        return;
    };
    match draft.validate() {
        Ok(new_fact) => {
            let client = client.clone();
            let sender = sender.clone();
            tokio::spawn(async move {
                let result = client
                    .insert_fact(&new_fact)
                    .await
                    .map_err(|e| e.to_string());
                let _ = sender.send(TuiEvent::FactInserted { result }).await;
            });
        }
        Err(reason) => {
            tracing::debug!(%reason, "submission dropped");
        }
    }
}
