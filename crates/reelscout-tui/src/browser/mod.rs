//! Interactive movie browser main loop.

/// Browser state types.
pub mod state;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use reelscout_api::tmdb::{MovieDetail, MovieListResponse, TmdbApi};
use reelscout_db::{TrendingRecord, TrendingStore};
use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;

use self::state::{BrowserState, InputMode};
use crate::detail::{DetailTicket, fetch_detail};
use crate::format::movie_page_url;
use crate::router::Route;
use crate::search::{RequestTicket, TrendingUpdate, fetch_listing, record_trending};
use crate::settings::Settings;

/// Redraw and debounce polling interval.
const TICK_RATE: Duration = Duration::from_millis(100);

/// Completion of a spawned fetch, applied back on the loop.
#[derive(Debug)]
enum AppEvent {
    /// Listing fetch finished.
    Listing {
        ticket: RequestTicket,
        result: Result<MovieListResponse>,
    },
    /// Trending load finished.
    Trending(Result<Vec<TrendingRecord>>),
    /// Detail fetch finished.
    Detail {
        ticket: DetailTicket,
        result: Result<MovieDetail>,
    },
}

/// What the key handler asks the loop to do next.
#[derive(Debug, PartialEq, Eq)]
enum Action {
    None,
    Quit,
    FetchListing(RequestTicket),
    FetchDetail(DetailTicket),
}

/// Runs the interactive browser until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
#[allow(clippy::module_name_repetitions)]
pub async fn run_browser<A, S>(api: Arc<A>, store: Arc<S>, settings: &Settings) -> Result<()>
where
    A: TmdbApi + Send + Sync + 'static,
    S: TrendingStore + Send + Sync + 'static,
{
    let mut state = BrowserState::new(api, store, settings);

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut state).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop. Trending writes still queued on quit are awaited
/// before returning.
async fn run_event_loop<A, S>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut BrowserState<A, S>,
) -> Result<()>
where
    A: TmdbApi + Send + Sync + 'static,
    S: TrendingStore + Send + Sync + 'static,
{
    let mut writes = JoinSet::new();
    let result = drive_event_loop(terminal, state, &mut writes).await;
    finish_trending_writes(&mut writes).await;
    result
}

async fn drive_event_loop<A, S>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut BrowserState<A, S>,
    writes: &mut JoinSet<()>,
) -> Result<()>
where
    A: TmdbApi + Send + Sync + 'static,
    S: TrendingStore + Send + Sync + 'static,
{
    let (tx, mut rx) = unbounded_channel::<AppEvent>();
    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(TICK_RATE);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let (ticket, load_trending) = state.mount();
    spawn_listing(state, ticket, &tx);
    if load_trending {
        spawn_trending(state, &tx);
    }

    let mut main_area_height: u16 = 0;

    loop {
        terminal
            .draw(|frame| {
                main_area_height = ui::draw(frame, state);
            })
            .context("failed to draw TUI")?;

        let page_size = usize::from(main_area_height.saturating_sub(4));

        tokio::select! {
            maybe_event = events.next() => {
                let Some(event) = maybe_event else {
                    return Ok(());
                };
                if let Event::Key(key) = event.context("failed to read event")?
                    && key.kind == KeyEventKind::Press
                {
                    match handle_key(state, key, page_size, Instant::now()) {
                        Action::None => {}
                        Action::Quit => return Ok(()),
                        Action::FetchListing(ticket) => spawn_listing(state, ticket, &tx),
                        Action::FetchDetail(ticket) => spawn_detail(state, ticket, &tx),
                    }
                }
            }
            Some(event) = rx.recv() => {
                if let Some(update) = apply_event(state, event) {
                    spawn_record_trending(state, update, writes);
                }
            }
            Some(joined) = writes.join_next(), if !writes.is_empty() => {
                log_write_failure(joined);
            }
            _ = tick.tick() => {
                if let Some(ticket) = state.poll_debounce(Instant::now()) {
                    spawn_listing(state, ticket, &tx);
                }
            }
        }
    }
}

/// Applies a completion. Returns the trending hit to record, if any.
fn apply_event<A, S>(state: &mut BrowserState<A, S>, event: AppEvent) -> Option<TrendingUpdate>
where
    A: TmdbApi + Sync,
    S: TrendingStore + Sync,
{
    match event {
        AppEvent::Listing { ticket, result } => state.apply_listing(ticket, result),
        AppEvent::Trending(result) => {
            state.apply_trending(result);
            None
        }
        AppEvent::Detail { ticket, result } => {
            state.apply_detail(ticket, result);
            None
        }
    }
}

fn spawn_listing<A, S>(
    state: &BrowserState<A, S>,
    ticket: RequestTicket,
    tx: &UnboundedSender<AppEvent>,
) where
    A: TmdbApi + Send + Sync + 'static,
    S: TrendingStore + Sync,
{
    let api = Arc::clone(state.search.api());
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = fetch_listing(api.as_ref(), &ticket.query).await;
        let _ = tx.send(AppEvent::Listing { ticket, result });
    });
}

fn spawn_trending<A, S>(state: &BrowserState<A, S>, tx: &UnboundedSender<AppEvent>)
where
    A: TmdbApi + Sync,
    S: TrendingStore + Send + Sync + 'static,
{
    let store = Arc::clone(state.trending.store());
    let limit = state.trending.limit();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = store.top_trending(limit).await;
        let _ = tx.send(AppEvent::Trending(result));
    });
}

fn spawn_detail<A, S>(
    state: &BrowserState<A, S>,
    ticket: DetailTicket,
    tx: &UnboundedSender<AppEvent>,
) where
    A: TmdbApi + Send + Sync + 'static,
    S: TrendingStore + Sync,
{
    let api = Arc::clone(state.detail.api());
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = fetch_detail(api.as_ref(), ticket.movie_id).await;
        let _ = tx.send(AppEvent::Detail { ticket, result });
    });
}

fn spawn_record_trending<A, S>(
    state: &BrowserState<A, S>,
    update: TrendingUpdate,
    writes: &mut JoinSet<()>,
) where
    A: TmdbApi + Sync,
    S: TrendingStore + Send + Sync + 'static,
{
    let store = Arc::clone(state.search.store());
    writes.spawn(async move {
        record_trending(store.as_ref(), &update).await;
    });
}

/// Waits for every queued trending write.
async fn finish_trending_writes(writes: &mut JoinSet<()>) {
    while let Some(joined) = writes.join_next().await {
        log_write_failure(joined);
    }
}

fn log_write_failure(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        tracing::error!("Trending update task failed: {e}");
    }
}

/// Handles a key press for the current route and input mode.
fn handle_key<A, S>(
    state: &mut BrowserState<A, S>,
    key: KeyEvent,
    page_size: usize,
    now: Instant,
) -> Action
where
    A: TmdbApi + Sync,
    S: TrendingStore + Sync,
{
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    match state.router.current() {
        Route::Movie(_) => handle_detail_input(state, key.code),
        Route::Home => match state.input_mode {
            InputMode::Editing => handle_editing_input(state, key, now),
            InputMode::Normal => handle_normal_input(state, key.code, page_size),
        },
    }
}

/// Handles key input while editing the search box.
fn handle_editing_input<A, S>(
    state: &mut BrowserState<A, S>,
    key: KeyEvent,
    now: Instant,
) -> Action
where
    A: TmdbApi + Sync,
    S: TrendingStore + Sync,
{
    if key.code == KeyCode::Char('u') && key.modifiers.contains(KeyModifiers::CONTROL) {
        state.input_clear(now);
        return Action::None;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Down | KeyCode::Tab => {
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            state.input_mode = InputMode::Normal;
            return Action::FetchListing(state.submit_search());
        }
        KeyCode::Backspace => state.input_pop(now),
        KeyCode::Char(c) => state.input_push(c, now),
        _ => {}
    }
    Action::None
}

/// Handles key input while navigating the home route.
fn handle_normal_input<A, S>(
    state: &mut BrowserState<A, S>,
    key: KeyCode,
    page_size: usize,
) -> Action
where
    A: TmdbApi + Sync,
    S: TrendingStore + Sync,
{
    match key {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('/') => state.input_mode = InputMode::Editing,
        KeyCode::Up | KeyCode::Char('k') => state.move_up(),
        KeyCode::Down | KeyCode::Char('j') => state.move_down(),
        KeyCode::PageUp => state.page_up(page_size),
        KeyCode::PageDown => state.page_down(page_size),
        KeyCode::Tab | KeyCode::Left | KeyCode::Right => state.toggle_pane(),
        KeyCode::Enter => {
            if let Some(ticket) = state.open_selected() {
                return Action::FetchDetail(ticket);
            }
        }
        KeyCode::Char('o') => open_movie_page(state),
        _ => {}
    }
    Action::None
}

/// Handles key input on the detail route.
fn handle_detail_input<A, S>(state: &mut BrowserState<A, S>, key: KeyCode) -> Action
where
    A: TmdbApi + Sync,
    S: TrendingStore + Sync,
{
    match key {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('b') => {
            state.go_back().map_or(Action::None, Action::FetchDetail)
        }
        KeyCode::Enter if state.detail.state().error().is_some() => {
            state.go_back().map_or(Action::None, Action::FetchDetail)
        }
        KeyCode::Char('o') => {
            open_movie_page(state);
            Action::None
        }
        _ => Action::None,
    }
}

/// Opens the TMDB page of the selected movie in the system browser.
fn open_movie_page<A, S>(state: &BrowserState<A, S>)
where
    A: TmdbApi + Sync,
    S: TrendingStore + Sync,
{
    let Some(movie_id) = state.selected_movie_id() else {
        return;
    };
    let url = movie_page_url(movie_id);
    if let Err(e) = open::that(&url) {
        tracing::warn!(url = %url, "Failed to open browser: {e}");
    }
}
