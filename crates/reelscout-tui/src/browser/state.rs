//! Browser state management.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use ratatui::widgets::TableState;
use reelscout_api::tmdb::{MovieDetail, MovieListResponse, MovieSummary, TmdbApi};
use reelscout_db::{TrendingRecord, TrendingStore};

use crate::debounce::Debouncer;
use crate::detail::{DetailController, DetailTicket};
use crate::router::{Route, Router};
use crate::search::{RequestTicket, SearchController, TrendingUpdate};
use crate::settings::Settings;
use crate::trending::TrendingRail;

/// Input mode on the home route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys edit the search box.
    Editing,
    /// Keys navigate the listing and trending rail.
    Normal,
}

/// Focused pane on the home route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    /// All movies listing.
    Listing,
    /// Trending rail.
    Trending,
}

/// State for the browser TUI.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct BrowserState<A, S> {
    /// Home listing controller.
    pub search: SearchController<A, S>,
    /// Trending rail.
    pub trending: TrendingRail<S>,
    /// Detail page controller.
    pub detail: DetailController<A>,
    /// Navigation history.
    pub router: Router,
    /// Raw search box text.
    pub input: String,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Focused pane.
    pub active_pane: ActivePane,
    /// Table state for the listing (handles selection and scroll).
    pub listing_table_state: TableState,
    /// Table state for the trending rail.
    pub trending_table_state: TableState,
    debouncer: Debouncer,
}

impl<A, S> BrowserState<A, S>
where
    A: TmdbApi + Sync,
    S: TrendingStore + Sync,
{
    /// Creates the state with all views idle.
    #[must_use]
    pub fn new(api: Arc<A>, store: Arc<S>, settings: &Settings) -> Self {
        Self {
            search: SearchController::new(Arc::clone(&api), Arc::clone(&store)),
            trending: TrendingRail::new(store, settings.trending_limit),
            detail: DetailController::new(api),
            router: Router::new(),
            input: String::new(),
            input_mode: InputMode::Editing,
            active_pane: ActivePane::Listing,
            listing_table_state: TableState::default(),
            trending_table_state: TableState::default(),
            debouncer: Debouncer::new(settings.debounce),
        }
    }

    /// Mounts the home view: the initial empty query, plus the trending
    /// load on first mount.
    pub fn mount(&mut self) -> (RequestTicket, bool) {
        let load_trending = self.trending.mount();
        (self.search.commit(""), load_trending)
    }

    // --- Search box ---

    /// Appends a character to the search box.
    pub fn input_push(&mut self, c: char, now: Instant) {
        self.input.push(c);
        self.debouncer.input(self.input.clone(), now);
    }

    /// Removes the last character from the search box.
    pub fn input_pop(&mut self, now: Instant) {
        if self.input.pop().is_some() {
            self.debouncer.input(self.input.clone(), now);
        }
    }

    /// Clears the search box.
    pub fn input_clear(&mut self, now: Instant) {
        if !self.input.is_empty() {
            self.input.clear();
            self.debouncer.input(String::new(), now);
        }
    }

    /// Commits the settled search box text, if the quiet period elapsed and
    /// the text differs from the committed query.
    pub fn poll_debounce(&mut self, now: Instant) -> Option<RequestTicket> {
        let query = self.debouncer.poll(now)?;
        if self.search.committed_query() == Some(query.as_str()) {
            return None;
        }
        Some(self.search.commit(query))
    }

    /// Commits the search box text immediately.
    pub fn submit_search(&mut self) -> RequestTicket {
        self.debouncer.cancel();
        self.search.commit(self.input.clone())
    }

    /// Returns `true` while typed text waits for the quiet period.
    #[must_use]
    pub const fn has_pending_input(&self) -> bool {
        self.debouncer.has_pending()
    }

    // --- Completions ---

    /// Applies a listing fetch; an accepted response resets the listing cursor.
    pub fn apply_listing(
        &mut self,
        ticket: RequestTicket,
        result: Result<MovieListResponse>,
    ) -> Option<TrendingUpdate> {
        if !self.search.is_current(&ticket) {
            return self.search.apply(ticket, result);
        }
        let update = self.search.apply(ticket, result);
        let selected = (!self.search.movies().is_empty()).then_some(0);
        self.listing_table_state.select(selected);
        update
    }

    /// Applies the trending load.
    pub fn apply_trending(&mut self, result: Result<Vec<TrendingRecord>>) {
        self.trending.apply(result);
        let selected = (!self.trending.records().is_empty()).then_some(0);
        self.trending_table_state.select(selected);
    }

    /// Applies a detail fetch.
    pub fn apply_detail(&mut self, ticket: DetailTicket, result: Result<MovieDetail>) {
        self.detail.apply(ticket, result);
    }

    // --- Navigation ---

    /// Opens the detail page of `movie_id`.
    pub fn open_movie(&mut self, movie_id: u64) -> Option<DetailTicket> {
        self.router.push(Route::Movie(movie_id));
        self.enter_current_route()
    }

    /// Opens the movie under the cursor of the focused pane.
    pub fn open_selected(&mut self) -> Option<DetailTicket> {
        let movie_id = self.selected_movie_id()?;
        self.open_movie(movie_id)
    }

    /// Returns to the previous route; the detail view starts over.
    pub fn go_back(&mut self) -> Option<DetailTicket> {
        self.router.go_back()?;
        self.detail.reset();
        self.enter_current_route()
    }

    fn enter_current_route(&mut self) -> Option<DetailTicket> {
        match self.router.current() {
            Route::Home => None,
            Route::Movie(movie_id) => self.detail.request(movie_id),
        }
    }

    /// Movie shown on the detail route, or under the cursor on home.
    #[must_use]
    pub fn selected_movie_id(&self) -> Option<u64> {
        match self.router.current() {
            Route::Movie(movie_id) => Some(movie_id),
            Route::Home => match self.active_pane {
                ActivePane::Listing => self.current_movie().map(|m| m.id),
                ActivePane::Trending => self.current_trending().map(|r| r.movie_id),
            },
        }
    }

    /// Listing row under the cursor.
    #[must_use]
    pub fn current_movie(&self) -> Option<&MovieSummary> {
        let idx = self.listing_table_state.selected()?;
        self.search.movies().get(idx)
    }

    /// Trending row under the cursor.
    #[must_use]
    pub fn current_trending(&self) -> Option<&TrendingRecord> {
        let idx = self.trending_table_state.selected()?;
        self.trending.records().get(idx)
    }

    // --- Cursor ---

    /// Switches focus between the listing and the trending rail.
    pub const fn toggle_pane(&mut self) {
        self.active_pane = match self.active_pane {
            ActivePane::Listing => ActivePane::Trending,
            ActivePane::Trending => ActivePane::Listing,
        };
    }

    /// Moves the cursor up in the focused pane.
    pub fn move_up(&mut self) {
        let table = self.focused_table_mut();
        if let Some(current) = table.selected()
            && current > 0
        {
            table.select(Some(current.saturating_sub(1)));
        }
    }

    /// Moves the cursor down in the focused pane.
    pub fn move_down(&mut self) {
        let len = self.focused_len();
        let table = self.focused_table_mut();
        let next = table.selected().map_or(0, |c| c.saturating_add(1));
        if next < len {
            table.select(Some(next));
        }
    }

    /// Scrolls up by a page.
    pub fn page_up(&mut self, page_size: usize) {
        let table = self.focused_table_mut();
        if let Some(current) = table.selected() {
            table.select(Some(current.saturating_sub(page_size)));
        }
    }

    /// Scrolls down by a page.
    pub fn page_down(&mut self, page_size: usize) {
        let len = self.focused_len();
        if len == 0 {
            return;
        }
        let table = self.focused_table_mut();
        let next = table
            .selected()
            .map_or(0, |c| c.saturating_add(page_size))
            .min(len.saturating_sub(1));
        table.select(Some(next));
    }

    fn focused_len(&self) -> usize {
        match self.active_pane {
            ActivePane::Listing => self.search.movies().len(),
            ActivePane::Trending => self.trending.records().len(),
        }
    }

    const fn focused_table_mut(&mut self) -> &mut TableState {
        match self.active_pane {
            ActivePane::Listing => &mut self.listing_table_state,
            ActivePane::Trending => &mut self.trending_table_state,
        }
    }
}
