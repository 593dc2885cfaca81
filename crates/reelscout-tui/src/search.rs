//! Debounced query controller.
//!
//! Turns committed queries into catalog fetches, tracks the listing's
//! [`FetchState`] and records a trending hit for successful searches.
#![allow(clippy::future_not_send)]

use std::sync::Arc;

use anyhow::Result;
use reelscout_api::tmdb::{
    DiscoverMovieParams, MovieListResponse, MovieSummary, SearchMovieParams, TmdbApi,
};
use reelscout_db::{TrendingMovie, TrendingStore};
use tracing::instrument;

use crate::fetch_state::FetchState;

/// Listing error shown for transport failures.
pub const TRANSPORT_ERROR_MESSAGE: &str = "Error fetching movies. Please try again later.";

/// Listing error shown when a failure payload carries no message.
pub const API_FAILURE_FALLBACK: &str = "Failed to fetch movies";

/// Tag attached to an issued listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    /// Issue order; only the latest sequence may change the listing.
    pub seq: u64,
    /// Committed query the request was issued for.
    pub query: String,
}

/// Trending hit produced by a successful non-empty search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingUpdate {
    /// Committed query.
    pub search_term: String,
    /// First returned movie.
    pub movie: TrendingMovie,
}

/// Controller for the home listing.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchController<A, S> {
    api: Arc<A>,
    store: Arc<S>,
    state: FetchState<Vec<MovieSummary>>,
    latest_seq: u64,
    committed: Option<String>,
}

impl<A, S> SearchController<A, S>
where
    A: TmdbApi + Sync,
    S: TrendingStore + Sync,
{
    /// Creates an idle controller.
    #[must_use]
    pub const fn new(api: Arc<A>, store: Arc<S>) -> Self {
        Self {
            api,
            store,
            state: FetchState::Idle,
            latest_seq: 0,
            committed: None,
        }
    }

    /// Catalog client shared with spawned fetches.
    #[must_use]
    pub const fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// Trending store shared with spawned updates.
    #[must_use]
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Current listing state.
    #[must_use]
    pub const fn state(&self) -> &FetchState<Vec<MovieSummary>> {
        &self.state
    }

    /// Movies of the latest successful fetch (empty otherwise).
    #[must_use]
    pub fn movies(&self) -> &[MovieSummary] {
        self.state.data().map_or(&[], Vec::as_slice)
    }

    /// Latest committed query.
    #[must_use]
    pub fn committed_query(&self) -> Option<&str> {
        self.committed.as_deref()
    }

    /// Commits `query`: enters `Loading` and tags the request to issue.
    ///
    /// Any earlier ticket becomes stale.
    pub fn commit(&mut self, query: impl Into<String>) -> RequestTicket {
        let query = query.into();
        self.latest_seq = self.latest_seq.wrapping_add(1);
        self.committed = Some(query.clone());
        self.state = FetchState::Loading;
        tracing::debug!(seq = self.latest_seq, query = %query, "Committed query");
        RequestTicket {
            seq: self.latest_seq,
            query,
        }
    }

    /// Returns `true` when `ticket` belongs to the latest commit.
    #[must_use]
    pub const fn is_current(&self, ticket: &RequestTicket) -> bool {
        ticket.seq == self.latest_seq
    }

    /// Applies a finished fetch.
    ///
    /// Stale tickets are discarded. Returns the trending hit to record when
    /// the query was non-empty and at least one movie came back.
    pub fn apply(
        &mut self,
        ticket: RequestTicket,
        result: Result<MovieListResponse>,
    ) -> Option<TrendingUpdate> {
        if !self.is_current(&ticket) {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                query = %ticket.query,
                "Discarding stale listing response"
            );
            return None;
        }

        match result {
            Err(e) => {
                tracing::error!(query = %ticket.query, "Error fetching movies: {e:#}");
                self.state = FetchState::Error(String::from(TRANSPORT_ERROR_MESSAGE));
                None
            }
            Ok(response) if response.is_api_failure() => {
                let message = response
                    .error
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| String::from(API_FAILURE_FALLBACK));
                tracing::warn!(
                    query = %ticket.query,
                    message = %message,
                    "Catalog reported failure"
                );
                self.state = FetchState::Error(message);
                None
            }
            Ok(response) => {
                let update = if ticket.query.is_empty() {
                    None
                } else {
                    response.results.first().map(|first| TrendingUpdate {
                        search_term: ticket.query.clone(),
                        movie: representative_movie(first),
                    })
                };
                tracing::debug!(
                    query = %ticket.query,
                    count = response.results.len(),
                    "Listing loaded"
                );
                self.state = FetchState::Success(response.results);
                update
            }
        }
    }

    /// Runs one committed query end to end.
    ///
    /// Fetches the listing, applies it and records the trending hit.
    /// Trending failures are logged and never reach the listing state.
    #[instrument(skip_all, fields(query = query))]
    pub async fn on_query_committed(&mut self, query: &str) {
        let ticket = self.commit(query);
        let result = fetch_listing(self.api.as_ref(), &ticket.query).await;
        if let Some(update) = self.apply(ticket, result) {
            record_trending(self.store.as_ref(), &update).await;
        }
    }
}

/// Fetches the listing for a committed query.
///
/// An empty query lists popular movies; anything else is a title search.
///
/// # Errors
///
/// Returns an error if the catalog request fails.
pub async fn fetch_listing<A>(api: &A, query: &str) -> Result<MovieListResponse>
where
    A: TmdbApi + Sync,
{
    if query.is_empty() {
        api.discover_movie(&DiscoverMovieParams::popular()).await
    } else {
        api.search_movie(&SearchMovieParams::new(query)).await
    }
}

/// Records a trending hit, logging and swallowing any failure.
pub async fn record_trending<S>(store: &S, update: &TrendingUpdate)
where
    S: TrendingStore + Sync,
{
    if let Err(e) = store
        .increment_search_count(&update.search_term, &update.movie)
        .await
    {
        tracing::error!(
            search_term = %update.search_term,
            "Error updating search count: {e:#}"
        );
    }
}

/// Trending entry for the first result of a search.
fn representative_movie(movie: &MovieSummary) -> TrendingMovie {
    TrendingMovie {
        movie_id: movie.id,
        title: movie.title.clone(),
        poster_url: movie.poster_url(),
    }
}
