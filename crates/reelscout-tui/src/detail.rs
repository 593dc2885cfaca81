//! Detail view controller.
#![allow(clippy::future_not_send)]

use std::sync::Arc;

use anyhow::Result;
use reelscout_api::tmdb::{MovieDetail, TmdbApi, TmdbStatusError};
use tracing::instrument;

use crate::fetch_state::FetchState;

/// Prefix of the full-page error text.
pub const DETAIL_ERROR_PREFIX: &str = "Error loading movie details";

/// Tag attached to an issued detail request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailTicket {
    /// Issue order; only the latest sequence may change the view.
    pub seq: u64,
    /// Requested movie.
    pub movie_id: u64,
}

/// Fetches one movie per visit and tracks its [`FetchState`].
///
/// A movie is fetched once per distinct identifier; switching to another
/// identifier or resetting the view (leaving the route) fetches again.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct DetailController<A> {
    api: Arc<A>,
    state: FetchState<MovieDetail>,
    movie_id: Option<u64>,
    seq: u64,
}

impl<A> DetailController<A>
where
    A: TmdbApi + Sync,
{
    /// Creates an idle controller.
    #[must_use]
    pub const fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: FetchState::Idle,
            movie_id: None,
            seq: 0,
        }
    }

    /// Catalog client shared with spawned fetches.
    #[must_use]
    pub const fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// Current view state.
    #[must_use]
    pub const fn state(&self) -> &FetchState<MovieDetail> {
        &self.state
    }

    /// Movie the view is showing or loading.
    #[must_use]
    pub const fn movie_id(&self) -> Option<u64> {
        self.movie_id
    }

    /// Requests `movie_id`. Returns `None` when this visit already fetched it.
    pub fn request(&mut self, movie_id: u64) -> Option<DetailTicket> {
        if self.movie_id == Some(movie_id) && !self.state.is_idle() {
            return None;
        }
        self.seq = self.seq.wrapping_add(1);
        self.movie_id = Some(movie_id);
        self.state = FetchState::Loading;
        Some(DetailTicket {
            seq: self.seq,
            movie_id,
        })
    }

    /// Applies a finished fetch; stale tickets are discarded.
    pub fn apply(&mut self, ticket: DetailTicket, result: Result<MovieDetail>) {
        if ticket.seq != self.seq || self.movie_id != Some(ticket.movie_id) {
            tracing::debug!(
                movie_id = ticket.movie_id,
                "Discarding stale detail response"
            );
            return;
        }
        self.state = match result {
            Ok(detail) => FetchState::Success(detail),
            Err(e) => {
                tracing::error!(movie_id = ticket.movie_id, "Error fetching movie details: {e:#}");
                FetchState::Error(error_message(&e))
            }
        };
    }

    /// Forgets the current visit so the next one fetches fresh data.
    pub fn reset(&mut self) {
        self.seq = self.seq.wrapping_add(1);
        self.movie_id = None;
        self.state = FetchState::Idle;
    }

    /// Requests and loads `movie_id` inline.
    #[instrument(skip_all, fields(movie_id = movie_id))]
    pub async fn show(&mut self, movie_id: u64) {
        let Some(ticket) = self.request(movie_id) else {
            return;
        };
        let result = fetch_detail(self.api.as_ref(), movie_id).await;
        self.apply(ticket, result);
    }
}

/// Fetches one movie record.
///
/// # Errors
///
/// Returns an error if the catalog request fails.
pub async fn fetch_detail<A>(api: &A, movie_id: u64) -> Result<MovieDetail>
where
    A: TmdbApi + Sync,
{
    api.movie_details(movie_id).await
}

/// Full-page error text for a failed detail view.
#[must_use]
pub fn error_text(message: &str) -> String {
    format!("{DETAIL_ERROR_PREFIX}: {message}")
}

/// Message for a failed fetch: `API error: {status}` for HTTP failures,
/// otherwise the root cause.
fn error_message(err: &anyhow::Error) -> String {
    err.downcast_ref::<TmdbStatusError>().map_or_else(
        || err.root_cause().to_string(),
        |status| format!("API error: {}", status.status),
    )
}
