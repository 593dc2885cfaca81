//! In-memory collaborators for controller tests.
#![allow(clippy::unwrap_used)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, bail};
use reelscout_api::tmdb::{
    DiscoverMovieParams, MovieDetail, MovieListResponse, MovieSummary, SearchMovieParams, TmdbApi,
    TmdbStatusError,
};
use reelscout_db::{TrendingMovie, TrendingRecord, TrendingStore};

/// A catalog request seen by [`MockTmdb`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Search(String),
    Discover,
    Details(u64),
}

/// Canned reply for listing endpoints.
#[derive(Debug, Clone)]
pub enum ListingReply {
    Movies(Vec<MovieSummary>),
    ApiFailure(Option<String>),
    Status(u16),
}

/// Canned reply for the detail endpoint.
#[derive(Debug, Clone)]
pub enum DetailReply {
    Movie(MovieDetail),
    Status(u16),
}

#[derive(Debug)]
pub struct MockTmdb {
    listing: ListingReply,
    detail: DetailReply,
    calls: Mutex<Vec<Call>>,
}

impl MockTmdb {
    pub fn listing(listing: ListingReply) -> Self {
        Self::new(listing, DetailReply::Movie(matrix_detail()))
    }

    pub fn detail(detail: DetailReply) -> Self {
        Self::new(ListingReply::Movies(Vec::new()), detail)
    }

    pub const fn new(listing: ListingReply, detail: DetailReply) -> Self {
        Self {
            listing,
            detail,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn listing_reply(&self) -> Result<MovieListResponse> {
        match &self.listing {
            ListingReply::Movies(movies) => Ok(MovieListResponse {
                page: 1,
                total_pages: 1,
                total_results: u32::try_from(movies.len()).unwrap(),
                results: movies.clone(),
                ..MovieListResponse::default()
            }),
            ListingReply::ApiFailure(message) => Ok(MovieListResponse {
                response: Some(String::from("False")),
                error: message.clone(),
                ..MovieListResponse::default()
            }),
            ListingReply::Status(status) => Err(status_error(*status)),
        }
    }
}

impl TmdbApi for MockTmdb {
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<MovieListResponse> {
        self.record(Call::Search(params.query.clone()));
        self.listing_reply()
    }

    async fn discover_movie(&self, _params: &DiscoverMovieParams) -> Result<MovieListResponse> {
        self.record(Call::Discover);
        self.listing_reply()
    }

    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetail> {
        self.record(Call::Details(movie_id));
        match &self.detail {
            DetailReply::Movie(detail) => Ok(MovieDetail {
                id: movie_id,
                ..detail.clone()
            }),
            DetailReply::Status(status) => Err(status_error(*status)),
        }
    }
}

#[derive(Debug, Default)]
pub struct MockStore {
    fail: bool,
    records: Vec<TrendingRecord>,
    increments: Mutex<Vec<(String, TrendingMovie)>>,
    increment_attempts: AtomicUsize,
    top_calls: AtomicUsize,
}

impl MockStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_records(records: Vec<TrendingRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn increments(&self) -> Vec<(String, TrendingMovie)> {
        self.increments.lock().unwrap().clone()
    }

    pub fn increment_attempts(&self) -> usize {
        self.increment_attempts.load(Ordering::SeqCst)
    }

    pub fn top_calls(&self) -> usize {
        self.top_calls.load(Ordering::SeqCst)
    }
}

impl TrendingStore for MockStore {
    async fn increment_search_count(
        &self,
        search_term: &str,
        movie: &TrendingMovie,
    ) -> Result<()> {
        self.increment_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            bail!("trending store unavailable");
        }
        self.increments
            .lock()
            .unwrap()
            .push((String::from(search_term), movie.clone()));
        Ok(())
    }

    async fn top_trending(&self, limit: u32) -> Result<Vec<TrendingRecord>> {
        self.top_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            bail!("trending store unavailable");
        }
        Ok(self
            .records
            .iter()
            .take(usize::try_from(limit).unwrap())
            .cloned()
            .collect())
    }
}

fn status_error(status: u16) -> anyhow::Error {
    TmdbStatusError::from_body(
        status,
        r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#,
    )
    .into()
}

pub fn summary(id: u64, title: &str) -> MovieSummary {
    MovieSummary {
        id,
        title: String::from(title),
        ..MovieSummary::default()
    }
}

/// First three results of a "dune" search.
pub fn dune_results() -> Vec<MovieSummary> {
    vec![
        MovieSummary {
            poster_path: Some(String::from("/d5NXSklXo0qyIYkgV94XAgMIckC.jpg")),
            original_language: Some(String::from("en")),
            release_date: Some(String::from("2021-09-15")),
            vote_average: 7.8,
            ..summary(438_631, "Dune")
        },
        MovieSummary {
            release_date: Some(String::from("1984-12-14")),
            vote_average: 6.2,
            ..summary(841, "Dune")
        },
        MovieSummary {
            release_date: Some(String::from("2024-02-27")),
            vote_average: 8.2,
            ..summary(693_134, "Dune: Part Two")
        },
    ]
}

pub fn record(search_term: &str, count: u32, movie_id: u64, title: &str) -> TrendingRecord {
    TrendingRecord {
        search_term: String::from(search_term),
        count,
        movie_id,
        movie_title: String::from(title),
        poster_url: None,
        updated_at: String::from("2026-01-01T00:00:00.000000Z"),
    }
}

pub fn matrix_detail() -> MovieDetail {
    serde_json::from_str(include_str!("../../../fixtures/tmdb/movie_details_603.json")).unwrap()
}
