//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{DiscoverMovieParams, MovieDetail, MovieListResponse, SearchMovieParams};

/// TMDB movie catalog trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait;
/// implement `TmdbApi` so the futures can be spawned onto the runtime.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Searches movies by title (`search/movie`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the status is not a
    /// success (`TmdbStatusError`), or JSON parsing fails.
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<MovieListResponse>;

    /// Lists movies without a text filter (`discover/movie`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the status is not a
    /// success (`TmdbStatusError`), or JSON parsing fails.
    async fn discover_movie(&self, params: &DiscoverMovieParams) -> Result<MovieListResponse>;

    /// Fetches the full record of one movie (`movie/{movie_id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the status is not a
    /// success (`TmdbStatusError`), or JSON parsing fails.
    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetail>;
}
