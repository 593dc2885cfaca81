//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie endpoints
//! (`search/movie`, `discover/movie`, `movie/{id}`).

mod api;
mod client;
mod error;
mod rate_limiter;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_BASE_URL, TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use error::TmdbStatusError;
pub use types::{
    DiscoverMovieParams, Genre, MovieDetail, MovieListResponse, MovieSummary, ProductionCompany,
    SearchMovieParams, TmdbErrorResponse, poster_url,
};

/// Base URL for w500 poster images.
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Base URL for movie pages on the TMDB website.
pub const MOVIE_PAGE_BASE_URL: &str = "https://www.themoviedb.org/movie";
