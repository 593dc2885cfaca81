//! TMDB API response types and request parameters.

use serde::Deserialize;

use super::POSTER_BASE_URL;

/// Value of the `Response` field that marks an API-level failure.
const API_FAILURE_FLAG: &str = "False";

// --- Listings (search/movie, discover/movie) ---

/// Response from the `search/movie` and `discover/movie` endpoints.
///
/// `Response`/`Error` are absent on normal TMDB payloads. When present with
/// `Response == "False"` the payload signals an API-level failure even
/// though the HTTP status was a success.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieListResponse {
    /// Current page number.
    #[serde(default)]
    pub page: u32,
    /// Movies on this page.
    #[serde(default)]
    pub results: Vec<MovieSummary>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
    /// Explicit success flag (`"True"` / `"False"`).
    #[serde(rename = "Response")]
    pub response: Option<String>,
    /// Failure message accompanying `Response == "False"`.
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl MovieListResponse {
    /// Returns `true` when the payload carries an explicit failure flag.
    #[must_use]
    pub fn is_api_failure(&self) -> bool {
        self.response.as_deref() == Some(API_FAILURE_FLAG)
    }
}

/// A single movie in a listing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    #[serde(default)]
    pub title: String,
    /// Original title.
    pub original_title: Option<String>,
    /// Original language (ISO 639-1).
    pub original_language: Option<String>,
    /// Release date (YYYY-MM-DD or null).
    pub release_date: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Poster image path (e.g. `/abc.jpg`).
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Adult flag.
    #[serde(default)]
    pub adult: bool,
}

impl MovieSummary {
    /// Full w500 poster URL, if the movie has a poster.
    #[must_use]
    pub fn poster_url(&self) -> Option<String> {
        poster_url(self.poster_path.as_deref())
    }
}

// --- Movie Details ---

/// Response from the `movie/{movie_id}` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MovieDetail {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    #[serde(default)]
    pub title: String,
    /// Original title.
    pub original_title: Option<String>,
    /// Original language (ISO 639-1).
    pub original_language: Option<String>,
    /// Release date (YYYY-MM-DD).
    pub release_date: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Tagline.
    pub tagline: Option<String>,
    /// Release status (e.g. "Released").
    pub status: Option<String>,
    /// Official homepage.
    pub homepage: Option<String>,
    /// IMDb ID.
    pub imdb_id: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Budget in US dollars.
    pub budget: Option<u64>,
    /// Revenue in US dollars.
    pub revenue: Option<u64>,
    /// Production companies.
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Adult flag.
    #[serde(default)]
    pub adult: bool,
}

impl MovieDetail {
    /// Full w500 poster URL, if the movie has a poster.
    #[must_use]
    pub fn poster_url(&self) -> Option<String> {
        poster_url(self.poster_path.as_deref())
    }
}

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Production company entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductionCompany {
    /// Company ID.
    pub id: u64,
    /// Company name.
    pub name: String,
    /// Logo image path.
    pub logo_path: Option<String>,
    /// Origin country (ISO 3166-1).
    pub origin_country: Option<String>,
}

/// Builds the w500 poster URL for a poster path.
///
/// Returns `None` for a missing or empty path.
#[must_use]
pub fn poster_url(poster_path: Option<&str>) -> Option<String> {
    poster_path
        .filter(|p| !p.is_empty())
        .map(|p| format!("{POSTER_BASE_URL}{p}"))
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[serde(default)]
    pub success: bool,
}

// --- Request Parameters ---

/// Parameters for the `search/movie` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMovieParams {
    /// Search query (required, URL-encoded on the wire).
    pub query: String,
    /// Response language (TMDB default when `None`).
    pub language: Option<String>,
    /// Filter by year.
    pub year: Option<u32>,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchMovieParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: None,
            year: None,
            include_adult: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the year filter.
    #[must_use]
    pub const fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }
}

/// Parameters for the `discover/movie` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverMovieParams {
    /// Sort order (e.g. `popularity.desc`).
    pub sort_by: String,
    /// Response language (TMDB default when `None`).
    pub language: Option<String>,
}

impl DiscoverMovieParams {
    /// Most popular movies first.
    #[must_use]
    pub fn popular() -> Self {
        Self {
            sort_by: String::from("popularity.desc"),
            language: None,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_list_response_without_results_defaults_empty() {
        // Arrange
        let json = r#"{"page":1}"#;

        // Act
        let response: MovieListResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert!(response.results.is_empty());
        assert!(!response.is_api_failure());
    }

    #[test]
    fn test_list_response_api_failure_flag() {
        // Arrange
        let json = r#"{"Response":"False","Error":"Movie not found!"}"#;

        // Act
        let response: MovieListResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert!(response.is_api_failure());
        assert_eq!(response.error.as_deref(), Some("Movie not found!"));
    }

    #[test]
    fn test_list_response_true_flag_is_not_failure() {
        // Arrange
        let json = r#"{"Response":"True","results":[]}"#;

        // Act
        let response: MovieListResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert!(!response.is_api_failure());
    }

    #[test]
    fn test_summary_with_null_fields() {
        // Arrange
        let json = r#"{"id":42,"title":"Untitled","poster_path":null,"release_date":null}"#;

        // Act
        let movie: MovieSummary = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(movie.id, 42);
        assert!(movie.poster_url().is_none());
        assert_eq!(movie.vote_count, 0);
    }

    #[test]
    fn test_poster_url() {
        // Arrange & Act & Assert
        assert_eq!(
            poster_url(Some("/abc.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
        assert!(poster_url(Some("")).is_none());
        assert!(poster_url(None).is_none());
    }

    #[test]
    fn test_detail_missing_optional_fields() {
        // Arrange
        let json = r#"{"id":7,"title":"Sparse"}"#;

        // Act
        let detail: MovieDetail = serde_json::from_str(json).unwrap();

        // Assert
        assert!(detail.runtime.is_none());
        assert!(detail.budget.is_none());
        assert!(detail.genres.is_empty());
        assert!(detail.production_companies.is_empty());
    }

    #[test]
    fn test_search_params_builder() {
        // Arrange & Act
        let params = SearchMovieParams::new("dune").language("en-US").year(2021);

        // Assert
        assert_eq!(params.query, "dune");
        assert_eq!(params.language.as_deref(), Some("en-US"));
        assert_eq!(params.year, Some(2021));
        assert!(!params.include_adult);
    }

    #[test]
    fn test_discover_popular() {
        // Arrange & Act
        let params = DiscoverMovieParams::popular();

        // Assert
        assert_eq!(params.sort_by, "popularity.desc");
        assert!(params.language.is_none());
    }
}
