//! Text shown for movie cards, the trending rail and detail pages.
//!
//! Missing values render as [`NOT_AVAILABLE`] instead of failing.

use reelscout_api::tmdb::{MOVIE_PAGE_BASE_URL, MovieDetail, MovieSummary};

/// Placeholder for missing values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Separator used when joining genre and company names.
const NAME_SEPARATOR: &str = " \u{2022} ";

/// Currency units per displayed million.
const ONE_MILLION: u64 = 1_000_000;

/// Listing card text for one movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCard {
    /// TMDB movie ID.
    pub id: u64,
    /// Title.
    pub title: String,
    /// Rating to one decimal, or `N/A`.
    pub rating: String,
    /// Original language code, or `N/A`.
    pub language: String,
    /// Release year, or `N/A`.
    pub year: String,
}

impl From<&MovieSummary> for MovieCard {
    fn from(movie: &MovieSummary) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            rating: card_rating(movie.vote_average),
            language: text_or_na(movie.original_language.as_deref()),
            year: release_year(movie.release_date.as_deref()),
        }
    }
}

/// Detail page text for one movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    /// Title.
    pub title: String,
    /// Release year, or `N/A`.
    pub year: String,
    /// Runtime as `{n}m`, or `N/A`.
    pub runtime: String,
    /// Rounded rating as `{n}/10`.
    pub rating: String,
    /// Vote count as `({n} votes)`.
    pub votes: String,
    /// Overview, or `N/A`.
    pub overview: String,
    /// Genre names joined with a bullet, or `N/A`.
    pub genres: String,
    /// Budget in whole millions, or `N/A`.
    pub budget: String,
    /// Revenue in whole millions, or `N/A`.
    pub revenue: String,
    /// Production company names joined with a bullet, or `N/A`.
    pub companies: String,
    /// Poster URL, if any.
    pub poster_url: Option<String>,
    /// TMDB web page.
    pub page_url: String,
}

impl From<&MovieDetail> for DetailView {
    fn from(movie: &MovieDetail) -> Self {
        Self {
            title: movie.title.clone(),
            year: release_year(movie.release_date.as_deref()),
            runtime: runtime(movie.runtime),
            rating: detail_rating(movie.vote_average),
            votes: format!("({} votes)", movie.vote_count),
            overview: text_or_na(movie.overview.as_deref()),
            genres: join_names(movie.genres.iter().map(|g| g.name.as_str())),
            budget: millions(movie.budget),
            revenue: millions(movie.revenue),
            companies: join_names(movie.production_companies.iter().map(|c| c.name.as_str())),
            poster_url: movie.poster_url(),
            page_url: movie_page_url(movie.id),
        }
    }
}

/// Year part of a `YYYY-MM-DD` date.
#[must_use]
pub fn release_year(release_date: Option<&str>) -> String {
    release_date
        .and_then(|d| d.split('-').next())
        .filter(|y| !y.is_empty())
        .map_or_else(|| String::from(NOT_AVAILABLE), String::from)
}

/// Card rating: one decimal, `N/A` for unrated movies.
#[must_use]
pub fn card_rating(vote_average: f64) -> String {
    if vote_average > 0.0 {
        format!("{vote_average:.1}")
    } else {
        String::from(NOT_AVAILABLE)
    }
}

/// Detail rating: rounded to a whole number out of ten.
#[must_use]
pub fn detail_rating(vote_average: f64) -> String {
    format!("{}/10", vote_average.round())
}

/// Runtime in minutes as `{n}m`.
#[must_use]
pub fn runtime(minutes: Option<u32>) -> String {
    minutes
        .filter(|m| *m > 0)
        .map_or_else(|| String::from(NOT_AVAILABLE), |m| format!("{m}m"))
}

/// Currency amount rounded to whole millions (`$464 million`).
///
/// TMDB reports unknown amounts as 0, which renders as `N/A`.
#[must_use]
pub fn millions(amount: Option<u64>) -> String {
    amount.filter(|a| *a > 0).map_or_else(
        || String::from(NOT_AVAILABLE),
        |a| {
            let rounded = a.saturating_add(ONE_MILLION / 2) / ONE_MILLION;
            format!("${rounded} million")
        },
    )
}

/// Joins names with a bullet separator, `N/A` when empty.
#[must_use]
pub fn join_names<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let joined = names
        .into_iter()
        .filter(|n| !n.is_empty())
        .collect::<Vec<_>>()
        .join(NAME_SEPARATOR);
    if joined.is_empty() {
        String::from(NOT_AVAILABLE)
    } else {
        joined
    }
}

/// Text value, `N/A` when missing or blank.
#[must_use]
pub fn text_or_na(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map_or_else(|| String::from(NOT_AVAILABLE), String::from)
}

/// TMDB web page for a movie.
#[must_use]
pub fn movie_page_url(movie_id: u64) -> String {
    format!("{MOVIE_PAGE_BASE_URL}/{movie_id}")
}
