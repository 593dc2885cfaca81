//! Trending search counter operations.
#![allow(clippy::future_not_send)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::connection::open_db;

/// Timestamp format stored in `created_at` / `updated_at`.
///
/// Fixed-width UTC so lexical order equals chronological order.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Representative movie recorded for a search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingMovie {
    /// TMDB movie ID.
    pub movie_id: u64,
    /// Movie title.
    pub title: String,
    /// Full poster URL (nullable).
    pub poster_url: Option<String>,
}

/// A search term with its counter and representative movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingRecord {
    /// Committed search query.
    pub search_term: String,
    /// Number of committed searches for this term.
    pub count: u32,
    /// TMDB movie ID of the first result seen for this term.
    pub movie_id: u64,
    /// Title of the representative movie.
    pub movie_title: String,
    /// Poster URL of the representative movie (nullable).
    pub poster_url: Option<String>,
    /// Last increment timestamp.
    pub updated_at: String,
}

/// Increments the counter for `search_term`, creating the record on first use.
///
/// The representative movie is recorded on creation only; later increments
/// bump `count` and `updated_at` and keep the first movie.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn increment_search_count(
    conn: &Connection,
    search_term: &str,
    movie: &TrendingMovie,
    now: DateTime<Utc>,
) -> Result<()> {
    let timestamp = now.format(TIMESTAMP_FORMAT).to_string();

    conn.execute(
        "INSERT INTO trending_searches (
            search_term, count, movie_id, movie_title, poster_url, created_at, updated_at
        ) VALUES (?1, 1, ?2, ?3, ?4, ?5, ?5)
        ON CONFLICT(search_term) DO UPDATE SET
            count = trending_searches.count + 1,
            updated_at = excluded.updated_at",
        rusqlite::params![
            search_term,
            movie.movie_id,
            movie.title,
            movie.poster_url,
            timestamp,
        ],
    )
    .with_context(|| format!("failed to increment search count for {search_term:?}"))?;

    Ok(())
}

/// Loads the top `limit` records ordered by count, most recent first on ties.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn load_top_trending(conn: &Connection, limit: u32) -> Result<Vec<TrendingRecord>> {
    let mut stmt = conn
        .prepare(
            "SELECT search_term, count, movie_id, movie_title, poster_url, updated_at
             FROM trending_searches
             ORDER BY count DESC, updated_at DESC
             LIMIT ?1",
        )
        .context("failed to prepare trending query")?;

    let rows = stmt
        .query_map([limit], |row| {
            Ok(TrendingRecord {
                search_term: row.get(0)?,
                count: row.get(1)?,
                movie_id: row.get(2)?,
                movie_title: row.get(3)?,
                poster_url: row.get(4)?,
                updated_at: row.get(5)?,
            })
        })
        .context("failed to query trending searches")?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row.context("failed to read trending row")?);
    }
    Ok(records)
}

/// Trending counter store trait.
///
/// Abstracts the counter backend for mock substitution in tests.
/// Implement `TrendingStore` so the futures can be spawned onto the runtime.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TrendingStore: Send)]
pub trait LocalTrendingStore {
    /// Increments the counter for `search_term`, creating it with `movie` if new.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    async fn increment_search_count(&self, search_term: &str, movie: &TrendingMovie)
    -> Result<()>;

    /// Returns the top `limit` records by descending count.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    async fn top_trending(&self, limit: u32) -> Result<Vec<TrendingRecord>>;
}

/// `SQLite`-backed trending store.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct SqliteTrendingStore {
    conn: Mutex<Connection>,
}

impl SqliteTrendingStore {
    /// Opens the store in the data directory (see [`open_db`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(dir: Option<&PathBuf>) -> Result<Self> {
        let conn = open_db(dir)?;
        Ok(Self::from_connection(conn))
    }

    /// Wraps an already migrated connection.
    #[must_use]
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

impl TrendingStore for SqliteTrendingStore {
    #[tracing::instrument(skip_all, fields(search_term = search_term))]
    async fn increment_search_count(
        &self,
        search_term: &str,
        movie: &TrendingMovie,
    ) -> Result<()> {
        let conn = self.conn.lock().await;
        increment_search_count(&conn, search_term, movie, Utc::now())?;
        tracing::debug!(movie_id = movie.movie_id, "Incremented search count");
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(limit = limit))]
    async fn top_trending(&self, limit: u32) -> Result<Vec<TrendingRecord>> {
        let conn = self.conn.lock().await;
        load_top_trending(&conn, limit)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use chrono::TimeZone;

    use super::super::migrations::run_migrations;
    use super::*;

    fn setup_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn movie(id: u64, title: &str) -> TrendingMovie {
        TrendingMovie {
            movie_id: id,
            title: String::from(title),
            poster_url: Some(format!("https://image.tmdb.org/t/p/w500/{id}.jpg")),
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_increment_creates_record() {
        // Arrange
        let conn = setup_db();

        // Act
        increment_search_count(&conn, "dune", &movie(438_631, "Dune"), at(0)).unwrap();

        // Assert
        let records = load_top_trending(&conn, 5).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].search_term, "dune");
        assert_eq!(records[0].count, 1);
        assert_eq!(records[0].movie_id, 438_631);
        assert_eq!(records[0].movie_title, "Dune");
        assert_eq!(
            records[0].poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/438631.jpg")
        );
    }

    #[test]
    fn test_increment_existing_keeps_first_movie() {
        // Arrange
        let conn = setup_db();
        increment_search_count(&conn, "dune", &movie(438_631, "Dune"), at(0)).unwrap();

        // Act
        increment_search_count(&conn, "dune", &movie(693_134, "Dune: Part Two"), at(10)).unwrap();

        // Assert
        let records = load_top_trending(&conn, 5).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].count, 2);
        assert_eq!(records[0].movie_id, 438_631);
        assert_eq!(records[0].movie_title, "Dune");
        assert_eq!(records[0].updated_at, "2023-11-14T22:13:30.000000Z");
    }

    #[test]
    fn test_top_trending_orders_by_count_desc() {
        // Arrange
        let conn = setup_db();
        increment_search_count(&conn, "matrix", &movie(603, "The Matrix"), at(0)).unwrap();
        for i in 0..3 {
            increment_search_count(&conn, "dune", &movie(438_631, "Dune"), at(i)).unwrap();
        }
        for i in 0..2 {
            increment_search_count(&conn, "alien", &movie(348, "Alien"), at(i)).unwrap();
        }

        // Act
        let records = load_top_trending(&conn, 5).unwrap();

        // Assert
        let terms: Vec<&str> = records.iter().map(|r| r.search_term.as_str()).collect();
        assert_eq!(terms, vec!["dune", "alien", "matrix"]);
    }

    #[test]
    fn test_top_trending_ties_prefer_recent() {
        // Arrange
        let conn = setup_db();
        increment_search_count(&conn, "older", &movie(1, "Older"), at(0)).unwrap();
        increment_search_count(&conn, "newer", &movie(2, "Newer"), at(60)).unwrap();

        // Act
        let records = load_top_trending(&conn, 5).unwrap();

        // Assert
        assert_eq!(records[0].search_term, "newer");
        assert_eq!(records[1].search_term, "older");
    }

    #[test]
    fn test_top_trending_respects_limit() {
        // Arrange
        let conn = setup_db();
        for (i, term) in ["a", "b", "c", "d", "e", "f", "g"].iter().enumerate() {
            let id = u64::try_from(i).unwrap();
            increment_search_count(&conn, term, &movie(id, term), at(i64::try_from(i).unwrap()))
                .unwrap();
        }

        // Act
        let records = load_top_trending(&conn, 5).unwrap();

        // Assert
        assert_eq!(records.len(), 5);
    }

    #[test]
    fn test_top_trending_empty() {
        // Arrange
        let conn = setup_db();

        // Act
        let records = load_top_trending(&conn, 5).unwrap();

        // Assert
        assert!(records.is_empty());
    }

    #[test]
    fn test_search_terms_are_case_sensitive() {
        // Arrange
        let conn = setup_db();

        // Act
        increment_search_count(&conn, "Dune", &movie(438_631, "Dune"), at(0)).unwrap();
        increment_search_count(&conn, "dune", &movie(438_631, "Dune"), at(1)).unwrap();

        // Assert
        assert_eq!(load_top_trending(&conn, 5).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_sqlite_store_round_trip_through_trait() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteTrendingStore::open(Some(&dir.path().to_path_buf())).unwrap();

        // Act
        TrendingStore::increment_search_count(&store, "dune", &movie(438_631, "Dune"))
            .await
            .unwrap();
        TrendingStore::increment_search_count(&store, "dune", &movie(438_631, "Dune"))
            .await
            .unwrap();
        let records = TrendingStore::top_trending(&store, 5).await.unwrap();

        // Assert
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].count, 2);
    }

    #[tokio::test]
    async fn test_sqlite_store_persists_across_reopen() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_path_buf();
        {
            let store = SqliteTrendingStore::open(Some(&path)).unwrap();
            TrendingStore::increment_search_count(&store, "alien", &movie(348, "Alien"))
                .await
                .unwrap();
        }

        // Act
        let store = SqliteTrendingStore::open(Some(&path)).unwrap();
        let records = TrendingStore::top_trending(&store, 5).await.unwrap();

        // Assert
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].search_term, "alien");
    }

    #[test]
    fn test_store_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SqliteTrendingStore>();
    }
}
