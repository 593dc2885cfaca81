//! Trending search counter store.
//!
//! Uses `rusqlite` (bundled `SQLite`) to count committed searches per
//! query and to rank queries for the trending rail.

mod connection;
mod migrations;
/// Trending counter operations and the store trait.
pub mod trending;

#[allow(clippy::module_name_repetitions)]
pub use connection::{open_db, resolve_data_dir};
pub use trending::{
    LocalTrendingStore, SqliteTrendingStore, TrendingMovie, TrendingRecord, TrendingStore,
    increment_search_count, load_top_trending,
};
