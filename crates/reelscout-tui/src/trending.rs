//! Trending rail loader.
#![allow(clippy::future_not_send)]

use std::sync::Arc;

use anyhow::Result;
use reelscout_db::{TrendingRecord, TrendingStore};

/// Loads the top trending searches once, when the home view mounts.
///
/// Failures are logged and leave the rail empty; they never reach the
/// listing's error state.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TrendingRail<S> {
    store: Arc<S>,
    limit: u32,
    records: Vec<TrendingRecord>,
    mounted: bool,
}

impl<S> TrendingRail<S>
where
    S: TrendingStore + Sync,
{
    /// Creates an empty, unmounted rail.
    #[must_use]
    pub const fn new(store: Arc<S>, limit: u32) -> Self {
        Self {
            store,
            limit,
            records: Vec::new(),
            mounted: false,
        }
    }

    /// Store shared with the spawned load.
    #[must_use]
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Number of records requested.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Loaded records, best first.
    #[must_use]
    pub fn records(&self) -> &[TrendingRecord] {
        &self.records
    }

    /// Marks the rail mounted. Returns `true` only the first time, when the
    /// caller must issue the load.
    pub const fn mount(&mut self) -> bool {
        if self.mounted {
            return false;
        }
        self.mounted = true;
        true
    }

    /// Stores a finished load.
    pub fn apply(&mut self, result: Result<Vec<TrendingRecord>>) {
        match result {
            Ok(records) => {
                tracing::debug!(count = records.len(), "Trending searches loaded");
                self.records = records;
            }
            Err(e) => {
                tracing::error!("Error fetching trending movies: {e:#}");
                self.records.clear();
            }
        }
    }

    /// Mounts and loads inline; later calls do nothing.
    pub async fn load_on_mount(&mut self) {
        if !self.mount() {
            return;
        }
        let result = self.store.top_trending(self.limit).await;
        self.apply(result);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;
    use crate::test_support::{MockStore, record};

    #[tokio::test]
    async fn test_load_on_mount_fetches_top_records() {
        // Arrange
        let store = Arc::new(MockStore::with_records(vec![
            record("dune", 4, 438_631, "Dune"),
            record("alien", 2, 348, "Alien"),
        ]));
        let mut rail = TrendingRail::new(Arc::clone(&store), 5);

        // Act
        rail.load_on_mount().await;

        // Assert
        assert_eq!(rail.records().len(), 2);
        assert_eq!(rail.records()[0].search_term, "dune");
        assert_eq!(store.top_calls(), 1);
    }

    #[tokio::test]
    async fn test_load_happens_only_once() {
        // Arrange
        let store = Arc::new(MockStore::with_records(vec![record("dune", 1, 438_631, "Dune")]));
        let mut rail = TrendingRail::new(Arc::clone(&store), 5);

        // Act
        rail.load_on_mount().await;
        rail.load_on_mount().await;

        // Assert
        assert_eq!(store.top_calls(), 1);
    }

    #[tokio::test]
    async fn test_limit_is_passed_to_store() {
        // Arrange
        let records = (0..8)
            .map(|i| record(&format!("q{i}"), 8 - i, u64::from(i), "Movie"))
            .collect();
        let store = Arc::new(MockStore::with_records(records));
        let mut rail = TrendingRail::new(Arc::clone(&store), 5);

        // Act
        rail.load_on_mount().await;

        // Assert
        assert_eq!(rail.records().len(), 5);
    }

    #[tokio::test]
    async fn test_failure_leaves_rail_empty() {
        // Arrange
        let store = Arc::new(MockStore::failing());
        let mut rail = TrendingRail::new(Arc::clone(&store), 5);

        // Act
        rail.load_on_mount().await;

        // Assert
        assert!(rail.records().is_empty());
        assert_eq!(store.top_calls(), 1);
    }

    #[test]
    fn test_mount_returns_true_once() {
        // Arrange
        let mut rail = TrendingRail::new(Arc::new(MockStore::default()), 5);

        // Act & Assert
        assert!(rail.mount());
        assert!(!rail.mount());
    }
}
