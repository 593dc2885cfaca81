use std::time::Duration;

use crate::debounce::DEFAULT_DEBOUNCE;

/// Default number of trending records shown in the rail.
pub const DEFAULT_TRENDING_LIMIT: u32 = 5;

/// Settings resolved once at startup and passed to the controllers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Quiet period before typed text becomes the committed query.
    pub debounce: Duration,
    /// Number of records loaded into the trending rail.
    pub trending_limit: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            trending_limit: DEFAULT_TRENDING_LIMIT,
        }
    }
}
