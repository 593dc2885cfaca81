//! Movie discovery controllers and terminal browser.
//!
//! The controllers own the fetch lifecycle of each view and are usable
//! without a terminal; [`browser`] drives them from a ratatui event loop.

/// Interactive terminal browser.
pub mod browser;
/// Input debouncing.
pub mod debounce;
/// Detail view controller.
pub mod detail;
/// Per-view fetch lifecycle.
pub mod fetch_state;
/// Display formatting for listings and detail pages.
pub mod format;
/// Navigation between the home and movie routes.
pub mod router;
/// Debounced query controller.
pub mod search;
/// Runtime settings shared by the controllers.
pub mod settings;
/// Trending rail loader.
pub mod trending;

#[cfg(test)]
mod test_support;

pub use browser::run_browser;
pub use debounce::Debouncer;
pub use detail::{DetailController, DetailTicket};
pub use fetch_state::FetchState;
pub use router::{Route, Router};
pub use search::{RequestTicket, SearchController, TrendingUpdate};
pub use settings::Settings;
pub use trending::TrendingRail;
