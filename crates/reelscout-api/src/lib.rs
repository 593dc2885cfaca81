//! Movie catalog client library for reelscout.
//!
//! Wraps the TMDB v3 listing and detail endpoints used by the search,
//! discover and detail views.

/// TMDB API client.
pub mod tmdb;
