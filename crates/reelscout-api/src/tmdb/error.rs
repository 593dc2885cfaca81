//! Transport-level TMDB error.

use std::fmt;

use super::types::TmdbErrorResponse;

/// A TMDB request that completed with a non-success HTTP status.
///
/// Returned inside `anyhow::Error`; callers recover the status with
/// `err.downcast_ref::<TmdbStatusError>()`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbStatusError {
    /// HTTP status code.
    pub status: u16,
    /// TMDB error code from the body, when the body was a TMDB error object.
    pub status_code: Option<u32>,
    /// TMDB status message, or the raw body.
    pub message: String,
}

impl TmdbStatusError {
    /// Builds the error from a response status and raw body.
    #[must_use]
    pub fn from_body(status: u16, body: &str) -> Self {
        serde_json::from_str::<TmdbErrorResponse>(body).map_or_else(
            |_| Self {
                status,
                status_code: None,
                message: String::from(body),
            },
            |parsed| Self {
                status,
                status_code: Some(parsed.status_code),
                message: parsed.status_message,
            },
        )
    }
}

impl fmt::Display for TmdbStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(
                f,
                "TMDB API error (HTTP {}): code={code}, message={}",
                self.status, self.message
            ),
            None => write!(f, "TMDB API error (HTTP {}): {}", self.status, self.message),
        }
    }
}

impl std::error::Error for TmdbStatusError {}
