/// Lifecycle of one view's remote data.
///
/// Each request moves `Loading` before reaching `Success` or `Error`;
/// a new request re-enters `Loading`.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// No request issued yet.
    Idle,
    /// A request is in flight.
    Loading,
    /// The latest request succeeded.
    Success(T),
    /// The latest request failed with a displayable message.
    Error(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> FetchState<T> {
    /// Returns `true` while a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns `true` before any request was issued.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Loaded data, if the latest request succeeded.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Error message, if the latest request failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        // Arrange & Act
        let state: FetchState<Vec<u32>> = FetchState::default();

        // Assert
        assert!(state.is_idle());
        assert!(!state.is_loading());
        assert!(state.data().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_accessors_match_variant() {
        // Arrange
        let loaded = FetchState::Success(vec![1, 2]);
        let failed: FetchState<Vec<u32>> = FetchState::Error(String::from("boom"));

        // Act & Assert
        assert_eq!(loaded.data(), Some(&vec![1, 2]));
        assert!(loaded.error().is_none());
        assert_eq!(failed.error(), Some("boom"));
        assert!(failed.data().is_none());
        assert!(FetchState::<()>::Loading.is_loading());
    }
}
