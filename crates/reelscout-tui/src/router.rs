/// A logical screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Listing, search box and trending rail.
    Home,
    /// Detail page of one movie.
    Movie(u64),
}

/// Navigation history. The bottom entry is always [`Route::Home`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    history: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Starts at the home route.
    #[must_use]
    pub fn new() -> Self {
        Self {
            history: vec![Route::Home],
        }
    }

    /// Route currently shown.
    #[must_use]
    pub fn current(&self) -> Route {
        self.history.last().copied().unwrap_or(Route::Home)
    }

    /// Navigates to `route`.
    pub fn push(&mut self, route: Route) {
        self.history.push(route);
    }

    /// Returns to the previous entry. Returns the new route, or `None` at home.
    pub fn go_back(&mut self) -> Option<Route> {
        if self.history.len() <= 1 {
            return None;
        }
        self.history.pop();
        Some(self.current())
    }

    /// Number of entries in the history.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_home() {
        // Arrange & Act
        let router = Router::new();

        // Assert
        assert_eq!(router.current(), Route::Home);
        assert_eq!(router.depth(), 1);
    }

    #[test]
    fn test_push_and_go_back() {
        // Arrange
        let mut router = Router::new();
        router.push(Route::Movie(603));
        router.push(Route::Movie(550));

        // Act & Assert
        assert_eq!(router.current(), Route::Movie(550));
        assert_eq!(router.go_back(), Some(Route::Movie(603)));
        assert_eq!(router.go_back(), Some(Route::Home));
    }

    #[test]
    fn test_go_back_never_leaves_home() {
        // Arrange
        let mut router = Router::new();

        // Act
        let result = router.go_back();

        // Assert
        assert!(result.is_none());
        assert_eq!(router.current(), Route::Home);
        assert_eq!(router.depth(), 1);
    }
}
