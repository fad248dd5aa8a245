//! Driven port for page navigation.

use std::sync::{Mutex, PoisonError};

use crate::domain::Route;

/// Port that moves the user to another page.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Navigate to `route`.
    fn navigate(&self, route: Route);
}

/// Navigator that remembers every route it was sent to.
///
/// The CLI uses it to report redirects; tests use it to assert on them.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    /// Navigator with an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent route, if any navigation happened.
    pub fn current(&self) -> Option<Route> {
        self.history().last().copied()
    }

    /// Every route visited, oldest first.
    pub fn history(&self) -> Vec<Route> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(route = %route, "navigating");
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route);
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn records_routes_in_order() {
        let navigator = RecordingNavigator::new();
        assert_eq!(navigator.current(), None);

        navigator.navigate(Route::Student);
        navigator.navigate(Route::Entry);

        assert_eq!(navigator.current(), Some(Route::Entry));
        assert_eq!(navigator.history(), vec![Route::Student, Route::Entry]);
    }
}
