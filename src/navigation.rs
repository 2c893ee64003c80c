//! Navigation
//!
//! Routes of the presentation layer and the [`Navigator`] capability that
//! controllers use to move between them.

use std::cell::RefCell;
use std::fmt;

/// Surfaces the controllers can navigate to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Signup,
    Dashboard,
    /// Detail view of one conversation, addressed by the `index` query parameter
    ConversationInsights,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::Dashboard => "/dashboard",
            Route::ConversationInsights => "/conversation-insights",
        }
    }

    /// Route served at `path`, ignoring any query string
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split('?').next().unwrap_or(path);
        match path.trim_end_matches('/') {
            "/login" => Some(Route::Login),
            "/signup" => Some(Route::Signup),
            "/dashboard" => Some(Route::Dashboard),
            "/conversation-insights" => Some(Route::ConversationInsights),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Location string for a route plus query parameters
pub fn href(route: Route, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return route.path().to_string();
    }

    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", route.path(), query)
}

/// Read the ordinal `index` query parameter of a detail location
pub fn parse_index_param(value: Option<&str>) -> Option<usize> {
    value.and_then(|v| v.trim().parse().ok())
}

/// One-way navigation capability injected into every controller
pub trait Navigator {
    fn go_to(&self, route: Route, params: &[(&str, &str)]);
}

/// Navigator that records every location it was sent to
///
/// Backs the CLI, which has no real router, and the tests.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    visited: RefCell<Vec<String>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// All locations in visit order
    pub fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }

    /// Most recent location, if any navigation happened
    pub fn current(&self) -> Option<String> {
        self.visited.borrow().last().cloned()
    }

    /// Number of navigations to `route`, regardless of parameters
    pub fn count(&self, route: Route) -> usize {
        self.visited
            .borrow()
            .iter()
            .filter(|loc| Route::from_path(loc) == Some(route))
            .count()
    }
}

impl Navigator for HistoryNavigator {
    fn go_to(&self, route: Route, params: &[(&str, &str)]) {
        let location = href(route, params);
        tracing::info!(location = %location, "Navigating");
        self.visited.borrow_mut().push(location);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_href_encodes_params() {
        assert_eq!(href(Route::Dashboard, &[]), "/dashboard");
        assert_eq!(
            href(Route::ConversationInsights, &[("index", "3")]),
            "/conversation-insights?index=3"
        );
        assert_eq!(
            href(Route::Login, &[("next", "/dashboard?x=1")]),
            "/login?next=%2Fdashboard%3Fx%3D1"
        );
    }

    #[test]
    fn test_route_from_path() {
        assert_eq!(Route::from_path("/login"), Some(Route::Login));
        assert_eq!(
            Route::from_path("/conversation-insights?index=2"),
            Some(Route::ConversationInsights)
        );
        assert_eq!(Route::from_path("/dashboard/"), Some(Route::Dashboard));
        assert_eq!(Route::from_path("/settings"), None);
    }

    #[test]
    fn test_parse_index_param() {
        assert_eq!(parse_index_param(Some("4")), Some(4));
        assert_eq!(parse_index_param(Some("-1")), None);
        assert_eq!(parse_index_param(Some("abc")), None);
        assert_eq!(parse_index_param(None), None);
    }

    #[test]
    fn test_history_navigator_records() {
        let nav = HistoryNavigator::new();
        assert_eq!(nav.current(), None);

        nav.go_to(Route::Login, &[]);
        nav.go_to(Route::ConversationInsights, &[("index", "0")]);

        assert_eq!(nav.visited(), vec!["/login", "/conversation-insights?index=0"]);
        assert_eq!(nav.count(Route::Login), 1);
        assert_eq!(nav.count(Route::Dashboard), 0);
        assert_eq!(nav.current().as_deref(), Some("/conversation-insights?index=0"));
    }
}
