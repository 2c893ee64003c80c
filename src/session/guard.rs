//! Session Guard
//!
//! Gates protected pages on the session flag and owns logout.

use std::rc::Rc;

use super::{Session, SessionContext, StorageResult};
use crate::navigation::{Navigator, Route};

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Session is authenticated; dependent components may proceed
    Granted(Session),
    /// Not authenticated; navigation to the login surface was issued
    Redirected,
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted(_))
    }
}

/// Guard run on every protected page activation
#[derive(Clone)]
pub struct SessionGuard {
    session: SessionContext,
    navigator: Rc<dyn Navigator>,
}

impl SessionGuard {
    pub fn new(session: SessionContext, navigator: Rc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }

    /// Check the session, redirecting to login when it is absent
    pub fn check(&self) -> Access {
        let session = self.session.get();
        if session.authenticated {
            Access::Granted(session)
        } else {
            tracing::info!("No authenticated session, redirecting to login");
            self.navigator.go_to(Route::Login, &[]);
            Access::Redirected
        }
    }

    /// On the login surface: send an already signed-in user to the dashboard
    ///
    /// Returns `true` when a redirect was issued.
    pub fn redirect_if_authenticated(&self) -> bool {
        if self.session.is_authenticated() {
            tracing::info!("Already authenticated, redirecting to dashboard");
            self.navigator.go_to(Route::Dashboard, &[]);
            true
        } else {
            false
        }
    }

    /// Clear the session and return to the login surface
    pub fn logout(&self) -> StorageResult<()> {
        self.session.clear()?;
        self.navigator.go_to(Route::Login, &[]);
        Ok(())
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::HistoryNavigator;

    fn guard() -> (SessionGuard, SessionContext, Rc<HistoryNavigator>) {
        let session = SessionContext::in_memory();
        let nav = Rc::new(HistoryNavigator::new());
        (SessionGuard::new(session.clone(), nav.clone()), session, nav)
    }

    #[test]
    fn test_anonymous_is_redirected() {
        let (guard, _, nav) = guard();
        assert_eq!(guard.check(), Access::Redirected);
        assert_eq!(nav.visited(), vec!["/login"]);
    }

    #[test]
    fn test_authenticated_is_granted_without_navigation() {
        let (guard, session, nav) = guard();
        session.set_authenticated("a@b.com").unwrap();

        let access = guard.check();
        assert!(access.is_granted());
        assert_eq!(
            access,
            Access::Granted(Session {
                authenticated: true,
                email: Some("a@b.com".to_string()),
            })
        );
        assert!(nav.visited().is_empty());
    }

    #[test]
    fn test_login_page_redirect() {
        let (guard, session, nav) = guard();
        assert!(!guard.redirect_if_authenticated());
        assert!(nav.visited().is_empty());

        session.set_authenticated("a@b.com").unwrap();
        assert!(guard.redirect_if_authenticated());
        assert_eq!(nav.visited(), vec!["/dashboard"]);
    }

    #[test]
    fn test_logout_clears_and_redirects() {
        let (guard, session, nav) = guard();
        session.set_authenticated("a@b.com").unwrap();

        guard.logout().unwrap();
        assert_eq!(session.get(), Session::anonymous());
        assert_eq!(nav.current().as_deref(), Some("/login"));
    }
}
