//! Application context
//!
//! Bundles the injected collaborators (session storage, navigator, API) and
//! hands out the controllers built on them. Construction fails when a
//! collaborator is missing instead of letting a page discover it later.

use std::rc::Rc;
use thiserror::Error;

use crate::api::AnalyticsApi;
use crate::auth::AuthFormController;
use crate::dashboard::DashboardLoader;
use crate::navigation::Navigator;
use crate::session::{SessionContext, SessionGuard, Storage};

/// Errors raised while assembling an [`AppContext`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("Application context is missing its {0}")]
    Missing(&'static str),
}

/// Shared collaborators of every page controller
#[derive(Clone)]
pub struct AppContext {
    session: SessionContext,
    navigator: Rc<dyn Navigator>,
    api: Rc<dyn AnalyticsApi>,
}

impl AppContext {
    pub fn builder() -> AppContextBuilder {
        AppContextBuilder::default()
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn navigator(&self) -> Rc<dyn Navigator> {
        Rc::clone(&self.navigator)
    }

    pub fn guard(&self) -> SessionGuard {
        SessionGuard::new(self.session.clone(), self.navigator())
    }

    pub fn auth_form(&self) -> AuthFormController {
        AuthFormController::new(Rc::clone(&self.api), self.session.clone(), self.navigator())
    }

    /// A fresh loader; each page activation gets its own
    pub fn dashboard_loader(&self) -> DashboardLoader {
        DashboardLoader::new(Rc::clone(&self.api), self.navigator())
    }
}

/// Builder for [`AppContext`]
#[derive(Default)]
pub struct AppContextBuilder {
    storage: Option<Rc<dyn Storage>>,
    navigator: Option<Rc<dyn Navigator>>,
    api: Option<Rc<dyn AnalyticsApi>>,
}

impl AppContextBuilder {
    pub fn storage(mut self, storage: Rc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn navigator(mut self, navigator: Rc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn api(mut self, api: Rc<dyn AnalyticsApi>) -> Self {
        self.api = Some(api);
        self
    }

    pub fn build(self) -> Result<AppContext, ContextError> {
        let storage = self.storage.ok_or(ContextError::Missing("session storage"))?;
        let navigator = self.navigator.ok_or(ContextError::Missing("navigator"))?;
        let api = self.api.ok_or(ContextError::Missing("API client"))?;

        Ok(AppContext {
            session: SessionContext::new(storage),
            navigator,
            api,
        })
    }
}
