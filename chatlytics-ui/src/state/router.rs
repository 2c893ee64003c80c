//! Leptos router navigation

use chatlytics::navigation::{href, Navigator, Route};
use leptos_router::NavigateOptions;
use std::rc::Rc;

/// Navigator that hands locations to the Leptos router
///
/// Must be created inside `<Router>`, from the function returned by
/// `use_navigate()`.
#[derive(Clone)]
pub struct RouterNavigator {
    navigate: Rc<dyn Fn(&str, NavigateOptions)>,
}

impl RouterNavigator {
    pub fn new(navigate: impl Fn(&str, NavigateOptions) + 'static) -> Self {
        Self {
            navigate: Rc::new(navigate),
        }
    }
}

impl Navigator for RouterNavigator {
    fn go_to(&self, route: Route, params: &[(&str, &str)]) {
        let location = href(route, params);
        (self.navigate)(&location, NavigateOptions::default());
    }
}
