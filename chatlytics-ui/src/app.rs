//! App Root Component
//!
//! Routing, the injected application context and global providers.

use chatlytics::navigation::Route as AppRoute;
use chatlytics::AppContext;
use leptos::*;
use leptos_router::*;
use std::rc::Rc;

use crate::api::GlooClient;
use crate::components::Toast;
use crate::pages::{ConversationInsights, Dashboard, Login, Signup};
use crate::state::{provide_notice_state, BrowserStorage, RouterNavigator};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_notice_state();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                <main class="flex-1 container mx-auto px-4 py-8">
                    <Shell />
                </main>

                // Toast notifications
                <Toast />
            </div>
        </Router>
    }
}

/// Assemble the application context, then render the routes
///
/// Lives inside `<Router>` because the navigator needs `use_navigate()`.
#[component]
fn Shell() -> impl IntoView {
    let navigator = RouterNavigator::new(use_navigate());

    let context = GlooClient::from_local_storage()
        .map_err(|e| e.to_string())
        .and_then(|api| {
            AppContext::builder()
                .storage(Rc::new(BrowserStorage::new()))
                .navigator(Rc::new(navigator))
                .api(Rc::new(api))
                .build()
                .map_err(|e| e.to_string())
        });

    match context {
        Ok(ctx) => {
            provide_context(ctx);
            view! {
                <Routes>
                    <Route path=AppRoute::Login.path() view=Login />
                    <Route path=AppRoute::Signup.path() view=Signup />
                    <Route path=AppRoute::Dashboard.path() view=Dashboard />
                    <Route path=AppRoute::ConversationInsights.path() view=ConversationInsights />
                    <Route path="/" view=|| view! { <Redirect path=AppRoute::Dashboard.path() /> } />
                    <Route path="/*any" view=NotFound />
                </Routes>
            }
            .into_view()
        }
        Err(message) => {
            web_sys::console::error_1(&format!("Failed to start: {}", message).into());
            view! { <StartupError message /> }.into_view()
        }
    }
}

#[component]
fn StartupError(message: String) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <h1 class="text-3xl font-bold mb-2">"Dashboard unavailable"</h1>
            <p class="text-gray-400">{message}</p>
        </div>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href=AppRoute::Dashboard.path()
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Go to Dashboard"
            </A>
        </div>
    }
}
