//! # Chatlytics
//!
//! Chatbot Analytics - the client side of a conversation analytics
//! dashboard: a session gate, login/signup form controllers and a dashboard
//! loader, written against injected storage, navigation and API seams so
//! the same code drives the browser UI, the CLI and the tests.
//!
//! ## Modules
//!
//! - [`session`]: session flag storage and the page guard
//! - [`auth`]: login/signup form controller
//! - [`dashboard`]: stats + recent conversations loader and tile formatting
//! - [`navigation`]: routes and the navigator capability
//! - [`api`]: backend contract, DTOs and (native) HTTP client
//! - [`context`]: wiring of the collaborators above
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use std::time::Duration;
//! use chatlytics::api::{Endpoints, HttpClient};
//! use chatlytics::context::AppContext;
//! use chatlytics::navigation::HistoryNavigator;
//! use chatlytics::session::MemoryStorage;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = HttpClient::new(Endpoints::new("http://localhost:5000")?, Duration::from_secs(30))?;
//!     let ctx = AppContext::builder()
//!         .storage(Rc::new(MemoryStorage::new()))
//!         .navigator(Rc::new(HistoryNavigator::new()))
//!         .api(Rc::new(api))
//!         .build()?;
//!
//!     ctx.auth_form().submit_login("ops@example.com", "secret").await?;
//!
//!     let loader = ctx.dashboard_loader();
//!     let state = loader.activate(&ctx.guard()).await;
//!     if let Some(snapshot) = state.snapshot() {
//!         println!("Average length: {}", snapshot.tiles().average_length);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
#[cfg(feature = "native")]
pub mod config;
pub mod context;
pub mod dashboard;
pub mod navigation;
pub mod session;

// Re-export top-level types for convenience
pub use api::{AnalyticsApi, ApiError, ApiResult, ConversationRecord, Credentials, DashboardStats};

pub use auth::{AuthError, AuthFormController, ErrorKind};

pub use context::{AppContext, ContextError};

pub use dashboard::{
    ConversationSummary, DashboardLoader, DashboardSnapshot, LoadState, StatTiles,
};

pub use navigation::{HistoryNavigator, Navigator, Route};

pub use session::{Access, MemoryStorage, Session, SessionContext, SessionGuard, Storage};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError};
