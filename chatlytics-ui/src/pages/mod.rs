//! Pages
//!
//! Top-level page components for each route.

pub mod conversation;
pub mod dashboard;
pub mod login;
pub mod signup;

pub use conversation::ConversationInsights;
pub use dashboard::Dashboard;
pub use login::Login;
pub use signup::Signup;
