//! UI Components
//!
//! Reusable Leptos components for the dashboard pages.

pub mod conversation_tile;
pub mod loading;
pub mod stat_tile;
pub mod toast;

pub use conversation_tile::{format_started, ConversationTile};
pub use loading::{InlineLoading, Loading};
pub use stat_tile::StatTile;
pub use toast::Toast;
