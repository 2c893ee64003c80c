//! State Management
//!
//! Browser-side implementations of the session storage and navigation
//! seams, plus the app-wide notice state.

pub mod notice;
pub mod router;
pub mod storage;

pub use notice::{provide_notice_state, NoticeState};
pub use router::RouterNavigator;
pub use storage::BrowserStorage;
