//! Dashboard Loader
//!
//! Loads the aggregate stats and the recent-conversations list for the
//! dashboard and exposes the lifecycle to the rendering surface:
//!
//! ```text
//! Idle --activate/load--> Loading --+--> Ready(snapshot)
//!                                   +--> Failed(message)
//! ```
//!
//! Both fetches run concurrently. Only a stats failure fails the load; a
//! conversations failure degrades to an empty list. Stats and conversations
//! are published together in a single transition.

pub mod format;

pub use format::{format_count, format_duration, format_rate, StatTiles};

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::api::{AnalyticsApi, ConversationId, ConversationRecord, DashboardStats};
use crate::navigation::{Navigator, Route};
use crate::session::{Access, SessionGuard};

/// A conversation plus its zero-based position in one fetched sequence
///
/// The index is a navigation key for this sequence only, not an identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationSummary {
    pub index: usize,
    pub record: ConversationRecord,
}

impl ConversationSummary {
    pub fn id(&self) -> &ConversationId {
        &self.record.id
    }
}

/// Assign each record its position in fetch order
pub fn index_conversations(records: Vec<ConversationRecord>) -> Vec<ConversationSummary> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| ConversationSummary { index, record })
        .collect()
}

/// Stats and conversations of one completed load
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub conversations: Vec<ConversationSummary>,
}

impl DashboardSnapshot {
    pub fn tiles(&self) -> StatTiles {
        StatTiles::from(&self.stats)
    }
}

/// Lifecycle of a dashboard load
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready(DashboardSnapshot),
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        match self {
            LoadState::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

type Listener = Rc<dyn Fn(&LoadState)>;

/// Loads dashboard data once per page activation
pub struct DashboardLoader {
    api: Rc<dyn AnalyticsApi>,
    navigator: Rc<dyn Navigator>,
    state: RefCell<LoadState>,
    disposed: Cell<bool>,
    listeners: RefCell<Vec<Listener>>,
}

impl DashboardLoader {
    pub fn new(api: Rc<dyn AnalyticsApi>, navigator: Rc<dyn Navigator>) -> Self {
        Self {
            api,
            navigator,
            state: RefCell::new(LoadState::Idle),
            disposed: Cell::new(false),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Observe every state transition
    pub fn on_transition(&self, listener: impl Fn(&LoadState) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Run the session guard, then load if access was granted
    ///
    /// A redirected activation stays `Idle` and issues no fetch.
    pub async fn activate(&self, guard: &SessionGuard) -> LoadState {
        match guard.check() {
            Access::Granted(_) => self.load().await,
            Access::Redirected => self.state(),
        }
    }

    /// Fetch stats and recent conversations
    ///
    /// Only the first call on an `Idle` loader fetches; later calls return
    /// the current state unchanged.
    pub async fn load(&self) -> LoadState {
        let idle = matches!(*self.state.borrow(), LoadState::Idle);
        if !idle || self.disposed.get() {
            tracing::debug!("Dashboard load skipped, loader not idle");
            return self.state();
        }

        self.transition(LoadState::Loading);

        let (stats, conversations) = futures_util::join!(
            self.api.dashboard_stats(),
            self.api.recent_conversations()
        );

        if self.disposed.get() {
            tracing::debug!("Dashboard torn down mid-fetch, discarding response");
            return self.state();
        }

        let next = match stats {
            Ok(stats) => {
                let conversations = match conversations {
                    Ok(records) => index_conversations(records),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to fetch recent conversations");
                        Vec::new()
                    }
                };
                tracing::info!(
                    conversations = conversations.len(),
                    "Dashboard data loaded"
                );
                LoadState::Ready(DashboardSnapshot {
                    stats,
                    conversations,
                })
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch dashboard stats");
                LoadState::Failed(e.to_string())
            }
        };

        self.transition(next.clone());
        next
    }

    /// Tear the loader down; responses arriving later are dropped
    pub fn dispose(&self) {
        self.disposed.set(true);
    }

    /// Conversation at `index` in the currently loaded sequence
    pub fn conversation(&self, index: usize) -> Option<ConversationSummary> {
        self.state
            .borrow()
            .snapshot()
            .and_then(|s| s.conversations.get(index).cloned())
    }

    /// Open the detail view of a loaded conversation
    ///
    /// Returns `false` and stays put when `index` is not in the sequence.
    pub fn select_conversation(&self, index: usize) -> bool {
        if self.conversation(index).is_none() {
            tracing::warn!(index, "Selected conversation is not loaded");
            return false;
        }

        let index = index.to_string();
        self.navigator
            .go_to(Route::ConversationInsights, &[("index", index.as_str())]);
        true
    }

    /// Listeners run with no borrow held and may call back into the loader
    fn transition(&self, next: LoadState) {
        *self.state.borrow_mut() = next.clone();
        let listeners: Vec<Listener> = self.listeners.borrow().clone();
        for listener in &listeners {
            listener(&next);
        }
    }
}
