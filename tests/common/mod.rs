//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chatlytics::api::{
    AnalyticsApi, ApiError, ApiResult, ConversationRecord, Credentials, DashboardStats,
};
use chatlytics::{AppContext, HistoryNavigator, MemoryStorage};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Scripted backend that counts every call it receives
pub struct MockApi {
    pub login: RefCell<ApiResult<()>>,
    pub signup: RefCell<ApiResult<()>>,
    pub stats: RefCell<ApiResult<DashboardStats>>,
    pub conversations: RefCell<ApiResult<Vec<ConversationRecord>>>,
    pub auth_calls: Cell<usize>,
    pub fetch_calls: Cell<usize>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            login: RefCell::new(Ok(())),
            signup: RefCell::new(Ok(())),
            stats: RefCell::new(Ok(DashboardStats::default())),
            conversations: RefCell::new(Ok(Vec::new())),
            auth_calls: Cell::new(0),
            fetch_calls: Cell::new(0),
        }
    }
}

impl MockApi {
    pub fn total_calls(&self) -> usize {
        self.auth_calls.get() + self.fetch_calls.get()
    }
}

#[async_trait(?Send)]
impl AnalyticsApi for MockApi {
    async fn login(&self, _credentials: &Credentials) -> ApiResult<()> {
        self.auth_calls.set(self.auth_calls.get() + 1);
        self.login.borrow().clone()
    }

    async fn signup(&self, _credentials: &Credentials) -> ApiResult<()> {
        self.auth_calls.set(self.auth_calls.get() + 1);
        self.signup.borrow().clone()
    }

    async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        self.fetch_calls.set(self.fetch_calls.get() + 1);
        self.stats.borrow().clone()
    }

    async fn recent_conversations(&self) -> ApiResult<Vec<ConversationRecord>> {
        self.fetch_calls.set(self.fetch_calls.get() + 1);
        self.conversations.borrow().clone()
    }
}

/// Everything a test needs to drive and inspect one page session
pub struct Harness {
    pub ctx: AppContext,
    pub api: Rc<MockApi>,
    pub storage: Rc<MemoryStorage>,
    pub nav: Rc<HistoryNavigator>,
}

pub fn harness(api: MockApi) -> Harness {
    let api = Rc::new(api);
    let storage = Rc::new(MemoryStorage::new());
    let nav = Rc::new(HistoryNavigator::new());

    let ctx = AppContext::builder()
        .storage(storage.clone())
        .navigator(nav.clone())
        .api(api.clone())
        .build()
        .unwrap_or_else(|e| panic!("test context: {}", e));

    Harness {
        ctx,
        api,
        storage,
        nav,
    }
}

pub fn network_error() -> ApiError {
    ApiError::Network("connection refused".to_string())
}

pub fn conversations(json: serde_json::Value) -> Vec<ConversationRecord> {
    serde_json::from_value(json).unwrap()
}
