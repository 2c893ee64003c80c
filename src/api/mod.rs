//! Analytics API boundary
//!
//! The [`AnalyticsApi`] trait is the only way controllers reach the backend.
//! The native build provides a reqwest implementation ([`HttpClient`]); the
//! browser crate provides its own over `gloo-net`.

#[cfg(feature = "native")]
mod client;
mod dto;
mod error;

#[cfg(feature = "native")]
pub use client::HttpClient;
pub use dto::{
    codes, ConversationId, ConversationRecord, Credentials, DashboardStats, ErrorBody,
};
pub use error::{ApiError, ApiResult};

use async_trait::async_trait;
use thiserror::Error;

/// Default backend location
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Operations the presentation layer needs from the backend
#[async_trait(?Send)]
pub trait AnalyticsApi {
    /// `POST /api/login`; any 2xx is success, the body is opaque
    async fn login(&self, credentials: &Credentials) -> ApiResult<()>;

    /// `POST /api/signup`; any 2xx is success, the body is opaque
    async fn signup(&self, credentials: &Credentials) -> ApiResult<()>;

    /// Aggregate counters for the dashboard tiles
    async fn dashboard_stats(&self) -> ApiResult<DashboardStats>;

    /// Recent conversations, in the order the backend returns them
    async fn recent_conversations(&self) -> ApiResult<Vec<ConversationRecord>>;
}

/// Base URL and paths of the backend endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
    pub login: String,
    pub signup: String,
    pub stats: String,
    pub conversations: String,
}

/// Endpoint configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("API base URL must start with http:// or https://, got {0:?}")]
    InvalidBase(String),

    #[error("Endpoint path for {name} must start with '/', got {path:?}")]
    InvalidPath { name: &'static str, path: String },
}

impl Endpoints {
    /// Endpoints under `base_url` with the default paths
    pub fn new(base_url: &str) -> Result<Self, EndpointError> {
        Self::with_paths(
            base_url,
            "/api/login",
            "/api/signup",
            "/api/dashboard/stats",
            "/api/conversations/recent",
        )
    }

    /// Endpoints with explicit paths, validated up front
    pub fn with_paths(
        base_url: &str,
        login: &str,
        signup: &str,
        stats: &str,
        conversations: &str,
    ) -> Result<Self, EndpointError> {
        let base = base_url.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://"))
            || base.ends_with("://")
        {
            return Err(EndpointError::InvalidBase(base_url.to_string()));
        }

        for (name, path) in [
            ("login", login),
            ("signup", signup),
            ("stats", stats),
            ("conversations", conversations),
        ] {
            if !path.starts_with('/') {
                return Err(EndpointError::InvalidPath {
                    name,
                    path: path.to_string(),
                });
            }
        }

        Ok(Self {
            base_url: base.to_string(),
            login: login.to_string(),
            signup: signup.to_string(),
            stats: stats.to_string(),
            conversations: conversations.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of an endpoint path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
