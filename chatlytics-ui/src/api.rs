//! HTTP API Client
//!
//! gloo-net implementation of the analytics backend contract.

use async_trait::async_trait;
use chatlytics::api::{
    AnalyticsApi, ApiError, ApiResult, ConversationRecord, Credentials, DashboardStats,
    EndpointError, Endpoints, DEFAULT_API_BASE,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

const API_URL_KEY: &str = "chatlytics_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Analytics backend client for the browser
pub struct GlooClient {
    endpoints: Endpoints,
}

impl GlooClient {
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }

    /// Client for the stored base URL, falling back to the default
    pub fn from_local_storage() -> Result<Self, EndpointError> {
        let base = get_api_base();
        Endpoints::new(&base)
            .or_else(|e| {
                web_sys::console::warn_1(&format!("Ignoring stored API URL: {}", e).into());
                Endpoints::new(DEFAULT_API_BASE)
            })
            .map(Self::new)
    }

    async fn check(response: Response) -> ApiResult<Response> {
        if response.ok() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_rejection(status, &body))
    }

    async fn post_credentials(&self, path: &str, credentials: &Credentials) -> ApiResult<()> {
        let response = Request::post(&self.endpoints.url(path))
            .json(credentials)
            .map_err(|e| ApiError::Network(format!("request build error: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::check(response).await.map(|_| ())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = Request::get(&self.endpoints.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait(?Send)]
impl AnalyticsApi for GlooClient {
    async fn login(&self, credentials: &Credentials) -> ApiResult<()> {
        self.post_credentials(&self.endpoints.login, credentials).await
    }

    async fn signup(&self, credentials: &Credentials) -> ApiResult<()> {
        self.post_credentials(&self.endpoints.signup, credentials).await
    }

    async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        self.get_json(&self.endpoints.stats).await
    }

    async fn recent_conversations(&self) -> ApiResult<Vec<ConversationRecord>> {
        self.get_json(&self.endpoints.conversations).await
    }
}
