//! Analytics REST API Client
//!
//! reqwest implementation of [`AnalyticsApi`] for native builds.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::dto::{ConversationRecord, Credentials, DashboardStats};
use super::error::{ApiError, ApiResult};
use super::{AnalyticsApi, Endpoints};

/// HTTP client for the analytics backend
pub struct HttpClient {
    client: Client,
    endpoints: Endpoints,
}

impl HttpClient {
    /// Create a client with a per-request timeout
    pub fn new(endpoints: Endpoints, request_timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Send a request tagged with a fresh request id
    async fn send(&self, request: RequestBuilder, path: &str) -> ApiResult<Response> {
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(request_id = %request_id, path = %path, "Sending API request");

        let response = request
            .header("x-request-id", &request_id)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(request_id = %request_id, error = %e, "API request failed");
                if e.is_timeout() {
                    ApiError::Network("request timed out".to_string())
                } else if e.is_connect() {
                    ApiError::Network(format!("cannot reach {}", self.endpoints.base_url()))
                } else {
                    ApiError::Network(e.to_string())
                }
            })?;

        tracing::debug!(
            request_id = %request_id,
            status = response.status().as_u16(),
            "API response received"
        );

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_rejection(status, &body))
        }
    }

    async fn post_credentials(&self, path: &str, credentials: &Credentials) -> ApiResult<()> {
        let url = self.endpoints.url(path);
        self.send(self.client.post(&url).json(credentials), path)
            .await
            .map(|_| ())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.endpoints.url(path);
        let response = self.send(self.client.get(&url), path).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait(?Send)]
impl AnalyticsApi for HttpClient {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_keeps_endpoints() {
        let endpoints = Endpoints::new("http://localhost:5000").unwrap();
        let client = HttpClient::new(endpoints.clone(), Duration::from_secs(5)).unwrap();
        assert_eq!(client.endpoints(), &endpoints);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // Reserve a free port, then release it so nothing is listening there
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let endpoints = Endpoints::new(&format!("http://127.0.0.1:{}", port)).unwrap();
        let client = HttpClient::new(endpoints, Duration::from_secs(2)).unwrap();

        let err = client.dashboard_stats().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)), "unexpected error: {:?}", err);
    }
}
