//! API Error Types
//!
//! Transport-agnostic failures returned by every [`AnalyticsApi`](super::AnalyticsApi)
//! implementation. The browser and native clients both map their own
//! transport errors into these variants.

use thiserror::Error;

use super::dto::ErrorBody;

/// Errors returned by the analytics backend boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Endpoint unreachable, timed out, or the request could not be built
    #[error("Network error: {0}")]
    Network(String),

    /// Response body did not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Non-2xx response, with the structured error code when one was sent
    #[error("Request rejected ({status}): {}", .code.as_deref().unwrap_or("no error code"))]
    Rejected { status: u16, code: Option<String> },
}

impl ApiError {
    /// Classify a non-2xx response from its status and raw body
    ///
    /// A JSON body is a structured rejection, with or without a code. Any
    /// other body (an HTML proxy page, an empty reply) means no usable
    /// response arrived and is reported as [`ApiError::Parse`].
    pub fn from_rejection(status: u16, body: &str) -> Self {
        if serde_json::from_str::<serde_json::Value>(body).is_err() {
            return ApiError::Parse(format!("non-JSON error response ({})", status));
        }

        ApiError::Rejected {
            status,
            code: ErrorBody::code_from(body),
        }
    }

    /// Structured error code of a rejected request
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Whether the request never produced a usable response
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Parse(_))
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_only_on_rejection() {
        let rejected = ApiError::Rejected {
            status: 401,
            code: Some("INVALID_PASSWORD".to_string()),
        };
        assert_eq!(rejected.code(), Some("INVALID_PASSWORD"));
        assert!(!rejected.is_connectivity());

        let network = ApiError::Network("connection refused".to_string());
        assert_eq!(network.code(), None);
        assert!(network.is_connectivity());
    }

    #[test]
    fn test_display_messages() {
        let err = ApiError::Rejected { status: 500, code: None };
        assert_eq!(err.to_string(), "Request rejected (500): no error code");

        let err = ApiError::Network("timed out".to_string());
        assert_eq!(err.to_string(), "Network error: timed out");
    }

    #[test]
    fn test_rejection_body_classification() {
        assert_eq!(
            ApiError::from_rejection(401, r#"{"error":"INVALID_PASSWORD"}"#),
            ApiError::Rejected {
                status: 401,
                code: Some("INVALID_PASSWORD".to_string()),
            }
        );
        assert_eq!(
            ApiError::from_rejection(500, r#"{"message":"boom"}"#),
            ApiError::Rejected { status: 500, code: None }
        );

        let err = ApiError::from_rejection(502, "<html>Bad Gateway</html>");
        assert!(matches!(err, ApiError::Parse(_)));
        assert!(err.is_connectivity());
        assert!(ApiError::from_rejection(503, "").is_connectivity());
    }
}
