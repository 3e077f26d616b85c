//! Authenticated JSON transport for the CRM backend
//!
//! Every request carries `Authorization: Bearer <token>` read from local storage
//! and a JSON content type. A missing token is not checked here: the request goes
//! out with an empty bearer value and the backend's rejection comes back as an
//! ordinary `ApiError::Status`.

use async_trait::async_trait;
use contracts::shared::envelope::{ApiEnvelope, ErrorBody};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::shared::config::FrontendConfig;
use crate::system::auth::storage;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("failed to send request: {0}")]
    Transport(String),
    #[error("failed to encode request: {0}")]
    Encode(String),
    #[error("HTTP {status}")]
    Status { status: u16, detail: Option<String> },
    #[error("failed to parse response: {0}")]
    Decode(String),
    #[error("request was not successful")]
    Unsuccessful { message: Option<String> },
}

impl ApiError {
    /// Message supplied by the backend, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            ApiError::Unsuccessful { message } => message.as_deref(),
            _ => None,
        }
    }

    /// Backend message when available, the given fallback otherwise
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

/// Seam between the fetch orchestration and the network.
///
/// `path` is absolute from the backend root and may carry a query string.
#[async_trait(?Send)]
pub trait ApiTransport {
    async fn get(&self, path: &str) -> Result<Value, ApiError>;
    async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError>;
}

/// Unwraps `{ success, data }`; `success == false` is an error
pub fn unwrap_envelope<T: DeserializeOwned>(value: Value) -> Result<Option<T>, ApiError> {
    let envelope: ApiEnvelope<T> =
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))?;
    if !envelope.success {
        return Err(ApiError::Unsuccessful {
            message: envelope.message,
        });
    }
    Ok(envelope.data)
}

// ============================================================================
// gloo-net implementation
// ============================================================================

#[derive(Debug, Clone)]
pub struct GlooTransport {
    base_url: String,
}

impl GlooTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &FrontendConfig) -> Self {
        Self::new(config.backend_url.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

fn auth_header() -> String {
    format!("Bearer {}", storage::get_access_token().unwrap_or_default())
}

async fn read_response(response: Response) -> Result<Value, ApiError> {
    if !response.ok() {
        let status = response.status();
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail_message());
        return Err(ApiError::Status { status, detail });
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl ApiTransport for GlooTransport {
    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        let response = Request::get(&self.url(path))
            .header("Authorization", &auth_header())
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        read_response(response).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        let response = Request::post(&self.url(path))
            .header("Authorization", &auth_header())
            .json(&body)
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        read_response(response).await
    }
}

#[cfg(test)]
pub mod testing {
    //! In-memory transport for orchestration tests

    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Debug, Clone)]
    pub struct RecordedCall {
        pub method: &'static str,
        pub path: String,
        pub body: Option<Value>,
    }

    /// Answers registered routes, 404 for everything else, and records every call
    #[derive(Default)]
    pub struct MockTransport {
        routes: RefCell<HashMap<String, Result<Value, ApiError>>>,
        calls: RefCell<Vec<RecordedCall>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn on_get(&self, path: &str, response: Value) -> &Self {
            self.route("GET", path, Ok(response))
        }

        pub fn fail_get(&self, path: &str, error: ApiError) -> &Self {
            self.route("GET", path, Err(error))
        }

        pub fn on_post(&self, path: &str, response: Value) -> &Self {
            self.route("POST", path, Ok(response))
        }

        pub fn fail_post(&self, path: &str, error: ApiError) -> &Self {
            self.route("POST", path, Err(error))
        }

        fn route(&self, method: &str, path: &str, response: Result<Value, ApiError>) -> &Self {
            self.routes
                .borrow_mut()
                .insert(format!("{} {}", method, path), response);
            self
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.borrow().clone()
        }

        pub fn count(&self, method: &str, path: &str) -> usize {
            self.calls
                .borrow()
                .iter()
                .filter(|c| c.method == method && c.path == path)
                .count()
        }

        pub fn last_body(&self, method: &str, path: &str) -> Option<Value> {
            self.calls
                .borrow()
                .iter()
                .rev()
                .find(|c| c.method == method && c.path == path)
                .and_then(|c| c.body.clone())
        }

        fn answer(&self, method: &'static str, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
            self.calls.borrow_mut().push(RecordedCall {
                method,
                path: path.to_string(),
                body,
            });
            self.routes
                .borrow()
                .get(&format!("{} {}", method, path))
                .cloned()
                .unwrap_or(Err(ApiError::Status {
                    status: 404,
                    detail: None,
                }))
        }
    }

    #[async_trait(?Send)]
    impl ApiTransport for MockTransport {
        async fn get(&self, path: &str) -> Result<Value, ApiError> {
            self.answer("GET", path, None)
        }

        async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError> {
            self.answer("POST", path, Some(body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_envelope_success() {
        let data: Option<Vec<String>> =
            unwrap_envelope(json!({"success": true, "data": ["a", "b"]})).unwrap();
        assert_eq!(data, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_unwrap_envelope_unsuccessful() {
        let err = unwrap_envelope::<Vec<String>>(json!({"success": false, "message": "nope"}))
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Unsuccessful {
                message: Some("nope".into())
            }
        );
    }

    #[test]
    fn test_unwrap_envelope_bad_shape() {
        let err = unwrap_envelope::<Vec<String>>(json!({"success": true, "data": 3})).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_user_message_prefers_backend_detail() {
        let err = ApiError::Status {
            status: 400,
            detail: Some("Opportunity already exists for this lead".into()),
        };
        assert_eq!(
            err.user_message("Failed to create opportunity"),
            "Opportunity already exists for this lead"
        );

        let err = ApiError::Transport("network down".into());
        assert_eq!(
            err.user_message("Failed to create opportunity"),
            "Failed to create opportunity"
        );

        let err = ApiError::Status {
            status: 500,
            detail: Some("  ".into()),
        };
        assert_eq!(err.user_message("fallback"), "fallback");
    }
}
