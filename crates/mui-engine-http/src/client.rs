//! Authenticated HTTP client for the manifest backend.
//!
//! Injects bearer token, tenant header and a per-request correlation id, and
//! turns non-2xx responses into `ProviderError::Status` read from the
//! `{ "error": { "code", "message" } }` envelope.

use std::sync::Arc;
use std::time::Duration;

use mui_engine::ProviderError;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use tracing::{debug, error};

pub const HEADER_TENANT: &str = "X-Tenant-Id";
pub const HEADER_CORRELATION: &str = "X-Correlation-Id";
pub const UNKNOWN_ERROR_CODE: &str = "UNKNOWN_ERROR";

/// Supplies a value at request time (token or tenant may rotate)
pub type ValueSource = Arc<dyn Fn() -> Option<String> + Send + Sync>;

pub struct EngineClient {
    client: Client,
    base_api_url: String,
    access_token: Option<ValueSource>,
    tenant_id: Option<ValueSource>,
}

impl EngineClient {
    pub fn new(base_api_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ProviderError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_api_url: base_api_url.into().trim_end_matches('/').to_string(),
            access_token: None,
            tenant_id: None,
        })
    }

    pub fn with_access_token(mut self, source: ValueSource) -> Self {
        self.access_token = Some(source);
        self
    }

    pub fn with_tenant_id(mut self, source: ValueSource) -> Self {
        self.tenant_id = Some(source);
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_api_url, path)
    }

    /// GET request for `path` with auth, tenant and a fresh correlation id
    pub fn request(&self, path: &str) -> RequestBuilder {
        let correlation_id = uuid::Uuid::new_v4().to_string();
        let mut builder = self
            .client
            .get(self.url(path))
            .header(HEADER_CORRELATION, correlation_id);

        if let Some(token) = self.access_token.as_ref().and_then(|source| source()) {
            builder = builder.bearer_auth(token);
        }
        if let Some(tenant) = self.tenant_id.as_ref().and_then(|source| source()) {
            builder = builder.header(HEADER_TENANT, tenant);
        }
        builder
    }

    /// GET `path` and return the parsed JSON body
    pub async fn get_json(&self, path: &str) -> Result<Value, ProviderError> {
        let request = self
            .request(path)
            .build()
            .map_err(|e| ProviderError::Transport(format!("Invalid request: {}", e)))?;
        let correlation_id = request
            .headers()
            .get(HEADER_CORRELATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        debug!(path, correlation_id = %correlation_id, "Requesting manifest endpoint");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ProviderError::Transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let err = status_error(status, &body);
            error!(correlation_id = %correlation_id, "Manifest endpoint error: {}", err);
            return Err(err);
        }

        serde_json::from_str(&body)
            .map_err(|e| ProviderError::Decode(format!("Failed to parse JSON response: {}", e)))
    }
}

/// Build a status error from a (possibly non-JSON) error body
pub fn status_error(status: StatusCode, body: &str) -> ProviderError {
    let envelope = serde_json::from_str::<Value>(body).ok();
    let error_obj = envelope.as_ref().and_then(|v| v.get("error"));

    let code = error_obj
        .and_then(|e| e.get("code"))
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_ERROR_CODE)
        .to_string();
    let message = error_obj
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string());

    ProviderError::Status {
        status: status.as_u16(),
        code,
        message,
    }
}
