//! HTTP backend: one authenticated request/response primitive

use crate::config::BackendConfig;
use crate::error::{Result, SdkError};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Error body returned by the control plane on failure
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    code: i64,
    #[serde(default)]
    errors: Vec<String>,
}

/// Thin wrapper over `reqwest` that knows the API layout and auth header
pub struct Backend {
    config: BackendConfig,
    http: Client,
}

impl Backend {
    pub fn new(config: BackendConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Issue `method` against `api/<endpoint>` and decode the JSON response
    pub async fn request<B, R>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let bytes = self.send(method, endpoint, body).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Same as [`request`](Self::request) but returns the raw body
    pub async fn send<B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        if !self.config.is_configured() {
            return Err(SdkError::MissingConfiguration(
                "endpoint not configured yet".to_string(),
            ));
        }

        let url = self.config.api_url(endpoint);
        debug!(method = %method, url = %url, "request");

        let mut builder = self.http.request(method, &url);
        if let Some(token) = &self.config.access_token {
            builder = builder.bearer_auth(token);
        }
        // JSON body on every verb, GET and DELETE included
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(error_from_body(status, &bytes));
        }

        Ok(bytes.to_vec())
    }

    /// Unauthenticated GET of a bare URL, used to sanity-check an endpoint
    pub async fn probe(&self, url: &str) -> Result<StatusCode> {
        let response = self.http.get(url).send().await?;
        Ok(response.status())
    }
}

fn error_from_body(status: StatusCode, body: &[u8]) -> SdkError {
    let message = match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(err) => format!("code {}: {}", err.code, err.errors.join("; ")),
        Err(_) => String::from_utf8_lossy(body).trim().to_string(),
    };

    SdkError::Http {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_error_body() {
        let err = error_from_body(
            StatusCode::BAD_REQUEST,
            br#"{"code": 460, "errors": ["invalid job", "missing build"]}"#,
        );

        match err {
            SdkError::Http { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "code 460: invalid job; missing build");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_plain_error_body() {
        let err = error_from_body(StatusCode::BAD_GATEWAY, b"  upstream down\n");
        assert_eq!(err.to_string(), "HTTP error (502): upstream down");
    }

    #[tokio::test]
    async fn test_unconfigured_endpoint() {
        let backend = Backend::new(BackendConfig::default()).unwrap();

        let err = backend
            .request::<(), serde_json::Value>(Method::GET, "info", None)
            .await
            .unwrap_err();

        assert!(matches!(err, SdkError::MissingConfiguration(_)));
    }
}
