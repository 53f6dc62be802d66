//! HTTP implementation of [`AuthApi`] using `reqwest`.

use std::sync::Arc;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use pawtrack_core::{ApiErrorBody, ApiResponse};

use super::{AuthApi, Endpoint, GatewayError};
use crate::config::ApiConfig;

/// Auth API client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct HttpAuthApi {
    inner: Arc<HttpAuthApiInner>,
}

struct HttpAuthApiInner {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpAuthApi {
    /// Create a new auth API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(HttpAuthApiInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Handle API response and parse the envelope.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<ApiResponse<T>, GatewayError> {
        if response.status().is_success() {
            let body = response.text().await?;
            return serde_json::from_str(&body)
                .map_err(|e| GatewayError::Parse(format!("Failed to parse response: {e}")));
        }

        Err(self.parse_error(response).await)
    }

    /// Parse an error response, preferring the structured error body and
    /// falling back to the envelope's `message`.
    async fn parse_error(&self, response: reqwest::Response) -> GatewayError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.error.message)
            .or_else(|_| {
                serde_json::from_str::<ApiResponse<serde::de::IgnoredAny>>(&body)
                    .map(|r| r.message.unwrap_or_default())
            })
            .ok()
            .filter(|m| !m.is_empty());

        debug!(status, has_message = message.is_some(), "Auth API returned error status");
        GatewayError::Status { status, message }
    }
}

impl AuthApi for HttpAuthApi {
    #[instrument(skip_all, fields(endpoint = %endpoint, authorized = bearer.is_some()))]
    async fn post<B, T>(
        &self,
        endpoint: Endpoint,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<ApiResponse<T>, GatewayError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let url = self.inner.base_url.join(endpoint.path())?;
        let mut request = self.inner.client.post(url).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }
}

impl std::fmt::Debug for HttpAuthApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAuthApi")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}
