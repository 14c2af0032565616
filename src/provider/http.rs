//! HTTP search provider.
//!
//! Posts the resolved [`SearchRequest`] as JSON to a configured endpoint and decodes a
//! [`ProviderSearchResponse`]. Non-2xx replies are classified into the tool's error
//! taxonomy by [`classify_http_error`].

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use secrecy::{ExposeSecret, SecretString};

use super::{ProviderSearchResponse, SearchProvider, SearchRequest};
use crate::error::{Result, SearchToolError};

/// Configuration for [`HttpSearchProvider`].
#[derive(Debug)]
pub struct HttpSearchProviderConfig {
    /// Full URL the search request is posted to
    pub endpoint: String,
    /// Sent as a bearer token; never logged
    pub api_key: SecretString,
    /// Whole-request timeout enforced by the HTTP client
    pub timeout: Option<Duration>,
    /// Extra headers added to every request
    pub headers: HashMap<String, String>,
    /// Name used in logs and error messages
    pub provider_id: String,
}

impl HttpSearchProviderConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: SecretString::from(api_key.into()),
            timeout: None,
            headers: HashMap::new(),
            provider_id: "gateway".to_string(),
        }
    }

    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_provider_id(mut self, provider_id: impl Into<String>) -> Self {
        self.provider_id = provider_id.into();
        self
    }
}

fn check_endpoint(config: &HttpSearchProviderConfig) -> Result<()> {
    if config.endpoint.trim().is_empty() {
        return Err(SearchToolError::configuration(
            "search provider endpoint must not be empty",
        ));
    }
    Ok(())
}

/// Search provider speaking JSON over HTTP.
#[derive(Debug)]
pub struct HttpSearchProvider {
    client: reqwest::Client,
    config: HttpSearchProviderConfig,
}

impl HttpSearchProvider {
    pub fn new(config: HttpSearchProviderConfig) -> Result<Self> {
        check_endpoint(&config)?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client, config })
    }

    /// Use a pre-built client (shared connection pool, custom TLS, proxies).
    ///
    /// `config.timeout` is not applied; the client's own timeout governs.
    pub fn with_client(client: reqwest::Client, config: HttpSearchProviderConfig) -> Result<Self> {
        check_endpoint(&config)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpSearchProviderConfig {
        &self.config
    }
}

#[async_trait]
impl SearchProvider for HttpSearchProvider {
    fn provider_id(&self) -> &str {
        &self.config.provider_id
    }

    async fn search(&self, request: &SearchRequest) -> Result<ProviderSearchResponse> {
        let mut builder = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(request);
        for (name, value) in &self.config.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        tracing::debug!(
            provider = %self.config.provider_id,
            endpoint = %self.config.endpoint,
            "sending search request"
        );
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            return Err(classify_http_error(
                &self.config.provider_id,
                status.as_u16(),
                &body,
                &headers,
            ));
        }

        let body = response.text().await?;
        serde_json::from_str::<ProviderSearchResponse>(&body).map_err(|e| {
            SearchToolError::unknown(format!(
                "provider={} returned an undecodable response: {}",
                self.config.provider_id, e
            ))
        })
    }
}

/// Classify a non-2xx provider reply.
///
/// 429 becomes `RateLimit` (with the `retry-after` hint when present), 408 and 504 become
/// `Timeout`, everything else is an `ApiError` carrying the status code.
pub fn classify_http_error(
    provider_id: &str,
    status: u16,
    body_text: &str,
    headers: &HeaderMap,
) -> SearchToolError {
    let detail = error_detail(body_text).unwrap_or_else(|| {
        reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("request failed")
            .to_string()
    });

    match status {
        429 => {
            let retry_after = headers
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .map(|v| {
                    let v = v.trim();
                    // Delay-seconds form gets a unit; an HTTP-date is shown as sent.
                    if v.parse::<u64>().is_ok() {
                        format!(" (retry after {v}s)")
                    } else {
                        format!(" (retry after {v})")
                    }
                })
                .unwrap_or_default();
            SearchToolError::rate_limit(
                Some(status),
                format!("provider={provider_id} rate limited{retry_after}: {detail}"),
            )
        }
        408 | 504 => SearchToolError::timeout(
            Some(status),
            format!("provider={provider_id} http={status} timed out: {detail}"),
        ),
        _ => SearchToolError::api_error(
            Some(status),
            format!("provider={provider_id} http={status}: {detail}"),
        ),
    }
}

/// Best-effort human-readable detail from an error body.
fn error_detail(body_text: &str) -> Option<String> {
    let trimmed = body_text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(trimmed) {
        let candidates = [
            json.pointer("/error/message"),
            json.get("message"),
            json.get("error"),
            json.get("detail"),
        ];
        if let Some(text) = candidates
            .into_iter()
            .flatten()
            .find_map(|v| v.as_str().filter(|s| !s.trim().is_empty()))
        {
            return Some(text.to_string());
        }
    }
    // Limit body sample size to avoid noisy messages
    Some(trimmed.chars().take(200).collect())
}
