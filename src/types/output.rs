//! Tool output: a success result set or a typed error.
//!
//! On the wire the two variants are told apart by field presence (`results` vs `error`),
//! which is what a model-calling runtime sees. In Rust the distinction is an explicit
//! enum, and decoding refuses payloads that look like both.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SearchToolError;

/// Individual search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub url: String,
    pub title: String,
    /// Extracted text excerpt from the page
    pub excerpt: String,
    /// Publication date of the content; `null` on the wire is treated as absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
}

impl SearchResult {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        excerpt: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            excerpt: excerpt.into(),
            publish_date: None,
            relevance_score: None,
        }
    }

    pub fn with_publish_date(mut self, date: impl Into<String>) -> Self {
        self.publish_date = Some(date.into());
        self
    }

    pub const fn with_relevance_score(mut self, score: f64) -> Self {
        self.relevance_score = Some(score);
        self
    }
}

/// Successful search response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParallelSearchResponse {
    /// Unique identifier for this search request
    pub search_id: String,
    pub results: Vec<SearchResult>,
}

/// Error categories reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParallelSearchErrorKind {
    ApiError,
    RateLimit,
    Timeout,
    InvalidInput,
    ConfigurationError,
    Unknown,
}

impl ParallelSearchErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ApiError => "api_error",
            Self::RateLimit => "rate_limit",
            Self::Timeout => "timeout",
            Self::InvalidInput => "invalid_input",
            Self::ConfigurationError => "configuration_error",
            Self::Unknown => "unknown",
        }
    }

    /// Message used when an error arrives without one.
    pub const fn default_message(&self) -> &'static str {
        match self {
            Self::ApiError => "The search provider reported an error.",
            Self::RateLimit => "The search provider rate limit was exceeded.",
            Self::Timeout => "The search provider timed out.",
            Self::InvalidInput => "The search parameters were invalid.",
            Self::ConfigurationError => "The search tool is misconfigured.",
            Self::Unknown => "The search failed for an unknown reason.",
        }
    }
}

/// Error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParallelSearchError {
    pub error: ParallelSearchErrorKind,
    /// HTTP status code if applicable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Human-readable error message, never empty
    pub message: String,
}

impl ParallelSearchError {
    pub fn new(kind: ParallelSearchErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            kind.default_message().to_string()
        } else {
            message
        };
        Self {
            error: kind,
            status_code: None,
            message,
        }
    }

    pub const fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }
}

impl From<SearchToolError> for ParallelSearchError {
    fn from(err: SearchToolError) -> Self {
        let mut out = Self::new(err.kind(), err.message());
        out.status_code = err.status_code();
        out
    }
}

impl From<&SearchToolError> for ParallelSearchError {
    fn from(err: &SearchToolError) -> Self {
        Self::from(err.clone())
    }
}

/// Result handed back to the model-calling runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum ParallelSearchOutput {
    Success(ParallelSearchResponse),
    Error(ParallelSearchError),
}

impl ParallelSearchOutput {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub const fn as_success(&self) -> Option<&ParallelSearchResponse> {
        match self {
            Self::Success(r) => Some(r),
            Self::Error(_) => None,
        }
    }

    pub const fn as_error(&self) -> Option<&ParallelSearchError> {
        match self {
            Self::Error(e) => Some(e),
            Self::Success(_) => None,
        }
    }

    /// Decode a wire payload, discriminating on `error` vs `results`.
    pub fn from_value(value: Value) -> Result<Self, SearchToolError> {
        let Some(obj) = value.as_object() else {
            return Err(SearchToolError::unknown(
                "tool output must be a JSON object",
            ));
        };
        match (obj.contains_key("error"), obj.contains_key("results")) {
            (true, true) => Err(SearchToolError::unknown(
                "tool output carries both `error` and `results`",
            )),
            (true, false) => Ok(Self::Error(serde_json::from_value(value)?)),
            (false, true) => Ok(Self::Success(serde_json::from_value(value)?)),
            (false, false) => Err(SearchToolError::unknown(
                "tool output carries neither `error` nor `results`",
            )),
        }
    }

    pub fn to_value(&self) -> Result<Value, SearchToolError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl From<ParallelSearchResponse> for ParallelSearchOutput {
    fn from(response: ParallelSearchResponse) -> Self {
        Self::Success(response)
    }
}

impl From<ParallelSearchError> for ParallelSearchOutput {
    fn from(error: ParallelSearchError) -> Self {
        Self::Error(error)
    }
}

impl From<SearchToolError> for ParallelSearchOutput {
    fn from(error: SearchToolError) -> Self {
        Self::Error(error.into())
    }
}

impl Serialize for ParallelSearchOutput {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Success(r) => r.serialize(serializer),
            Self::Error(e) => e.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ParallelSearchOutput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_wire_shape() {
        let out = ParallelSearchOutput::Success(ParallelSearchResponse {
            search_id: "search_1".into(),
            results: vec![
                SearchResult::new("https://un.org", "UN", "Founded in 1945")
                    .with_publish_date("1945-10-24")
                    .with_relevance_score(0.9),
            ],
        });
        assert_eq!(
            out.to_value().unwrap(),
            json!({
                "searchId": "search_1",
                "results": [{
                    "url": "https://un.org",
                    "title": "UN",
                    "excerpt": "Founded in 1945",
                    "publishDate": "1945-10-24",
                    "relevanceScore": 0.9
                }]
            })
        );
    }

    #[test]
    fn error_wire_shape() {
        let out: ParallelSearchOutput =
            SearchToolError::rate_limit(Some(429), "too many requests").into();
        assert_eq!(
            out.to_value().unwrap(),
            json!({"error": "rate_limit", "statusCode": 429, "message": "too many requests"})
        );
    }

    #[test]
    fn discriminates_by_field_presence() {
        let ok = ParallelSearchOutput::from_value(json!({"searchId": "s", "results": []})).unwrap();
        assert!(ok.is_success());

        let err = ParallelSearchOutput::from_value(json!({"error": "timeout", "message": "slow"}))
            .unwrap();
        assert_eq!(err.as_error().unwrap().error, ParallelSearchErrorKind::Timeout);

        assert!(
            ParallelSearchOutput::from_value(json!({
                "searchId": "s", "results": [], "error": "unknown", "message": "m"
            }))
            .is_err()
        );
        assert!(ParallelSearchOutput::from_value(json!({"searchId": "s"})).is_err());
        assert!(ParallelSearchOutput::from_value(json!([1, 2])).is_err());
    }

    #[test]
    fn null_publish_date_is_accepted() {
        let out = ParallelSearchOutput::from_value(json!({
            "searchId": "s",
            "results": [{"url": "u", "title": "t", "excerpt": "e", "publishDate": null}]
        }))
        .unwrap();
        assert_eq!(out.as_success().unwrap().results[0].publish_date, None);
    }

    #[test]
    fn empty_message_falls_back_to_default() {
        let err = ParallelSearchError::from(SearchToolError::timeout(None, ""));
        assert_eq!(err.message, ParallelSearchErrorKind::Timeout.default_message());
        assert_eq!(err.status_code, None);
    }
}
