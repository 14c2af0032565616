//! Search provider seam.
//!
//! The tool never searches the web itself. It hands a fully resolved [`SearchRequest`] to a
//! [`SearchProvider`] and maps whatever comes back onto its own output contract. Retries,
//! backoff and transport timeouts belong to the provider implementation.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SearchToolError;
use crate::resolve::ResolvedParameters;
use crate::types::{ParallelSearchInput, ParallelSearchResponse, SearchResult, SearchType};

pub mod http;

pub use http::{HttpSearchProvider, HttpSearchProviderConfig, classify_http_error};

/// Request sent to the provider after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub objective: String,
    pub search_type: SearchType,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub search_queries: Vec<String>,
    pub include_domains: Vec<String>,
    pub max_results: u32,
    pub max_chars_per_result: u32,
}

impl SearchRequest {
    pub fn new(input: &ParallelSearchInput, resolved: ResolvedParameters) -> Self {
        Self {
            objective: input.objective.clone(),
            search_type: resolved.search_type,
            search_queries: input.search_queries.clone().unwrap_or_default(),
            include_domains: resolved.include_domains,
            max_results: resolved.max_results,
            max_chars_per_result: resolved.max_chars_per_result,
        }
    }
}

/// Raw provider result, before it is shaped into the tool output.
///
/// Accepts both camelCase and snake_case field spellings, and either a single `excerpt`
/// or a list of `excerpts`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProviderSearchResponse {
    #[serde(alias = "searchId")]
    pub search_id: String,
    #[serde(default)]
    pub results: Vec<ProviderSearchResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProviderSearchResult {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub excerpts: Vec<String>,
    #[serde(default, alias = "publishDate")]
    pub publish_date: Option<String>,
    #[serde(default, alias = "relevanceScore")]
    pub relevance_score: Option<f64>,
}

impl ProviderSearchResponse {
    /// Shape into the tool's success payload, enforcing the resolved budgets.
    pub fn into_response(self, max_results: u32, max_chars_per_result: u32) -> ParallelSearchResponse {
        let limit = usize::try_from(max_results).unwrap_or(usize::MAX);
        let max_chars = usize::try_from(max_chars_per_result).unwrap_or(usize::MAX);
        let received = self.results.len();
        let results: Vec<SearchResult> = self
            .results
            .into_iter()
            .take(limit)
            .map(|r| r.into_result(max_chars))
            .collect();
        if received > results.len() {
            tracing::debug!(
                "provider returned {} results, keeping {}",
                received,
                results.len()
            );
        }
        ParallelSearchResponse {
            search_id: self.search_id,
            results,
        }
    }
}

impl ProviderSearchResult {
    fn into_result(self, max_chars: usize) -> SearchResult {
        let excerpt = match self.excerpt {
            Some(e) => e,
            None => self.excerpts.join("\n\n"),
        };
        SearchResult {
            title: self.title.unwrap_or_else(|| self.url.clone()),
            url: self.url,
            excerpt: truncate_chars(excerpt, max_chars),
            publish_date: self.publish_date,
            relevance_score: self.relevance_score,
        }
    }
}

fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((idx, _)) = text.char_indices().nth(max_chars) {
        text.truncate(idx);
    }
    text
}

/// An external search backend.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Identifier used in logs and error messages.
    fn provider_id(&self) -> &str;

    /// Run one search. This is the only suspension point of an invocation.
    async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<ProviderSearchResponse, SearchToolError>;
}

#[async_trait]
impl<P: SearchProvider + ?Sized> SearchProvider for Arc<P> {
    fn provider_id(&self) -> &str {
        (**self).provider_id()
    }

    async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<ProviderSearchResponse, SearchToolError> {
        (**self).search(request).await
    }
}
