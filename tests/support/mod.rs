//! Test fixtures: scripted search providers.
#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use siumai_parallel_search::provider::ProviderSearchResult;
use siumai_parallel_search::{ProviderSearchResponse, SearchProvider, SearchRequest, SearchToolError};

/// What the scripted provider does on each call.
#[derive(Debug, Clone)]
pub enum Script {
    /// Return `n` results echoing the request objective
    Results(usize),
    /// Fail with the given error
    Fail(SearchToolError),
    /// Sleep, then return `n` results
    Delayed(Duration, usize),
    /// Never complete
    Hang,
}

#[derive(Debug)]
pub struct ScriptedProvider {
    script: Script,
    calls: AtomicUsize,
    requests: Mutex<Vec<SearchRequest>>,
}

impl ScriptedProvider {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn returning(n: usize) -> Self {
        Self::new(Script::Results(n))
    }

    pub fn failing(err: SearchToolError) -> Self {
        Self::new(Script::Fail(err))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<SearchRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

pub fn echo_results(request: &SearchRequest, n: usize) -> ProviderSearchResponse {
    ProviderSearchResponse {
        search_id: format!("search::{}", request.objective),
        results: (0..n)
            .map(|i| ProviderSearchResult {
                url: format!("https://example.com/{i}"),
                title: Some(format!("Result {i}")),
                excerpt: Some(format!("Excerpt {i} about {}", request.objective)),
                publish_date: (i % 2 == 0).then(|| "2024-05-01".to_string()),
                relevance_score: Some(1.0 / (i as f64 + 1.0)),
                ..Default::default()
            })
            .collect(),
    }
}

#[async_trait]
impl SearchProvider for ScriptedProvider {
    fn provider_id(&self) -> &str {
        "scripted"
    }

    async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<ProviderSearchResponse, SearchToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        match &self.script {
            Script::Results(n) => Ok(echo_results(request, *n)),
            Script::Fail(err) => Err(err.clone()),
            Script::Delayed(delay, n) => {
                tokio::time::sleep(*delay).await;
                Ok(echo_results(request, *n))
            }
            Script::Hang => {
                std::future::pending::<()>().await;
                unreachable!("pending never resolves")
            }
        }
    }
}
