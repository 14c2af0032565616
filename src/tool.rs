//! Parallel search tool factory.
//!
//! [`parallel_search`] binds a developer configuration to the stable tool id
//! `gateway.parallel_search` and the tool's input/output contracts. The resulting
//! [`ParallelSearchTool`] is immutable and holds no external resources; it can be cloned
//! and invoked concurrently.
//!
//! Invocation never fails from the caller's point of view: every failure, including
//! malformed model arguments, comes back as [`ParallelSearchOutput::Error`] so the
//! model-calling runtime can hand it to the model and keep the conversation going.
//!
//! # Example
//!
//! ```rust,ignore
//! use siumai_parallel_search::prelude::*;
//!
//! let tool = parallel_search(
//!     ParallelSearchConfig::new()
//!         .with_search_type(SearchType::General)
//!         .with_include_domains(["wikipedia.org"]),
//! );
//!
//! let provider = HttpSearchProvider::new(HttpSearchProviderConfig::new(endpoint, api_key))?;
//! let output = tool
//!     .invoke_json(&provider, serde_json::json!({
//!         "objective": "Founding of the United Nations"
//!     }))
//!     .await;
//! ```

use async_trait::async_trait;
use serde_json::Value;
use tracing::Instrument;

use crate::error::{Result, SearchToolError};
use crate::provider::{SearchProvider, SearchRequest};
use crate::resolve::{ResolvedParameters, resolve};
use crate::schema::{
    LazySchema, PARALLEL_SEARCH_INPUT_SCHEMA, PARALLEL_SEARCH_OUTPUT_SCHEMA, validate_input_value,
    validate_output,
};
use crate::types::{
    ParallelSearchConfig, ParallelSearchError, ParallelSearchErrorKind, ParallelSearchInput,
    ParallelSearchOutput, ParallelSearchResponse, ProviderDefinedTool, Tool,
};

/// Stable tool id used by runtimes to route calls.
pub const PARALLEL_SEARCH_ID: &str = "gateway.parallel_search";

/// Default name of the tool in a tools map.
pub const PARALLEL_SEARCH_NAME: &str = "parallel_search";

/// Model-facing description of the tool.
pub const PARALLEL_SEARCH_DESCRIPTION: &str = "Search the web with a natural-language objective. \
Returns relevant excerpts optimized for LLMs, replacing multiple keyword searches with a single \
call for broad or complex queries.";

/// Create a parallel search tool bound to `config`.
///
/// Never fails: every config field is optional and problems in it surface per call.
pub fn parallel_search(config: ParallelSearchConfig) -> ParallelSearchTool {
    ParallelSearchTool::new(config)
}

/// Immutable tool descriptor: id, input and output contracts, and developer config.
#[derive(Debug, Clone)]
pub struct ParallelSearchTool {
    id: &'static str,
    input_schema: &'static LazySchema,
    output_schema: &'static LazySchema,
    config: ParallelSearchConfig,
}

impl Default for ParallelSearchTool {
    fn default() -> Self {
        Self::new(ParallelSearchConfig::default())
    }
}

impl ParallelSearchTool {
    pub fn new(config: ParallelSearchConfig) -> Self {
        Self {
            id: PARALLEL_SEARCH_ID,
            input_schema: &PARALLEL_SEARCH_INPUT_SCHEMA,
            output_schema: &PARALLEL_SEARCH_OUTPUT_SCHEMA,
            config,
        }
    }

    pub const fn id(&self) -> &'static str {
        self.id
    }

    pub const fn config(&self) -> &ParallelSearchConfig {
        &self.config
    }

    /// JSON Schema of the model-supplied arguments (built on first access).
    pub fn input_schema(&self) -> &'static Value {
        self.input_schema.schema()
    }

    /// JSON Schema of the tool result (built on first access).
    pub fn output_schema(&self) -> &'static Value {
        self.output_schema.schema()
    }

    /// Provider-defined tool definition with the developer config as `args`.
    pub fn to_provider_defined(&self) -> ProviderDefinedTool {
        let args = serde_json::to_value(&self.config)
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
        ProviderDefinedTool::new(self.id, PARALLEL_SEARCH_NAME).with_args(args)
    }

    /// Definition to register with a tool-calling runtime.
    pub fn to_tool(&self) -> Tool {
        Tool::ProviderDefined(self.to_provider_defined())
    }

    /// Plain function definition, for runtimes without provider-defined tools.
    pub fn to_function_tool(&self) -> Tool {
        Tool::function(
            PARALLEL_SEARCH_NAME,
            PARALLEL_SEARCH_DESCRIPTION,
            self.input_schema().clone(),
        )
    }

    /// Resolve the effective parameters for `input` without calling a provider.
    pub fn resolve(&self, input: &ParallelSearchInput) -> Result<ResolvedParameters> {
        resolve(&self.config, input)
    }

    /// Invoke with raw model arguments.
    pub async fn invoke_json<P>(&self, provider: &P, arguments: Value) -> ParallelSearchOutput
    where
        P: SearchProvider + ?Sized,
    {
        let span = tracing::debug_span!("parallel_search", tool_id = self.id);
        async {
            match validate_input_value(&arguments) {
                Ok(input) => self.run(provider, &input).await,
                Err(e) => self.reject(e),
            }
        }
        .instrument(span)
        .await
    }

    /// Invoke with a typed input.
    pub async fn invoke<P>(&self, provider: &P, input: &ParallelSearchInput) -> ParallelSearchOutput
    where
        P: SearchProvider + ?Sized,
    {
        let span = tracing::debug_span!("parallel_search", tool_id = self.id);
        async {
            match input.validate_params() {
                Ok(()) => self.run(provider, input).await,
                Err(e) => self.reject(e),
            }
        }
        .instrument(span)
        .await
    }

    fn reject(&self, err: SearchToolError) -> ParallelSearchOutput {
        tracing::warn!("rejecting tool call: {}", err);
        ParallelSearchOutput::Error(err.into())
    }

    /// Resolve, execute and check the output contract of an already validated input.
    async fn run<P>(&self, provider: &P, input: &ParallelSearchInput) -> ParallelSearchOutput
    where
        P: SearchProvider + ?Sized,
    {
        let output = match self.execute(provider, input).await {
            Ok(response) => ParallelSearchOutput::Success(response),
            Err(e) => {
                tracing::warn!(provider = provider.provider_id(), "parallel search failed: {}", e);
                ParallelSearchOutput::Error(e.into())
            }
        };

        match validate_output(&output) {
            Ok(()) => output,
            Err(e) => {
                tracing::warn!(
                    provider = provider.provider_id(),
                    "provider response violated the output contract: {}",
                    e
                );
                ParallelSearchOutput::Error(ParallelSearchError::new(
                    ParallelSearchErrorKind::Unknown,
                    format!("malformed search provider response: {}", e.message()),
                ))
            }
        }
    }

    async fn execute<P>(&self, provider: &P, input: &ParallelSearchInput) -> Result<ParallelSearchResponse>
    where
        P: SearchProvider + ?Sized,
    {
        let resolved = self.resolve(input)?;
        tracing::debug!(
            search_type = %resolved.search_type,
            max_results = resolved.max_results,
            max_chars_per_result = resolved.max_chars_per_result,
            include_domains = resolved.include_domains.len(),
            "resolved search parameters"
        );

        let (max_results, max_chars) = (resolved.max_results, resolved.max_chars_per_result);
        let request = SearchRequest::new(input, resolved);
        let raw = provider.search(&request).await?;
        Ok(raw.into_response(max_results, max_chars))
    }
}

/// A simple tool resolver abstraction.
#[async_trait]
pub trait ToolResolver: Send + Sync {
    /// Execute a tool by name with structured JSON arguments.
    /// Returns a structured JSON value as tool output.
    async fn call_tool(&self, name: &str, arguments: Value) -> Result<Value>;
}

/// A tool descriptor paired with the provider that executes it.
#[derive(Debug, Clone)]
pub struct BoundParallelSearch<P> {
    tool: ParallelSearchTool,
    provider: P,
}

impl<P: SearchProvider> BoundParallelSearch<P> {
    pub fn new(tool: ParallelSearchTool, provider: P) -> Self {
        Self { tool, provider }
    }

    pub const fn tool(&self) -> &ParallelSearchTool {
        &self.tool
    }

    pub const fn provider(&self) -> &P {
        &self.provider
    }

    pub async fn invoke_json(&self, arguments: Value) -> ParallelSearchOutput {
        self.tool.invoke_json(&self.provider, arguments).await
    }

    /// Whether `name` addresses this tool, by map name or by id.
    pub fn handles(&self, name: &str) -> bool {
        name == PARALLEL_SEARCH_NAME || name == self.tool.id()
    }
}

#[async_trait]
impl<P: SearchProvider> ToolResolver for BoundParallelSearch<P> {
    async fn call_tool(&self, name: &str, arguments: Value) -> Result<Value> {
        if !self.handles(name) {
            return Err(SearchToolError::invalid_input(format!(
                "unknown tool '{name}', expected '{PARALLEL_SEARCH_NAME}'"
            )));
        }
        self.invoke_json(arguments).await.to_value()
    }
}
