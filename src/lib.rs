//! # siumai-parallel-search
//!
//! Provider-defined web research tool (`gateway.parallel_search`) for model tool-calling
//! runtimes.
//!
//! The tool takes a natural-language objective (plus optional keyword queries, domain
//! filters and budgets) from the model, resolves it against developer defaults, delegates
//! the actual search to a [`SearchProvider`](provider::SearchProvider), and returns either
//! a result set or a typed error. It never returns a Rust error to the runtime: failures
//! are values the model can read.
//!
//! ## Quick Start
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
//! // Register the definition with the runtime...
//! let definition = tool.to_tool();
//!
//! // ...and execute the model's call.
//! let provider = HttpSearchProvider::new(HttpSearchProviderConfig::new(endpoint, api_key))?;
//! let output = tool
//!     .invoke_json(&provider, serde_json::json!({
//!         "objective": "Founding of the United Nations",
//!         "search_queries": ["UN charter 1945"]
//!     }))
//!     .await;
//!
//! match output {
//!     ParallelSearchOutput::Success(response) => println!("{} results", response.results.len()),
//!     ParallelSearchOutput::Error(error) => println!("{}: {}", error.error.as_str(), error.message),
//! }
//! ```
//!
//! ## Search types
//!
//! | search type   | results | chars per result |
//! |---------------|---------|------------------|
//! | `list`        | 20      | 1500             |
//! | `targeted`    | 5       | 16000            |
//! | `general`     | 10      | 9000             |
//! | `single_page` | 2       | 30000            |

pub mod error;
pub mod provider;
pub mod resolve;
pub mod schema;
pub mod telemetry;
pub mod tool;
pub mod types;

pub use error::SearchToolError;
pub use provider::{
    HttpSearchProvider, HttpSearchProviderConfig, ProviderSearchResponse, ProviderSearchResult,
    SearchProvider, SearchRequest,
};
pub use resolve::{ResolvedParameters, SearchTypeDefaults, resolve};
pub use tool::{
    BoundParallelSearch, PARALLEL_SEARCH_ID, PARALLEL_SEARCH_NAME, ParallelSearchTool,
    ToolResolver, parallel_search,
};
pub use types::{
    ParallelSearchConfig, ParallelSearchError, ParallelSearchErrorKind, ParallelSearchInput,
    ParallelSearchOutput, ParallelSearchResponse, SearchResult, SearchType,
};

/// Commonly used items
pub mod prelude {
    pub use crate::error::SearchToolError;
    pub use crate::provider::{
        HttpSearchProvider, HttpSearchProviderConfig, SearchProvider, SearchRequest,
    };
    pub use crate::tool::{BoundParallelSearch, ParallelSearchTool, ToolResolver, parallel_search};
    pub use crate::types::{
        ParallelSearchConfig, ParallelSearchError, ParallelSearchErrorKind, ParallelSearchInput,
        ParallelSearchOutput, ParallelSearchResponse, SearchResult, SearchType, Tool,
    };
}
