//! Core data types: developer config, model input, tool output and tool definitions.

pub mod config;
pub mod input;
pub mod output;
pub mod tools;

pub use config::{ParallelSearchConfig, SearchType};
pub use input::{
    MAX_INCLUDE_DOMAINS, MAX_OBJECTIVE_CHARS, MAX_QUERY_CHARS, MAX_SEARCH_QUERIES,
    ParallelSearchInput,
};
pub use output::{
    ParallelSearchError, ParallelSearchErrorKind, ParallelSearchOutput, ParallelSearchResponse,
    SearchResult,
};
pub use tools::{ProviderDefinedTool, Tool, ToolFunction};
