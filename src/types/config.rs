//! Developer-level configuration for the parallel search tool.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SearchToolError;
use crate::resolve::{SearchTypeDefaults, search_type_defaults};

/// Search profile controlling the depth vs breadth tradeoff.
///
/// - `list`: broad search, 20 results, 1500 chars each (default)
/// - `targeted`: specific sources, 5 results, 16000 chars each
/// - `general`: balanced, 10 results, 9000 chars each
/// - `single_page`: deep extraction, 2 results, 30000 chars each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    #[default]
    List,
    General,
    SinglePage,
    Targeted,
}

impl SearchType {
    /// Every search type, in wire order.
    pub const ALL: [SearchType; 4] = [
        SearchType::List,
        SearchType::General,
        SearchType::SinglePage,
        SearchType::Targeted,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::General => "general",
            Self::SinglePage => "single_page",
            Self::Targeted => "targeted",
        }
    }

    /// Built-in result count and excerpt budget for this profile.
    pub const fn defaults(&self) -> SearchTypeDefaults {
        search_type_defaults(*self)
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchType {
    type Err = SearchToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list" => Ok(Self::List),
            "general" => Ok(Self::General),
            "single_page" => Ok(Self::SinglePage),
            "targeted" => Ok(Self::Targeted),
            other => Err(SearchToolError::invalid_input(format!(
                "unknown search type '{other}', expected one of: list, general, single_page, targeted"
            ))),
        }
    }
}

/// Configuration options for the parallel search tool.
///
/// These are developer-specified defaults, fixed when the tool is created. Every field is
/// optional; anything left unset falls back to the per-search-type defaults.
///
/// # Example
///
/// ```rust,ignore
/// use siumai_parallel_search::types::{ParallelSearchConfig, SearchType};
///
/// let config = ParallelSearchConfig::new()
///     .with_search_type(SearchType::General)
///     .with_include_domains(vec!["wikipedia.org".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParallelSearchConfig {
    /// Default search type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_type: Option<SearchType>,

    /// Default list of domains to restrict search results to, e.g. `["wikipedia.org", "nature.com"]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_domains: Option<Vec<String>>,

    /// Default maximum number of results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,

    /// Default maximum characters per result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_chars_per_result: Option<u32>,
}

impl ParallelSearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_search_type(mut self, search_type: SearchType) -> Self {
        self.search_type = Some(search_type);
        self
    }

    pub fn with_include_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_domains = Some(domains.into_iter().map(Into::into).collect());
        self
    }

    pub const fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub const fn with_max_chars_per_result(mut self, max_chars: u32) -> Self {
        self.max_chars_per_result = Some(max_chars);
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
