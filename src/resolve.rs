//! Parameter resolution.
//!
//! Merges per-call input over developer configuration over the built-in per-search-type
//! defaults. [`resolve`] is a pure function of its two arguments: it either returns fully
//! populated [`ResolvedParameters`] or a `ConfigurationError`, never a partial result.
//!
//! | search type   | max_results | max_chars_per_result |
//! |---------------|-------------|----------------------|
//! | `list`        | 20          | 1500                 |
//! | `targeted`    | 5           | 16000                |
//! | `general`     | 10          | 9000                 |
//! | `single_page` | 2           | 30000                |

use serde::Serialize;

use crate::error::{Result, SearchToolError};
use crate::types::{MAX_INCLUDE_DOMAINS, ParallelSearchConfig, ParallelSearchInput, SearchType};

/// Search type used when neither the call nor the config picks one.
pub const DEFAULT_SEARCH_TYPE: SearchType = SearchType::List;

/// Upper bound on `max_results`. Larger model values are rejected, larger config values clamped.
pub const MAX_RESULTS_LIMIT: u32 = 40;

/// Upper bound on `max_chars_per_result`, same policy as [`MAX_RESULTS_LIMIT`].
pub const MAX_CHARS_PER_RESULT_LIMIT: u32 = 30_000;

/// Built-in defaults for one search type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchTypeDefaults {
    pub max_results: u32,
    pub max_chars_per_result: u32,
}

pub const fn search_type_defaults(search_type: SearchType) -> SearchTypeDefaults {
    match search_type {
        SearchType::List => SearchTypeDefaults {
            max_results: 20,
            max_chars_per_result: 1500,
        },
        SearchType::Targeted => SearchTypeDefaults {
            max_results: 5,
            max_chars_per_result: 16000,
        },
        SearchType::General => SearchTypeDefaults {
            max_results: 10,
            max_chars_per_result: 9000,
        },
        SearchType::SinglePage => SearchTypeDefaults {
            max_results: 2,
            max_chars_per_result: 30000,
        },
    }
}

/// Effective parameters for one invocation. Every field is concrete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedParameters {
    pub search_type: SearchType,
    pub max_results: u32,
    pub max_chars_per_result: u32,
    /// Empty means no domain restriction
    pub include_domains: Vec<String>,
}

/// Resolve the effective parameters for `input` under `config`.
///
/// `input` is expected to have passed input validation already; a value that validation
/// would have rejected is reported as a `ConfigurationError`.
pub fn resolve(
    config: &ParallelSearchConfig,
    input: &ParallelSearchInput,
) -> Result<ResolvedParameters> {
    let search_type = input
        .search_type
        .or(config.search_type)
        .unwrap_or(DEFAULT_SEARCH_TYPE);
    let defaults = search_type.defaults();

    let max_results = resolve_count(
        CountField::MaxResults,
        input.max_results,
        config.max_results,
        defaults.max_results,
    )?;
    let max_chars_per_result = resolve_count(
        CountField::MaxCharsPerResult,
        input.max_chars_per_result,
        config.max_chars_per_result,
        defaults.max_chars_per_result,
    )?;

    let include_domains = match (&input.include_domains, &config.include_domains) {
        (Some(domains), _) => {
            if domains.len() > MAX_INCLUDE_DOMAINS {
                return Err(SearchToolError::configuration(format!(
                    "include_domains has {} entries (limit {MAX_INCLUDE_DOMAINS}); input validation was bypassed",
                    domains.len()
                )));
            }
            domains.clone()
        }
        (None, Some(domains)) => domains.clone(),
        (None, None) => Vec::new(),
    };

    Ok(ResolvedParameters {
        search_type,
        max_results,
        max_chars_per_result,
        include_domains,
    })
}

#[derive(Debug, Clone, Copy)]
enum CountField {
    MaxResults,
    MaxCharsPerResult,
}

impl CountField {
    const fn input_name(self) -> &'static str {
        match self {
            Self::MaxResults => "max_results",
            Self::MaxCharsPerResult => "max_chars_per_result",
        }
    }

    const fn config_name(self) -> &'static str {
        match self {
            Self::MaxResults => "maxResults",
            Self::MaxCharsPerResult => "maxCharsPerResult",
        }
    }

    const fn limit(self) -> u32 {
        match self {
            Self::MaxResults => MAX_RESULTS_LIMIT,
            Self::MaxCharsPerResult => MAX_CHARS_PER_RESULT_LIMIT,
        }
    }
}

fn resolve_count(
    field: CountField,
    from_input: Option<u32>,
    from_config: Option<u32>,
    default: u32,
) -> Result<u32> {
    let limit = field.limit();
    match (from_input, from_config) {
        (Some(v), _) if v == 0 || v > limit => Err(SearchToolError::configuration(format!(
            "{} = {v} is outside 1..={limit}; input validation was bypassed",
            field.input_name()
        ))),
        (Some(v), _) => Ok(v),
        (None, Some(0)) => Err(SearchToolError::configuration(format!(
            "tool config {} must be a positive integer",
            field.config_name()
        ))),
        (None, Some(v)) if v > limit => {
            tracing::warn!(
                "tool config {} = {} exceeds {}, clamping",
                field.config_name(),
                v,
                limit
            );
            Ok(limit)
        }
        (None, Some(v)) => Ok(v),
        (None, None) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_list_defaults() {
        let resolved = resolve(
            &ParallelSearchConfig::default(),
            &ParallelSearchInput::new("Find UN founding history"),
        )
        .unwrap();
        assert_eq!(
            resolved,
            ResolvedParameters {
                search_type: SearchType::List,
                max_results: 20,
                max_chars_per_result: 1500,
                include_domains: vec![],
            }
        );
    }

    #[test]
    fn input_overrides_config_overrides_table() {
        let config = ParallelSearchConfig::new().with_search_type(SearchType::Targeted);
        let input = ParallelSearchInput::new("history").with_max_results(3);
        let resolved = resolve(&config, &input).unwrap();
        assert_eq!(resolved.search_type, SearchType::Targeted);
        assert_eq!(resolved.max_results, 3);
        assert_eq!(resolved.max_chars_per_result, 16000);
    }

    #[test]
    fn input_search_type_selects_its_own_defaults() {
        let config = ParallelSearchConfig::new().with_search_type(SearchType::Targeted);
        let input = ParallelSearchInput::new("x").with_search_type(SearchType::SinglePage);
        let resolved = resolve(&config, &input).unwrap();
        assert_eq!(resolved.search_type, SearchType::SinglePage);
        assert_eq!(resolved.max_results, 2);
        assert_eq!(resolved.max_chars_per_result, 30000);
    }

    #[test]
    fn config_counts_beat_table_defaults() {
        let config = ParallelSearchConfig::new()
            .with_search_type(SearchType::General)
            .with_max_results(7)
            .with_max_chars_per_result(2500);
        let resolved = resolve(&config, &ParallelSearchInput::new("x")).unwrap();
        assert_eq!(resolved.max_results, 7);
        assert_eq!(resolved.max_chars_per_result, 2500);
    }

    #[test]
    fn domains_follow_precedence() {
        let config = ParallelSearchConfig::new().with_include_domains(["wikipedia.org"]);

        let from_config = resolve(&config, &ParallelSearchInput::new("x")).unwrap();
        assert_eq!(from_config.include_domains, vec!["wikipedia.org"]);

        let input = ParallelSearchInput::new("x").with_include_domains(["nature.com", "un.org"]);
        let from_input = resolve(&config, &input).unwrap();
        assert_eq!(from_input.include_domains, vec!["nature.com", "un.org"]);

        // An explicitly empty list from the call lifts the config restriction.
        let input = ParallelSearchInput::new("x").with_include_domains(Vec::<String>::new());
        assert!(resolve(&config, &input).unwrap().include_domains.is_empty());
    }

    #[test]
    fn oversized_config_is_clamped() {
        let config = ParallelSearchConfig::new()
            .with_max_results(500)
            .with_max_chars_per_result(1_000_000);
        let resolved = resolve(&config, &ParallelSearchInput::new("x")).unwrap();
        assert_eq!(resolved.max_results, MAX_RESULTS_LIMIT);
        assert_eq!(resolved.max_chars_per_result, MAX_CHARS_PER_RESULT_LIMIT);
    }

    #[test]
    fn zero_config_is_a_configuration_error() {
        let config = ParallelSearchConfig::new().with_max_results(0);
        let err = resolve(&config, &ParallelSearchInput::new("x")).unwrap_err();
        assert!(matches!(err, SearchToolError::ConfigurationError(_)));
        assert!(err.message().contains("maxResults"));
    }

    #[test]
    fn unvalidated_input_is_a_configuration_error() {
        let config = ParallelSearchConfig::default();
        for input in [
            ParallelSearchInput::new("x").with_max_results(0),
            ParallelSearchInput::new("x").with_max_chars_per_result(MAX_CHARS_PER_RESULT_LIMIT + 1),
            ParallelSearchInput::new("x").with_include_domains(vec!["a.com"; 11]),
        ] {
            let err = resolve(&config, &input).unwrap_err();
            assert!(matches!(err, SearchToolError::ConfigurationError(_)));
        }
    }

    #[test]
    fn table_matches_search_type_defaults() {
        assert_eq!(SearchType::List.defaults().max_results, 20);
        assert_eq!(SearchType::Targeted.defaults().max_chars_per_result, 16000);
        assert_eq!(SearchType::General.defaults().max_results, 10);
        assert_eq!(SearchType::SinglePage.defaults().max_chars_per_result, 30000);
        for t in SearchType::ALL {
            let d = t.defaults();
            assert!(d.max_results <= MAX_RESULTS_LIMIT);
            assert!(d.max_chars_per_result <= MAX_CHARS_PER_RESULT_LIMIT);
        }
    }
}
