//! Model-facing input parameters.

use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use super::config::SearchType;
use crate::error::SearchToolError;

/// Maximum length of `objective` and of each search query, in characters.
pub const MAX_OBJECTIVE_CHARS: usize = 200;
/// Maximum number of keyword queries.
pub const MAX_SEARCH_QUERIES: usize = 5;
/// Maximum length of a single keyword query, in characters.
pub const MAX_QUERY_CHARS: usize = 200;
/// Maximum number of domains in `include_domains`.
pub const MAX_INCLUDE_DOMAINS: usize = 10;

/// Input parameters for parallel search.
///
/// These are the parameters a model can provide when calling the tool. Field names are
/// snake_case on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate)]
pub struct ParallelSearchInput {
    /// Natural-language description of the web research goal, including any source or
    /// freshness guidance.
    #[validate(
        length(min = 1, max = 200, message = "objective must be between 1 and 200 characters"),
        custom(function = "not_blank", message = "objective must not be blank")
    )]
    pub objective: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_type: Option<SearchType>,

    /// Keyword search queries (1-6 words each) related to the objective.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 5, message = "search_queries accepts at most 5 entries"))]
    pub search_queries: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 10, message = "include_domains accepts at most 10 entries"))]
    pub include_domains: Option<Vec<String>>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_count"
    )]
    #[validate(range(min = 1, max = 40, message = "max_results must be between 1 and 40"))]
    pub max_results: Option<u32>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_count"
    )]
    #[validate(range(
        min = 1,
        max = 30000,
        message = "max_chars_per_result must be between 1 and 30000"
    ))]
    pub max_chars_per_result: Option<u32>,
}

/// Decode an optional count, accepting whole-number floats such as `3.0`.
fn deserialize_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let whole = match number.as_u64() {
        Some(n) => Some(n),
        None => number
            .as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64),
    };
    whole
        .and_then(|n| u32::try_from(n).ok())
        .map(Some)
        .ok_or_else(|| {
            serde::de::Error::custom(format!("expected a non-negative whole number, got {number}"))
        })
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

impl ParallelSearchInput {
    pub fn new(objective: impl Into<String>) -> Self {
        Self {
            objective: objective.into(),
            ..Default::default()
        }
    }

    pub const fn with_search_type(mut self, search_type: SearchType) -> Self {
        self.search_type = Some(search_type);
        self
    }

    pub fn with_search_queries<I, S>(mut self, queries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_queries = Some(queries.into_iter().map(Into::into).collect());
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

    /// Check every input rule, reporting all violations in one `InvalidInput` error.
    pub fn validate_params(&self) -> Result<(), SearchToolError> {
        let mut problems = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => describe(&errors),
        };

        // Per-entry limits are not expressible as derive rules on Option<Vec<_>>.
        if let Some(queries) = &self.search_queries {
            for (i, query) in queries.iter().enumerate() {
                if query.chars().count() > MAX_QUERY_CHARS {
                    problems.push(format!(
                        "search_queries[{i}] exceeds {MAX_QUERY_CHARS} characters"
                    ));
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(SearchToolError::InvalidInput(problems.join("; ")))
        }
    }
}

fn describe(errors: &ValidationErrors) -> Vec<String> {
    let mut out: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field}: {}", e.code),
            })
        })
        .collect();
    out.sort();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn objective_boundary() {
        let ok = ParallelSearchInput::new("a".repeat(MAX_OBJECTIVE_CHARS));
        assert!(ok.validate_params().is_ok());

        let too_long = ParallelSearchInput::new("a".repeat(MAX_OBJECTIVE_CHARS + 1));
        let err = too_long.validate_params().unwrap_err();
        assert!(matches!(err, SearchToolError::InvalidInput(_)));
        assert!(err.message().contains("objective"));
    }

    #[test]
    fn objective_counts_characters_not_bytes() {
        // 200 two-byte characters is still 200 characters.
        let input = ParallelSearchInput::new("é".repeat(200));
        assert!(input.validate_params().is_ok());
    }

    #[test]
    fn blank_objective_is_rejected() {
        assert!(ParallelSearchInput::new("").validate_params().is_err());
        let err = ParallelSearchInput::new("   ").validate_params().unwrap_err();
        assert!(err.message().contains("blank"));
    }

    #[test]
    fn query_limits() {
        let five = ParallelSearchInput::new("x").with_search_queries(vec!["q"; 5]);
        assert!(five.validate_params().is_ok());

        let six = ParallelSearchInput::new("x").with_search_queries(vec!["q"; 6]);
        assert!(six.validate_params().is_err());

        let long = ParallelSearchInput::new("x").with_search_queries(["q".repeat(201)]);
        let err = long.validate_params().unwrap_err();
        assert!(err.message().contains("search_queries[0]"));
    }

    #[test]
    fn domain_limits() {
        let ten = ParallelSearchInput::new("x").with_include_domains(vec!["a.com"; 10]);
        assert!(ten.validate_params().is_ok());

        let eleven = ParallelSearchInput::new("x").with_include_domains(vec!["a.com"; 11]);
        assert!(eleven.validate_params().is_err());
    }

    #[test]
    fn counts_must_be_positive() {
        assert!(
            ParallelSearchInput::new("x")
                .with_max_results(0)
                .validate_params()
                .is_err()
        );
        assert!(
            ParallelSearchInput::new("x")
                .with_max_chars_per_result(0)
                .validate_params()
                .is_err()
        );
        assert!(
            ParallelSearchInput::new("x")
                .with_max_results(41)
                .validate_params()
                .is_err()
        );
    }

    #[test]
    fn reports_every_violation() {
        let input = ParallelSearchInput::new("")
            .with_max_results(0)
            .with_include_domains(vec!["a.com"; 11]);
        let err = input.validate_params().unwrap_err();
        let message = err.message();
        assert!(message.contains("objective"));
        assert!(message.contains("max_results"));
        assert!(message.contains("include_domains"));
    }

    #[test]
    fn wire_shape_is_snake_case() {
        let input = ParallelSearchInput::new("history of the UN")
            .with_search_type(SearchType::Targeted)
            .with_max_chars_per_result(800);
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({
                "objective": "history of the UN",
                "search_type": "targeted",
                "max_chars_per_result": 800
            })
        );
    }

    #[test]
    fn count_limits_track_resolution_limits() {
        use crate::resolve::{MAX_CHARS_PER_RESULT_LIMIT, MAX_RESULTS_LIMIT};

        let at_limit = ParallelSearchInput::new("x")
            .with_max_results(MAX_RESULTS_LIMIT)
            .with_max_chars_per_result(MAX_CHARS_PER_RESULT_LIMIT);
        assert!(at_limit.validate_params().is_ok());

        let over = ParallelSearchInput::new("x").with_max_results(MAX_RESULTS_LIMIT + 1);
        assert!(over.validate_params().is_err());
        let over = ParallelSearchInput::new("x").with_max_chars_per_result(MAX_CHARS_PER_RESULT_LIMIT + 1);
        assert!(over.validate_params().is_err());
    }

    #[test]
    fn counts_accept_whole_number_floats() {
        let input: ParallelSearchInput = serde_json::from_value(json!({
            "objective": "x",
            "max_results": 3.0,
            "max_chars_per_result": 1200
        }))
        .unwrap();
        assert_eq!(input.max_results, Some(3));
        assert_eq!(input.max_chars_per_result, Some(1200));

        let input: ParallelSearchInput =
            serde_json::from_value(json!({"objective": "x", "max_results": null})).unwrap();
        assert_eq!(input.max_results, None);

        for bad in [json!(3.5), json!(-2), json!(-2.0), json!(1e12), json!("3")] {
            let decoded = serde_json::from_value::<ParallelSearchInput>(
                json!({"objective": "x", "max_results": bad}),
            );
            assert!(decoded.is_err(), "{bad} should not decode");
        }
    }
}
