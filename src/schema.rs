//! Input and output contracts of the parallel search tool.
//!
//! Both contracts are JSON Schemas, built on first use and cached for the lifetime of the
//! process. After construction they are read-only, so concurrent invocations share them
//! without locking.
//!
//! ## Example
//!
//! ```rust,ignore
//! use siumai_parallel_search::schema::{validate_input_value, PARALLEL_SEARCH_INPUT_SCHEMA};
//! use serde_json::json;
//!
//! let input = validate_input_value(&json!({ "objective": "Find UN founding history" }))?;
//! assert!(PARALLEL_SEARCH_INPUT_SCHEMA.is_built());
//! ```

use std::fmt;
use std::sync::OnceLock;

use serde_json::{Value, json};

use crate::error::{Result, SearchToolError};
use crate::resolve::{MAX_CHARS_PER_RESULT_LIMIT, MAX_RESULTS_LIMIT};
use crate::types::{
    MAX_INCLUDE_DOMAINS, MAX_OBJECTIVE_CHARS, MAX_QUERY_CHARS, MAX_SEARCH_QUERIES,
    ParallelSearchErrorKind, ParallelSearchInput, ParallelSearchOutput, SearchType,
};

/// Cap on violations reported per validation, to keep messages readable for a model.
pub const MAX_REPORTED_VIOLATIONS: usize = 3;

/// A trait for checking JSON values against a schema.
pub trait SchemaValidator: Send + Sync {
    /// Descriptions of why `instance` does not match; empty when it does.
    fn violations(&self, instance: &Value) -> Vec<String>;
}

/// A compiled JSON Schema, reusable across validations.
pub struct JsonSchemaValidator {
    validator: jsonschema::Validator,
}

impl JsonSchemaValidator {
    pub fn new(schema: &Value) -> Result<Self> {
        let validator = jsonschema::validator_for(schema).map_err(|e| {
            SearchToolError::SchemaCompilation(format!("Invalid JSON Schema: {}", e))
        })?;
        Ok(Self { validator })
    }
}

impl SchemaValidator for JsonSchemaValidator {
    fn violations(&self, instance: &Value) -> Vec<String> {
        if self.validator.is_valid(instance) {
            return Vec::new();
        }
        self.validator
            .iter_errors(instance)
            .take(MAX_REPORTED_VIOLATIONS)
            .map(|err| {
                let path = err.instance_path.to_string();
                if path.is_empty() {
                    err.to_string()
                } else {
                    format!("{} at {}", err, path)
                }
            })
            .collect()
    }
}

struct CompiledSchema {
    schema: Value,
    validator: Result<JsonSchemaValidator>,
}

/// A schema whose JSON document and compiled validator are built on first use.
pub struct LazySchema {
    label: &'static str,
    build: fn() -> Value,
    cell: OnceLock<CompiledSchema>,
}

impl LazySchema {
    pub const fn new(label: &'static str, build: fn() -> Value) -> Self {
        Self {
            label,
            build,
            cell: OnceLock::new(),
        }
    }

    fn compiled(&self) -> &CompiledSchema {
        self.cell.get_or_init(|| {
            tracing::debug!(schema = self.label, "building tool schema");
            let schema = (self.build)();
            let validator = JsonSchemaValidator::new(&schema);
            if let Err(e) = &validator {
                tracing::warn!(schema = self.label, "built-in schema failed to compile: {}", e);
            }
            CompiledSchema { schema, validator }
        })
    }

    /// The JSON Schema document.
    pub fn schema(&self) -> &Value {
        &self.compiled().schema
    }

    /// Whether the schema has been built yet.
    pub fn is_built(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn validator(&self) -> Result<&JsonSchemaValidator> {
        self.compiled().validator.as_ref().map_err(Clone::clone)
    }

    /// Violations of `instance` against this schema.
    pub fn violations(&self, instance: &Value) -> Result<Vec<String>> {
        Ok(self.validator()?.violations(instance))
    }
}

impl fmt::Debug for LazySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazySchema")
            .field("label", &self.label)
            .field("built", &self.is_built())
            .finish()
    }
}

/// Input contract: the parameters a model may supply.
pub static PARALLEL_SEARCH_INPUT_SCHEMA: LazySchema =
    LazySchema::new("parallel_search.input", build_input_schema);

/// Output contract: success result set or typed error, never both.
pub static PARALLEL_SEARCH_OUTPUT_SCHEMA: LazySchema =
    LazySchema::new("parallel_search.output", build_output_schema);

fn build_input_schema() -> Value {
    let search_types: Vec<&str> = SearchType::ALL.iter().map(SearchType::as_str).collect();
    json!({
        "type": "object",
        "properties": {
            "objective": {
                "type": "string",
                "minLength": 1,
                "maxLength": MAX_OBJECTIVE_CHARS,
                "description": "Natural-language description of the web research goal. Specifies the broad intent of the search query. Include any source or freshness guidance. Limit to 200 characters."
            },
            "search_type": {
                "type": "string",
                "enum": search_types,
                "description": "Search type controlling depth vs breadth: \"list\" for broad search (20 results), \"targeted\" for specific sources (5 results), \"general\" for balanced (10 results), \"single_page\" for deep extraction (2 results)."
            },
            "search_queries": {
                "type": "array",
                "items": { "type": "string", "maxLength": MAX_QUERY_CHARS },
                "maxItems": MAX_SEARCH_QUERIES,
                "description": "List of keyword search queries (1-6 words each). Related to the objective. Limited to 5 entries of 200 characters each. Usually 1-3 queries are ideal."
            },
            "include_domains": {
                "type": "array",
                "items": { "type": "string" },
                "maxItems": MAX_INCLUDE_DOMAINS,
                "description": "List of domains to restrict search results to. Example: ['wikipedia.org', 'nature.com']. Maximum 10 entries."
            },
            "max_results": {
                "type": "integer",
                "minimum": 1,
                "maximum": MAX_RESULTS_LIMIT,
                "description": "Maximum number of results to return. When not specified, defaults based on search_type."
            },
            "max_chars_per_result": {
                "type": "integer",
                "minimum": 1,
                "maximum": MAX_CHARS_PER_RESULT_LIMIT,
                "description": "Maximum characters per result. When not specified, defaults based on search_type."
            }
        },
        "required": ["objective"]
    })
}

fn build_output_schema() -> Value {
    let error_kinds: Vec<&str> = [
        ParallelSearchErrorKind::ApiError,
        ParallelSearchErrorKind::RateLimit,
        ParallelSearchErrorKind::Timeout,
        ParallelSearchErrorKind::InvalidInput,
        ParallelSearchErrorKind::ConfigurationError,
        ParallelSearchErrorKind::Unknown,
    ]
    .iter()
    .map(ParallelSearchErrorKind::as_str)
    .collect();

    json!({
        "oneOf": [
            {
                "type": "object",
                "properties": {
                    "searchId": { "type": "string" },
                    "results": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "url": { "type": "string" },
                                "title": { "type": "string" },
                                "excerpt": { "type": "string" },
                                "publishDate": { "type": ["string", "null"] },
                                "relevanceScore": { "type": "number" }
                            },
                            "required": ["url", "title", "excerpt"]
                        }
                    }
                },
                "required": ["searchId", "results"],
                "not": { "required": ["error"] }
            },
            {
                "type": "object",
                "properties": {
                    "error": { "type": "string", "enum": error_kinds },
                    "statusCode": { "type": "integer" },
                    "message": { "type": "string", "minLength": 1 }
                },
                "required": ["error", "message"],
                "not": { "required": ["results"] }
            }
        ]
    })
}

/// Validate raw model arguments and decode them into a typed input.
pub fn validate_input_value(arguments: &Value) -> Result<ParallelSearchInput> {
    let violations = PARALLEL_SEARCH_INPUT_SCHEMA.violations(arguments)?;
    if !violations.is_empty() {
        return Err(SearchToolError::InvalidInput(violations.join("; ")));
    }
    let input: ParallelSearchInput = serde_json::from_value(arguments.clone())
        .map_err(|e| SearchToolError::InvalidInput(e.to_string()))?;
    input.validate_params()?;
    Ok(input)
}

/// Check a wire payload against the output contract and decode it.
///
/// A payload matching neither variant is reported as an `Unknown` error.
pub fn validate_output_value(value: &Value) -> Result<ParallelSearchOutput> {
    let violations = PARALLEL_SEARCH_OUTPUT_SCHEMA.violations(value)?;
    if !violations.is_empty() {
        return Err(SearchToolError::unknown(format!(
            "tool output violates the output contract: {}",
            violations.join("; ")
        )));
    }
    ParallelSearchOutput::from_value(value.clone())
}

/// Check a typed output against the output contract.
pub fn validate_output(output: &ParallelSearchOutput) -> Result<()> {
    let value = output.to_value()?;
    validate_output_value(&value).map(|_| ())
}
