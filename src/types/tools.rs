//! Tool definitions handed to a model-calling runtime.

use serde::{Deserialize, Serialize};

/// Tool definition as seen by a runtime: either a plain function or a provider-defined tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Tool {
    #[serde(rename = "function")]
    Function { function: ToolFunction },
    #[serde(rename = "provider")]
    ProviderDefined(ProviderDefinedTool),
}

impl Tool {
    /// Create a new function tool
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self::Function {
            function: ToolFunction {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }

    pub fn provider_defined(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::ProviderDefined(ProviderDefinedTool::new(id, name))
    }

    /// Name the runtime routes calls by.
    pub fn name(&self) -> &str {
        match self {
            Self::Function { function } => &function.name,
            Self::ProviderDefined(pd) => &pd.name,
        }
    }
}

/// Tool function definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolFunction {
    pub name: String,
    pub description: String,
    /// JSON schema for function parameters
    pub parameters: serde_json::Value,
}

/// Provider-defined tool configuration
///
/// The tool id follows `"provider.tool_name"`, e.g. `"gateway.parallel_search"`.
/// Serializes to the `{ type: "provider", id, name, args }` shape when wrapped in [`Tool`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderDefinedTool {
    pub id: String,
    /// Tool name used in the tools map
    pub name: String,
    /// Developer configuration forwarded with the tool
    #[serde(default = "empty_args")]
    pub args: serde_json::Value,
}

fn empty_args() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl ProviderDefinedTool {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            args: empty_args(),
        }
    }

    pub fn with_args(mut self, args: serde_json::Value) -> Self {
        self.args = args;
        self
    }

    /// Provider segment of the id (`"gateway"` for `"gateway.parallel_search"`).
    pub fn provider(&self) -> Option<&str> {
        self.id.split('.').next()
    }

    /// Tool segment of the id.
    pub fn tool_type(&self) -> Option<&str> {
        self.id.split('.').nth(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn provider_defined_wire_shape() {
        let tool = Tool::ProviderDefined(
            ProviderDefinedTool::new("gateway.parallel_search", "parallel_search")
                .with_args(json!({"searchType": "general"})),
        );
        assert_eq!(
            serde_json::to_value(&tool).unwrap(),
            json!({
                "type": "provider",
                "id": "gateway.parallel_search",
                "name": "parallel_search",
                "args": {"searchType": "general"}
            })
        );
    }

    #[test]
    fn provider_defined_args_default_to_empty_object() {
        let tool: Tool = serde_json::from_value(json!({
            "type": "provider",
            "id": "gateway.parallel_search",
            "name": "parallel_search"
        }))
        .unwrap();
        let Tool::ProviderDefined(pd) = tool else {
            panic!("expected provider-defined tool");
        };
        assert_eq!(pd.args, json!({}));
        assert_eq!(pd.provider(), Some("gateway"));
        assert_eq!(pd.tool_type(), Some("parallel_search"));
    }

    #[test]
    fn function_tool_wire_shape() {
        let tool = Tool::function("parallel_search", "Search the web", json!({"type": "object"}));
        assert_eq!(tool.name(), "parallel_search");
        assert_eq!(
            serde_json::to_value(&tool).unwrap(),
            json!({
                "type": "function",
                "function": {
                    "name": "parallel_search",
                    "description": "Search the web",
                    "parameters": {"type": "object"}
                }
            })
        );
    }
}
