//! Tool definition types advertised to the model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool definition for an LLM provider
///
/// Describes a tool the model can call: its name, what it does, and the JSON
/// Schema its input must satisfy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (must match the tool in ToolRegistry)
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON schema for the tool's input parameters
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Helpers to build JSON schemas for tools
pub mod schema {
    use serde_json::{Value, json};

    /// Create a JSON schema for an object with properties
    ///
    /// # Example
    ///
    /// ```
    /// use agent_tools::schema;
    /// use serde_json::json;
    ///
    /// let schema = schema::object(
    ///     json!({ "location": schema::string("City name") }),
    ///     &["location"],
    /// );
    /// assert_eq!(schema["required"][0], "location");
    /// ```
    pub fn object(properties: Value, required: &[&str]) -> Value {
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// String property schema
    pub fn string(description: &str) -> Value {
        json!({
            "type": "string",
            "description": description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_definition_serializes_with_schema() {
        let def = ToolDefinition::new(
            "get_live_weather_forecast",
            "Gets the weather forecast",
            schema::object(json!({ "location": schema::string("City") }), &["location"]),
        );

        let value = serde_json::to_value(&def).unwrap();
        assert_eq!(value["name"], "get_live_weather_forecast");
        assert_eq!(value["input_schema"]["type"], "object");
        assert_eq!(value["input_schema"]["properties"]["location"]["type"], "string");
    }

    #[test]
    fn test_empty_required_list() {
        let schema = schema::object(json!({}), &[]);
        assert_eq!(schema["required"], json!([]));
    }
}
