//! Tool system for the planning agent.
//!
//! Each tool is a typed handler with a fixed JSON argument schema. The
//! registry is a closed dispatch table: the model can only name tools that
//! were registered at startup, and every invocation goes through
//! [`ToolRegistry::execute`].

mod catalog;
mod weather;

pub use catalog::{list_flights, list_hotels, FlightOption, FlightOptions, HotelOption, HotelOptions};
pub use weather::{CurrentWeather, WeatherClient, WeatherOutlook, WeatherReport, WeatherSnapshot};

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::Config;

/// A callable the agent may invoke zero or more times per run.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name, as exposed to the model.
    fn name(&self) -> &str;

    /// Human-readable description included in the tool schema.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's arguments.
    fn parameters_schema(&self) -> Value;

    /// Execute the tool with the given arguments.
    async fn execute(&self, args: Value) -> anyhow::Result<String>;
}

/// Name and description pair for prompt construction.
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

/// Registry of available tools.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a registry with the three planning tools registered.
    pub fn new(config: &Config) -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(CurrentWeather::new(WeatherClient::new(
            config.weather_api_key.clone(),
        ))));
        registry.register(Arc::new(FlightOptions));
        registry.register(Arc::new(HotelOptions));
        registry
    }

    /// Create an empty registry.
    pub fn empty() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.push(tool);
    }

    /// List registered tools for prompt construction.
    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|t| ToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
            })
            .collect()
    }

    /// Build OpenAI-format function schemas for all registered tools.
    pub fn get_tool_schemas(&self) -> Vec<Value> {
        self.tools
            .iter()
            .map(|t| {
                json!({
                    "type": "function",
                    "function": {
                        "name": t.name(),
                        "description": t.description(),
                        "parameters": t.parameters_schema(),
                    }
                })
            })
            .collect()
    }

    /// Execute a tool by name.
    pub async fn execute(&self, name: &str, args: Value) -> anyhow::Result<String> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| anyhow::anyhow!("Unknown tool: {}", name))?;

        tool.execute(args).await
    }
}

/// Extract the required `city` string argument shared by all three tools.
fn city_arg(args: &Value) -> anyhow::Result<&str> {
    let city = args["city"]
        .as_str()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| anyhow::anyhow!("Missing 'city' argument"))?;
    Ok(city)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_registry_rejects_unknown_tool() {
        let registry = ToolRegistry::empty();
        let result = registry.execute("no_such_tool", json!({})).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown tool"));
    }

    #[test]
    fn test_planning_registry_exposes_three_tools() {
        let config = Config::new(None, "test/model".to_string());
        let registry = ToolRegistry::new(&config);

        let names: Vec<String> = registry.list_tools().into_iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec!["get_current_weather", "list_flights", "list_hotels"]
        );
    }

    #[test]
    fn test_tool_schemas_are_openai_function_format() {
        let config = Config::new(None, "test/model".to_string());
        let registry = ToolRegistry::new(&config);

        for schema in registry.get_tool_schemas() {
            assert_eq!(schema["type"], "function");
            assert!(schema["function"]["name"].is_string());
            assert_eq!(schema["function"]["parameters"]["type"], "object");
        }
    }

    #[test]
    fn test_city_arg_trims_and_rejects_empty() {
        assert_eq!(city_arg(&json!({"city": " Paris "})).unwrap(), "Paris");
        assert!(city_arg(&json!({"city": "  "})).is_err());
        assert!(city_arg(&json!({})).is_err());
    }
}
