//! Tool system: the `Tool` contract, the registry, and the built-in tools.
//!
//! The registry is the single source of truth for which actions exist. The
//! planner reads its name list to build prompts; the executor resolves steps
//! through it.

mod news;
mod retry;
mod weather;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::Config;

pub use news::NewsLookup;
pub use retry::RetryPolicy;
pub use weather::WeatherLookup;

/// Failures raised by the registry or while validating tool input.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool '{0}' not found in registry.")]
    NotFound(String),

    #[error("{tool}: missing required argument '{arg}'")]
    MissingArgument { tool: String, arg: String },

    #[error("{tool}: unexpected argument '{arg}'")]
    UnexpectedArgument { tool: String, arg: String },

    #[error("{tool}: argument '{arg}' must be a {expected}")]
    InvalidArgument {
        tool: String,
        arg: String,
        expected: String,
    },
}

/// A pluggable capability the executor can invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Stable identifier, also the registry key.
    fn name(&self) -> &str;

    /// Human-readable description shown to the planner and the API.
    fn description(&self) -> &str;

    /// JSON schema of the accepted parameters.
    fn parameters_schema(&self) -> Value;

    /// Run the tool with named parameters taken from a plan step.
    async fn run(&self, input: &Map<String, Value>) -> anyhow::Result<Value>;
}

/// Name and description of a registered tool.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

/// Registry of available tools, kept in registration order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in weather and news tools.
    pub fn with_defaults(config: &Config) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(WeatherLookup::new(config.retry.clone())));
        registry.register(Arc::new(NewsLookup::new(
            config.news_api_key.clone(),
            config.retry.clone(),
        )));
        registry
    }

    /// Insert a tool under its own name. Re-registering a name replaces the
    /// implementation but keeps the original position.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        match self.tools.iter().position(|t| t.name() == tool.name()) {
            Some(idx) => self.tools[idx] = tool,
            None => self.tools.push(tool),
        }
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Tool>, ToolError> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .cloned()
            .ok_or_else(|| ToolError::NotFound(name.to_string()))
    }

    /// Names of all registered tools, in registration order.
    pub fn list_tools(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name().to_string()).collect()
    }

    /// Names and descriptions of all registered tools.
    pub fn describe_tools(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|t| ToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
            })
            .collect()
    }

    /// Resolve `name`, check `input` against the tool's schema and run it.
    pub async fn execute(&self, name: &str, input: &Map<String, Value>) -> anyhow::Result<Value> {
        let tool = self.get(name)?;
        check_arguments(tool.name(), &tool.parameters_schema(), input)?;
        tool.run(input).await
    }
}

/// Reject missing required parameters and parameters the schema does not declare.
fn check_arguments(tool: &str, schema: &Value, input: &Map<String, Value>) -> Result<(), ToolError> {
    let properties = schema.get("properties").and_then(Value::as_object);

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for arg in required.iter().filter_map(Value::as_str) {
            if !input.contains_key(arg) {
                return Err(ToolError::MissingArgument {
                    tool: tool.to_string(),
                    arg: arg.to_string(),
                });
            }
        }
    }

    if let Some(properties) = properties {
        if let Some(arg) = input.keys().find(|k| !properties.contains_key(*k)) {
            return Err(ToolError::UnexpectedArgument {
                tool: tool.to_string(),
                arg: arg.clone(),
            });
        }
    }

    Ok(())
}

/// Fetch a required string parameter.
pub(crate) fn required_str<'a>(
    tool: &str,
    input: &'a Map<String, Value>,
    arg: &str,
) -> Result<&'a str, ToolError> {
    match input.get(arg) {
        None => Err(ToolError::MissingArgument {
            tool: tool.to_string(),
            arg: arg.to_string(),
        }),
        Some(value) => value.as_str().ok_or_else(|| ToolError::InvalidArgument {
            tool: tool.to_string(),
            arg: arg.to_string(),
            expected: "string".to_string(),
        }),
    }
}

/// GET `url` and decode the body as JSON, treating non-2xx statuses as errors.
pub(crate) async fn get_json(client: &reqwest::Client, url: &str) -> reqwest::Result<Value> {
    client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<Value>()
        .await
}
