//! Agent tool surface
//!
//! Exposes the resolver as a named tool with a JSON Schema for its arguments,
//! so an external orchestration layer can list it, let a model pick it, and
//! hand back the call. Calls are a tagged enum; adding a tool means adding a
//! variant and a definition.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::LocationWeatherResolver;

pub const GET_WEATHER: &str = "get_weather";

/// Name, description and argument schema of one tool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// Definitions of every tool this crate provides
#[must_use]
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![ToolDefinition {
        name: GET_WEATHER,
        description: "Get the current weather for a place. Input is a city or place name, \
                      e.g. 'San Francisco' or 'Paris, France'. Returns temperature, \
                      feels-like temperature, humidity, wind speed, precipitation and \
                      whether it is day or night there.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "City or place name, optionally followed by region and country"
                }
            },
            "required": ["location"]
        }),
    }]
}

/// A tool invocation as produced by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "arguments", rename_all = "snake_case")]
pub enum ToolCall {
    GetWeather { location: String },
}

/// Result handed back to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolOutput {
    Success { result: String },
    Failure { error: String, message: String },
}

impl ToolOutput {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ToolOutput::Success { .. })
    }
}

/// Executes tool calls against a resolver
#[derive(Clone)]
pub struct WeatherTool {
    resolver: LocationWeatherResolver,
}

impl WeatherTool {
    #[must_use]
    pub fn new(resolver: LocationWeatherResolver) -> Self {
        Self { resolver }
    }

    pub async fn invoke(&self, call: ToolCall) -> ToolOutput {
        match call {
            ToolCall::GetWeather { location } => {
                info!("Tool {} called for '{}'", GET_WEATHER, location);
                match self.resolver.resolve(&location).await {
                    Ok(report) => ToolOutput::Success {
                        result: report.into_text(),
                    },
                    Err(e) => ToolOutput::Failure {
                        error: e.kind().to_string(),
                        message: e.user_message(),
                    },
                }
            }
        }
    }

    /// Parse a raw JSON call first; unknown tools and bad arguments come back
    /// as an `invalid_call` failure instead of an error.
    pub async fn invoke_json(&self, payload: Value) -> ToolOutput {
        match serde_json::from_value::<ToolCall>(payload) {
            Ok(call) => self.invoke(call).await,
            Err(e) => {
                debug!("Rejected tool call: {}", e);
                ToolOutput::Failure {
                    error: "invalid_call".to_string(),
                    message: format!("Invalid tool call: {e}"),
                }
            }
        }
    }
}
