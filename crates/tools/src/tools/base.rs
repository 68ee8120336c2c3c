use crate::error::ToolError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub output: Option<Value>,
    pub error: Option<String>,
}

/// What a tool call hands back to the model: the backend's data untouched,
/// or a readable error message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolOutput {
    Data(Value),
    Error(String),
}

impl ToolOutput {
    pub fn is_error(&self) -> bool {
        matches!(self, ToolOutput::Error(_))
    }

    pub fn as_error(&self) -> Option<&str> {
        match self {
            ToolOutput::Error(msg) => Some(msg),
            ToolOutput::Data(_) => None,
        }
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            ToolOutput::Data(value) => Some(value),
            ToolOutput::Error(_) => None,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            ToolOutput::Data(value) => value,
            ToolOutput::Error(msg) => Value::String(msg),
        }
    }
}

impl From<ToolOutput> for ToolResult {
    fn from(output: ToolOutput) -> Self {
        match output {
            ToolOutput::Data(value) => ToolResult {
                success: true,
                output: Some(value),
                error: None,
            },
            ToolOutput::Error(msg) => ToolResult {
                success: false,
                output: Some(Value::String(msg.clone())),
                error: Some(msg),
            },
        }
    }
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn schema(&self) -> Value;

    async fn execute(&self, input: Value) -> Result<ToolResult, ToolError>;
}
