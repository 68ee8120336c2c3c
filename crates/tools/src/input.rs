//! Invocation boundary: whatever the agent framework hands us is normalized
//! into a [`SalesforceRequest`] before any validation runs.

use crate::error::ToolError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Framework tool-call envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub args: Map<String, Value>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToolInput {
    Args(Map<String, Value>),
    Call(ToolCall),
}

/// Canonical request. `operation` stays raw so an unknown name can be
/// reported back to the model instead of failing the call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesforceRequest {
    pub operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_data: Option<Map<String, Value>>,
}

impl SalesforceRequest {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            ..Default::default()
        }
    }

    pub fn query(mut self, soql: impl Into<String>) -> Self {
        self.query = Some(soql.into());
        self
    }

    pub fn object_name(mut self, name: impl Into<String>) -> Self {
        self.object_name = Some(name.into());
        self
    }

    pub fn record_id(mut self, id: impl Into<String>) -> Self {
        self.record_id = Some(id.into());
        self
    }

    pub fn record_data(mut self, data: Map<String, Value>) -> Self {
        self.record_data = Some(data);
        self
    }
}

impl TryFrom<Value> for ToolInput {
    type Error = ToolError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => {
                let is_call = !map.contains_key("operation")
                    && matches!(map.get("args"), Some(Value::Object(_)));
                if is_call {
                    let call: ToolCall = serde_json::from_value(Value::Object(map))
                        .map_err(|e| ToolError::InvalidInput(format!("Invalid tool call: {}", e)))?;
                    Ok(ToolInput::Call(call))
                } else {
                    Ok(ToolInput::Args(map))
                }
            }
            Value::String(_) => Err(ToolError::InvalidInput(
                "Input must be a dictionary with an 'operation' key, got a string".into(),
            )),
            other => Err(ToolError::InvalidInput(format!(
                "Unsupported input type: {}",
                json_type(&other)
            ))),
        }
    }
}

impl From<ToolCall> for ToolInput {
    fn from(call: ToolCall) -> Self {
        ToolInput::Call(call)
    }
}

impl ToolInput {
    pub fn into_request(self) -> Result<SalesforceRequest, ToolError> {
        let mut args = match self {
            ToolInput::Args(args) => args,
            ToolInput::Call(call) => call.args,
        };

        if args.get("operation").map_or(true, Value::is_null) {
            return Err(ToolError::InvalidInput(
                "Input must be a dictionary with an 'operation' key".into(),
            ));
        }

        // `object_id` is an alias; an explicit `record_id` wins.
        if let Some(alias) = args.remove("object_id") {
            if args.get("record_id").map_or(true, Value::is_null) {
                args.insert("record_id".into(), alias);
            }
        }

        serde_json::from_value(Value::Object(args))
            .map_err(|e| ToolError::InvalidInput(format!("Invalid arguments: {}", e)))
    }
}

/// Normalize raw framework input in one step.
pub fn normalize(input: Value) -> Result<SalesforceRequest, ToolError> {
    ToolInput::try_from(input)?.into_request()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
