use crate::input::SalesforceRequest;
use serde_json::{Map, Value};
use sfclaw_salesforce::{SalesforceClient, SalesforceError};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const ERROR_PREFIX: &str = "Error performing Salesforce operation";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Query,
    Describe,
    ListObjects,
    Create,
    Update,
    Delete,
}

#[derive(Error, Debug)]
pub enum OperationError {
    #[error("{0}")]
    MissingFields(&'static str),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Invalid response from Salesforce describe() call.")]
    InvalidCatalog,

    #[error("{0}")]
    Client(#[from] SalesforceError),

    #[error("{0}")]
    Aborted(String),
}

impl OperationError {
    /// Message handed back to the model.
    pub fn render(&self) -> String {
        format!("{}: {}", ERROR_PREFIX, self)
    }
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Query,
        Operation::Describe,
        Operation::ListObjects,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Query => "query",
            Operation::Describe => "describe",
            Operation::ListObjects => "list_objects",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// Check required fields, then make exactly one client call.
    pub fn execute(
        self,
        client: &dyn SalesforceClient,
        request: &SalesforceRequest,
    ) -> Result<Value, OperationError> {
        match self {
            Operation::Query => {
                let soql = present(&request.query)
                    .ok_or(OperationError::MissingFields("Query string is required"))?;
                Ok(client.query(soql)?)
            }
            Operation::Describe => {
                let object = present(&request.object_name)
                    .ok_or(OperationError::MissingFields("Object name is required"))?;
                Ok(client.describe_object(object)?)
            }
            Operation::ListObjects => {
                let catalog = client.describe_global()?;
                match catalog {
                    Value::Object(mut map) => {
                        map.remove("sobjects").ok_or(OperationError::InvalidCatalog)
                    }
                    _ => Err(OperationError::InvalidCatalog),
                }
            }
            Operation::Create => {
                let missing = OperationError::MissingFields("Object name and record data required");
                match (present(&request.object_name), present_map(&request.record_data)) {
                    (Some(object), Some(data)) => Ok(client.create(object, data)?),
                    _ => Err(missing),
                }
            }
            Operation::Update => {
                let missing =
                    OperationError::MissingFields("Object name, record ID, and data required");
                match (
                    present(&request.object_name),
                    present(&request.record_id),
                    present_map(&request.record_data),
                ) {
                    (Some(object), Some(id), Some(data)) => Ok(client.update(object, id, data)?),
                    _ => Err(missing),
                }
            }
            Operation::Delete => {
                let missing = OperationError::MissingFields("Object name and record ID required");
                match (present(&request.object_name), present(&request.record_id)) {
                    (Some(object), Some(id)) => Ok(client.delete(object, id)?),
                    _ => Err(missing),
                }
            }
        }
    }
}

impl FromStr for Operation {
    type Err = OperationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == name)
            .ok_or_else(|| OperationError::Unsupported(name.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn present_map(field: &Option<Map<String, Value>>) -> Option<&Map<String, Value>> {
    field.as_ref().filter(|m| !m.is_empty())
}
