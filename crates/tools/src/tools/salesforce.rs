use crate::dispatcher::OperationDispatcher;
use crate::error::ToolError;
use crate::input::{normalize, SalesforceRequest};
use crate::operation::Operation;
use crate::tools::base::{Tool, ToolOutput, ToolResult};
use async_trait::async_trait;
use serde_json::{json, Value};
use sfclaw_salesforce::{Credentials, RestClient, SalesforceClient, SalesforceError};
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::{error, info};

pub const TOOL_NAME: &str = "salesforce";

pub const DESCRIPTION: &str = "Interact with Salesforce. Supports SOQL queries, describing \
objects, listing available objects, and creating, updating or deleting records. \
Use operation='query' with a SOQL string, 'describe' or 'list_objects' to explore \
the schema, and 'create'/'update'/'delete' with object_name, record_id and \
record_data to change data.";

/// Where the client handle comes from. An injected client wins outright;
/// credentials are only used to log in when no client is supplied.
pub enum ClientSource {
    Injected(Arc<dyn SalesforceClient>),
    Credentials(Credentials),
}

impl From<Credentials> for ClientSource {
    fn from(credentials: Credentials) -> Self {
        ClientSource::Credentials(credentials)
    }
}

impl From<Arc<dyn SalesforceClient>> for ClientSource {
    fn from(client: Arc<dyn SalesforceClient>) -> Self {
        ClientSource::Injected(client)
    }
}

#[derive(Clone)]
pub struct SalesforceTool {
    dispatcher: OperationDispatcher,
}

impl SalesforceTool {
    /// Build the tool, logging in when given credentials.
    ///
    /// Logging in blocks; inside an async runtime use [`connect`](Self::connect).
    pub fn new(source: impl Into<ClientSource>) -> Result<Self, SalesforceError> {
        let client: Arc<dyn SalesforceClient> = match source.into() {
            ClientSource::Injected(client) => client,
            ClientSource::Credentials(credentials) => {
                info!("Logging in to Salesforce as {}", credentials.username);
                Arc::new(RestClient::login(&credentials)?)
            }
        };
        Ok(Self {
            dispatcher: OperationDispatcher::new(client),
        })
    }

    /// Async-friendly constructor: the login runs on the blocking pool.
    pub async fn connect(source: impl Into<ClientSource>) -> Result<Self, SalesforceError> {
        match source.into() {
            ClientSource::Injected(client) => Self::new(client),
            ClientSource::Credentials(credentials) => {
                tokio::task::spawn_blocking(move || Self::new(credentials))
                    .await
                    .map_err(login_task_failed)?
            }
        }
    }

    pub fn from_client<C>(client: C) -> Self
    where
        C: SalesforceClient + 'static,
    {
        Self {
            dispatcher: OperationDispatcher::new(Arc::new(client)),
        }
    }

    /// JSON schema of the tool arguments.
    pub fn parameters() -> Value {
        let operations: Vec<&str> = Operation::ALL.iter().map(Operation::as_str).collect();
        json!({
            "type": "object",
            "properties": {
                "operation": {
                    "type": "string",
                    "enum": operations,
                    "description": "Operation to perform"
                },
                "query": {
                    "type": "string",
                    "description": "SOQL query string for operation='query'"
                },
                "object_name": {
                    "type": "string",
                    "description": "Salesforce object name, e.g. Account or Contact"
                },
                "record_id": {
                    "type": "string",
                    "description": "Record ID for update and delete"
                },
                "record_data": {
                    "type": "object",
                    "description": "Field values for create and update"
                }
            },
            "required": ["operation"]
        })
    }

    pub fn client(&self) -> &Arc<dyn SalesforceClient> {
        self.dispatcher.client()
    }

    /// Blocking entry point for an already-normalized request.
    pub fn run(&self, request: &SalesforceRequest) -> ToolOutput {
        self.dispatcher.dispatch(request)
    }

    pub async fn arun(&self, request: SalesforceRequest) -> ToolOutput {
        self.dispatcher.dispatch_async(request).await
    }

    /// Blocking entry point for raw framework input (argument mapping or
    /// tool-call envelope). Shape errors are returned before any client call.
    pub fn invoke(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let request = normalize(input)?;
        Ok(self.run(&request))
    }

    pub async fn ainvoke(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let request = normalize(input)?;
        Ok(self.arun(request).await)
    }
}

#[async_trait]
impl Tool for SalesforceTool {
    fn name(&self) -> &'static str {
        TOOL_NAME
    }

    fn description(&self) -> &'static str {
        DESCRIPTION
    }

    fn schema(&self) -> Value {
        Self::parameters()
    }

    async fn execute(&self, input: Value) -> Result<ToolResult, ToolError> {
        Ok(self.ainvoke(input).await?.into())
    }
}

fn login_task_failed(err: JoinError) -> SalesforceError {
    let reason = if err.is_panic() {
        "login panicked"
    } else {
        "login cancelled"
    };
    error!("Salesforce {}", reason);
    SalesforceError::TaskFailed(reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_login_panic_is_not_an_auth_failure() {
        let join_err = tokio::task::spawn_blocking(|| panic!("tls init"))
            .await
            .unwrap_err();

        let err = login_task_failed(join_err);

        assert!(matches!(err, SalesforceError::TaskFailed(_)));
        assert_eq!(err.to_string(), "Login task failed: login panicked");
    }

    #[tokio::test]
    async fn test_login_cancel_is_reported() {
        let handle = tokio::task::spawn(std::future::pending::<()>());
        handle.abort();
        let join_err = handle.await.unwrap_err();

        let err = login_task_failed(join_err);

        assert_eq!(err.to_string(), "Login task failed: login cancelled");
    }
}
