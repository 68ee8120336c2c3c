use crate::input::SalesforceRequest;
use crate::operation::{Operation, OperationError};
use crate::tools::ToolOutput;
use sfclaw_salesforce::SalesforceClient;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Validates one request and forwards it to the client.
///
/// Operation-level failures never escape as `Err`; they come back as
/// [`ToolOutput::Error`] so the caller can feed the message to the model.
/// A client that panics is reported the same way on both entry points.
#[derive(Clone)]
pub struct OperationDispatcher {
    client: Arc<dyn SalesforceClient>,
}

impl OperationDispatcher {
    pub fn new(client: Arc<dyn SalesforceClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<dyn SalesforceClient> {
        &self.client
    }

    pub fn dispatch(&self, request: &SalesforceRequest) -> ToolOutput {
        info!("Dispatching Salesforce operation: {}", request.operation);
        let client = self.client.as_ref();

        let result = match catch_unwind(AssertUnwindSafe(|| execute(client, request))) {
            Ok(result) => result,
            Err(_) => {
                error!("Salesforce operation panicked: {}", request.operation);
                Err(panicked())
            }
        };
        into_output(&request.operation, result)
    }

    /// Same as [`dispatch`](Self::dispatch) but runs the blocking client call
    /// on tokio's blocking pool.
    pub async fn dispatch_async(&self, request: SalesforceRequest) -> ToolOutput {
        info!("Dispatching Salesforce operation (async): {}", request.operation);
        let client = self.client.clone();
        let operation = request.operation.clone();

        let joined =
            tokio::task::spawn_blocking(move || execute(client.as_ref(), &request)).await;

        let result = match joined {
            Ok(result) => result,
            Err(join_err) => {
                if join_err.is_panic() {
                    error!("Salesforce operation panicked: {}", operation);
                    Err(panicked())
                } else {
                    error!("Salesforce operation cancelled: {}", operation);
                    Err(OperationError::Aborted("client call cancelled".into()))
                }
            }
        };
        into_output(&operation, result)
    }
}

fn execute(
    client: &dyn SalesforceClient,
    request: &SalesforceRequest,
) -> Result<serde_json::Value, OperationError> {
    let operation: Operation = request.operation.parse()?;
    operation.execute(client, request)
}

fn panicked() -> OperationError {
    OperationError::Aborted("client call panicked".into())
}

fn into_output(operation: &str, result: Result<serde_json::Value, OperationError>) -> ToolOutput {
    match result {
        Ok(value) => ToolOutput::Data(value),
        Err(err) => {
            warn!("Salesforce operation '{}' failed: {}", operation, err);
            ToolOutput::Error(err.render())
        }
    }
}
