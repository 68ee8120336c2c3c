pub mod dispatcher;
pub mod error;
pub mod input;
pub mod operation;
pub mod registry;
pub mod tools;

pub use dispatcher::OperationDispatcher;
pub use error::ToolError;
pub use input::{normalize, SalesforceRequest, ToolCall, ToolInput};
pub use operation::{Operation, OperationError, ERROR_PREFIX};
pub use registry::{function_definition, ToolRegistry};
pub use tools::{
    ClientSource, SalesforceTool, Tool, ToolOutput, ToolResult, DESCRIPTION, TOOL_NAME,
};
