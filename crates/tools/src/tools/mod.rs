pub mod base;
pub mod salesforce;

pub use base::{Tool, ToolOutput, ToolResult};
pub use salesforce::{ClientSource, SalesforceTool, DESCRIPTION, TOOL_NAME};
