use crate::error::Result;
use serde_json::{Map, Value};

/// Authenticated handle to a Salesforce org.
///
/// Calls are blocking. Results are returned exactly as Salesforce produced
/// them so callers can hand them to a model untouched.
pub trait SalesforceClient: Send + Sync {
    /// Run a SOQL query and return the raw response (`totalSize`, `done`, `records`).
    fn query(&self, soql: &str) -> Result<Value>;

    /// Field and relationship metadata for one sObject type.
    fn describe_object(&self, object_name: &str) -> Result<Value>;

    /// Global describe: the org's object catalog under `sobjects`.
    fn describe_global(&self) -> Result<Value>;

    fn create(&self, object_name: &str, record: &Map<String, Value>) -> Result<Value>;

    fn update(&self, object_name: &str, record_id: &str, record: &Map<String, Value>)
        -> Result<Value>;

    fn delete(&self, object_name: &str, record_id: &str) -> Result<Value>;
}
