#![allow(dead_code)]

use serde_json::{json, Map, Value};
use sfclaw_salesforce::{SalesforceClient, SalesforceError};
use sfclaw_tools::SalesforceTool;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Query(String),
    DescribeObject(String),
    DescribeGlobal,
    Create(String, Map<String, Value>),
    Update(String, String, Map<String, Value>),
    Delete(String, String),
}

/// In-memory stand-in for an org, recording every call it receives.
pub struct MockSalesforce {
    pub calls: Mutex<Vec<Call>>,
    pub catalog: Value,
    pub fail_with: Option<String>,
    pub panic_on_query: bool,
}

impl MockSalesforce {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            catalog: json!({"sobjects": [{"name": "Account"}]}),
            fail_with: None,
            panic_on_query: false,
        }
    }

    pub fn with_catalog(mut self, catalog: Value) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.fail_with = Some(message.to_string());
        self
    }

    pub fn panicking(mut self) -> Self {
        self.panic_on_query = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), SalesforceError> {
        self.calls.lock().unwrap().push(call);
        match &self.fail_with {
            Some(message) => Err(SalesforceError::Http(message.clone())),
            None => Ok(()),
        }
    }
}

impl SalesforceClient for MockSalesforce {
    fn query(&self, soql: &str) -> Result<Value, SalesforceError> {
        if self.panic_on_query {
            panic!("query exploded");
        }
        self.record(Call::Query(soql.to_string()))?;
        Ok(json!({"records": [{"Id": "1", "Name": "Test"}]}))
    }

    fn describe_object(&self, object_name: &str) -> Result<Value, SalesforceError> {
        self.record(Call::DescribeObject(object_name.to_string()))?;
        Ok(json!({"fields": []}))
    }

    fn describe_global(&self) -> Result<Value, SalesforceError> {
        self.record(Call::DescribeGlobal)?;
        Ok(self.catalog.clone())
    }

    fn create(&self, object_name: &str, record: &Map<String, Value>) -> Result<Value, SalesforceError> {
        self.record(Call::Create(object_name.to_string(), record.clone()))?;
        Ok(json!({"id": "1", "success": true}))
    }

    fn update(
        &self,
        object_name: &str,
        record_id: &str,
        record: &Map<String, Value>,
    ) -> Result<Value, SalesforceError> {
        self.record(Call::Update(
            object_name.to_string(),
            record_id.to_string(),
            record.clone(),
        ))?;
        Ok(json!({"success": true}))
    }

    fn delete(&self, object_name: &str, record_id: &str) -> Result<Value, SalesforceError> {
        self.record(Call::Delete(object_name.to_string(), record_id.to_string()))?;
        Ok(json!({"success": true}))
    }
}

pub fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

pub fn tool_with(mock: MockSalesforce) -> (Arc<MockSalesforce>, SalesforceTool) {
    let mock = Arc::new(mock);
    let client: Arc<dyn SalesforceClient> = mock.clone();
    let tool = SalesforceTool::new(client).unwrap();
    (mock, tool)
}
