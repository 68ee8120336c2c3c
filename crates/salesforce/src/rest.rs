use crate::client::SalesforceClient;
use crate::credentials::Credentials;
use crate::error::{Result, SalesforceError};
use crate::login::{soap_login, Session};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode};
use serde_json::{json, Map, Value};
use tracing::debug;

/// Blocking REST API client bound to one authenticated session.
///
/// Must not be driven from inside an async runtime thread; wrap calls in
/// `tokio::task::spawn_blocking` there.
pub struct RestClient {
    http: Client,
    session: Session,
    api_version: String,
}

impl RestClient {
    /// Log in with username-password credentials.
    pub fn login(credentials: &Credentials) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("sfclaw/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let session = soap_login(&http, credentials)?;
        Ok(Self::from_session(http, session, &credentials.api_version))
    }

    fn from_session(http: Client, session: Session, api_version: &str) -> Self {
        Self {
            http,
            session: Session {
                instance_url: session.instance_url.trim_end_matches('/').to_string(),
                ..session
            },
            api_version: api_version.to_string(),
        }
    }

    fn base_url(&self) -> String {
        data_url(&self.session.instance_url, &self.api_version)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url(), path);
        debug!("{} {}", method, url);
        self.http
            .request(method, url)
            .bearer_auth(&self.session.session_id)
            .header("Accept", "application/json")
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(SalesforceError::Api {
            status: status.as_u16(),
            message: api_error_message(&body),
        })
    }

    fn json(&self, request: RequestBuilder) -> Result<Value> {
        let response = self.send(request)?;
        response
            .json()
            .map_err(|e| SalesforceError::Parse(e.to_string()))
    }

    /// PATCH/DELETE answer `204 No Content`.
    fn no_content(&self, request: RequestBuilder) -> Result<Value> {
        let response = self.send(request)?;
        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(json!({"success": true, "status": status.as_u16()}));
        }
        let body = response.text()?;
        if body.trim().is_empty() {
            return Ok(json!({"success": true, "status": status.as_u16()}));
        }
        serde_json::from_str(&body).map_err(|e| SalesforceError::Parse(e.to_string()))
    }
}

impl SalesforceClient for RestClient {
    fn query(&self, soql: &str) -> Result<Value> {
        self.json(self.request(Method::GET, "/query/").query(&[("q", soql)]))
    }

    fn describe_object(&self, object_name: &str) -> Result<Value> {
        let path = format!("/sobjects/{}/describe/", segment(object_name));
        self.json(self.request(Method::GET, &path))
    }

    fn describe_global(&self) -> Result<Value> {
        self.json(self.request(Method::GET, "/sobjects/"))
    }

    fn create(&self, object_name: &str, record: &Map<String, Value>) -> Result<Value> {
        let path = format!("/sobjects/{}/", segment(object_name));
        self.json(self.request(Method::POST, &path).json(record))
    }

    fn update(
        &self,
        object_name: &str,
        record_id: &str,
        record: &Map<String, Value>,
    ) -> Result<Value> {
        let path = format!("/sobjects/{}/{}", segment(object_name), segment(record_id));
        self.no_content(self.request(Method::PATCH, &path).json(record))
    }

    fn delete(&self, object_name: &str, record_id: &str) -> Result<Value> {
        let path = format!("/sobjects/{}/{}", segment(object_name), segment(record_id));
        self.no_content(self.request(Method::DELETE, &path))
    }
}

pub(crate) fn data_url(instance_url: &str, api_version: &str) -> String {
    format!(
        "{}/services/data/v{}",
        instance_url.trim_end_matches('/'),
        api_version.trim_start_matches('v')
    )
}

fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

/// Salesforce answers errors with `[{"message": ..., "errorCode": ...}]`.
pub(crate) fn api_error_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let entries = match &parsed {
        Some(Value::Array(items)) => items.iter().collect::<Vec<_>>(),
        Some(obj @ Value::Object(_)) => vec![obj],
        _ => Vec::new(),
    };

    let messages: Vec<String> = entries
        .iter()
        .filter_map(|entry| {
            let message = entry.get("message").and_then(Value::as_str)?;
            Some(match entry.get("errorCode").and_then(Value::as_str) {
                Some(code) => format!("{}: {}", code, message),
                None => message.to_string(),
            })
        })
        .collect();

    if messages.is_empty() {
        body.trim().to_string()
    } else {
        messages.join("; ")
    }
}
