use crate::credentials::Credentials;
use crate::error::{Result, SalesforceError};
use reqwest::blocking::Client;
use reqwest::Url;
use tracing::{debug, info};

const CLIENT_ID: &str = "sfclaw";

#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub session_id: String,
    /// Scheme and host of the org instance, e.g. `https://na1.salesforce.com`.
    pub instance_url: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("session_id", &"<redacted>")
            .field("instance_url", &self.instance_url)
            .finish()
    }
}

/// Partner API `login` call using username, password and security token.
pub fn soap_login(http: &Client, credentials: &Credentials) -> Result<Session> {
    let url = credentials.login_url();
    debug!("SOAP login against {}", url);

    let response = http
        .post(&url)
        .header("Content-Type", "text/xml; charset=UTF-8")
        .header("SOAPAction", "login")
        .body(login_envelope(credentials))
        .send()?;

    let status = response.status();
    let body = response.text()?;

    if !status.is_success() {
        let reason = extract_tag(&body, "faultstring")
            .map(unescape_xml)
            .unwrap_or_else(|| format!("login returned status {}", status));
        return Err(SalesforceError::Authentication(reason));
    }

    let session = parse_login_response(&body)?;
    info!("Authenticated to {}", session.instance_url);
    Ok(session)
}

pub(crate) fn login_envelope(credentials: &Credentials) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8" ?>
<env:Envelope
        xmlns:xsd="http://www.w3.org/2001/XMLSchema"
        xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
        xmlns:env="http://schemas.xmlsoap.org/soap/envelope/"
        xmlns:urn="urn:partner.soap.sforce.com">
    <env:Header>
        <urn:CallOptions>
            <urn:client>{client}</urn:client>
            <urn:defaultNamespace>sf</urn:defaultNamespace>
        </urn:CallOptions>
    </env:Header>
    <env:Body>
        <n1:login xmlns:n1="urn:partner.soap.sforce.com">
            <n1:username>{username}</n1:username>
            <n1:password>{password}{token}</n1:password>
        </n1:login>
    </env:Body>
</env:Envelope>"#,
        client = CLIENT_ID,
        username = escape_xml(&credentials.username),
        password = escape_xml(&credentials.password),
        token = escape_xml(&credentials.security_token),
    )
}

pub(crate) fn parse_login_response(body: &str) -> Result<Session> {
    if let Some(fault) = extract_tag(body, "faultstring") {
        return Err(SalesforceError::Authentication(unescape_xml(fault)));
    }

    let session_id = extract_tag(body, "sessionId")
        .map(unescape_xml)
        .ok_or_else(|| SalesforceError::Parse("login response has no sessionId".into()))?;
    let server_url = extract_tag(body, "serverUrl")
        .map(unescape_xml)
        .ok_or_else(|| SalesforceError::Parse("login response has no serverUrl".into()))?;

    let url = Url::parse(&server_url)
        .map_err(|e| SalesforceError::Parse(format!("invalid serverUrl: {}", e)))?;
    let host = url
        .host_str()
        .ok_or_else(|| SalesforceError::Parse("serverUrl has no host".into()))?;

    Ok(Session {
        session_id,
        instance_url: format!("{}://{}", url.scheme(), host),
    })
}

/// Text of the first `<tag>…</tag>` element, ignoring namespace prefixes.
fn extract_tag<'a>(body: &'a str, tag: &str) -> Option<&'a str> {
    let mut search_from = 0;
    while let Some(rel) = body[search_from..].find('<') {
        let open_start = search_from + rel;
        let open_end = open_start + body[open_start..].find('>')?;
        let name = &body[open_start + 1..open_end];
        let local = name.rsplit(':').next().unwrap_or(name);

        if local == tag {
            let content_start = open_end + 1;
            let close = format!("</{}>", name);
            let content_len = body[content_start..].find(&close)?;
            return Some(&body[content_start..content_start + content_len]);
        }
        search_from = open_end + 1;
    }
    None
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn unescape_xml(raw: &str) -> String {
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN_OK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns="urn:partner.soap.sforce.com">
<soapenv:Body><loginResponse><result>
<metadataServerUrl>https://na1.salesforce.com/services/Soap/m/59.0/00D</metadataServerUrl>
<passwordExpired>false</passwordExpired>
<serverUrl>https://na1.salesforce.com/services/Soap/u/59.0/00D000000000001</serverUrl>
<sessionId>00D000000000001!AQ0AQ&amp;xyz</sessionId>
</result></loginResponse></soapenv:Body></soapenv:Envelope>"#;

    const LOGIN_FAULT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:sf="urn:fault.partner.soap.sforce.com">
<soapenv:Body><soapenv:Fault>
<faultcode>sf:INVALID_LOGIN</faultcode>
<faultstring>INVALID_LOGIN: Invalid username, password, security token; or user locked out.</faultstring>
</soapenv:Fault></soapenv:Body></soapenv:Envelope>"#;

    #[test]
    fn test_parse_login_success() {
        let session = parse_login_response(LOGIN_OK).unwrap();
        assert_eq!(session.instance_url, "https://na1.salesforce.com");
        assert_eq!(session.session_id, "00D000000000001!AQ0AQ&xyz");
    }

    #[test]
    fn test_parse_login_fault() {
        let err = parse_login_response(LOGIN_FAULT).unwrap_err();
        match err {
            SalesforceError::Authentication(msg) => assert!(msg.starts_with("INVALID_LOGIN")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_login_missing_session() {
        let err = parse_login_response("<result><serverUrl>https://x</serverUrl></result>")
            .unwrap_err();
        assert!(matches!(err, SalesforceError::Parse(_)));
    }

    #[test]
    fn test_extract_tag_with_prefix() {
        let body = "<a><sf:exceptionCode>INVALID_LOGIN</sf:exceptionCode></a>";
        assert_eq!(extract_tag(body, "exceptionCode"), Some("INVALID_LOGIN"));
        assert_eq!(extract_tag(body, "missing"), None);
    }

    #[test]
    fn test_envelope_escapes_credentials() {
        let creds = Credentials::new("a&b@example.com", "p<w>").with_security_token("tok");
        let envelope = login_envelope(&creds);
        assert!(envelope.contains("<n1:username>a&amp;b@example.com</n1:username>"));
        assert!(envelope.contains("<n1:password>p&lt;w&gt;tok</n1:password>"));
    }

    #[test]
    fn test_session_debug_redacts() {
        let session = parse_login_response(LOGIN_OK).unwrap();
        assert!(!format!("{:?}", session).contains("AQ0AQ"));
    }
}
