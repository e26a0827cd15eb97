//! login tool: two-phase form login against a site's user service
//!
//! 1. A best-effort preflight POST to the site root harvests session cookies
//!    and token-like headers. Transport failures here are logged and the
//!    login proceeds with default headers only.
//! 2. The credential POST to `/services/User/Login` carries the harvested
//!    headers and the JSON credential body.

use super::cookie_store::{CookieStore, parse_set_cookie};
use super::http::{parse_endpoint, read_text, send};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, COOKIE, HeaderMap, HeaderName, HeaderValue, SET_COOKIE};
use reqwest::{StatusCode, Url};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use toolrouter_application::ToolHandler;
use toolrouter_domain::{
    LoginCredentials, ToolArguments, ToolDefinition, ToolError, ToolId, ToolOutput, ToolParameter,
    truncate,
};
use tracing::{debug, info, warn};

pub const LOGIN_PATH: &str = "/services/User/Login";

/// Longest response body quoted back to the caller
const BODY_PREVIEW: usize = 1000;

/// Header name fragments worth forwarding from the preflight response
const TOKEN_HEADER_HINTS: &[&str] = &["token", "authorization", "csrf", "session"];

pub fn login_definition() -> ToolDefinition {
    ToolDefinition::new(ToolId::Login, "Sign in to a site's user service")
        .with_parameter(ToolParameter::new("username", "Account name", true))
        .with_parameter(ToolParameter::new("password", "Account password", true).with_type("secret"))
        .with_parameter(ToolParameter::new("domain", "Login domain, if the site uses one", false))
        .with_parameter(
            ToolParameter::new("site_address", "Site base URL (defaults to the configured site)", true)
                .with_type("url"),
        )
        .with_parameter(ToolParameter::new("auth_type", "Authentication type code", false))
        .with_placeholder("user and pwd is superadmin,0115")
}

/// How the login response body was interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseBody {
    Empty,
    Json,
    Text,
}

impl ResponseBody {
    /// Classify by inspecting the content, not the `Content-Type` header.
    pub fn classify(body: &str) -> Self {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            ResponseBody::Empty
        } else if serde_json::from_str::<serde_json::Value>(trimmed).is_ok() {
            ResponseBody::Json
        } else {
            ResponseBody::Text
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseBody::Empty => "empty",
            ResponseBody::Json => "json",
            ResponseBody::Text => "text",
        }
    }
}

pub struct LoginTool {
    client: reqwest::Client,
    cookies: Arc<CookieStore>,
}

impl LoginTool {
    pub fn new(client: reqwest::Client, cookies: Arc<CookieStore>) -> Self {
        Self { client, cookies }
    }

    /// Preflight the site root. `Ok(None)` means the preflight failed and
    /// default headers should be used.
    async fn preflight(
        &self,
        site: &Url,
        host: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<HeaderMap>, ToolError> {
        let request = self.client.post(site.clone()).header(ACCEPT, "application/json");
        let response = match send(request, cancel, "login preflight").await {
            Ok(response) => response,
            Err(ToolError::Cancelled) => return Err(ToolError::Cancelled),
            Err(e) => {
                warn!(site = %site, error = %e, "Login preflight failed, using default headers");
                return Ok(None);
            }
        };

        debug!(site = %site, status = %response.status(), "Login preflight answered");
        self.remember_cookies(host, response.headers());
        Ok(Some(token_headers(response.headers())))
    }

    fn remember_cookies(&self, host: &str, headers: &HeaderMap) {
        let cookies: Vec<(String, String)> = headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(parse_set_cookie)
            .collect();
        if !cookies.is_empty() {
            debug!(host, count = cookies.len(), "Storing session cookies");
            self.cookies.store(host, cookies);
        }
    }

    fn render_success(credentials: &LoginCredentials, body: &str, kind: ResponseBody) -> String {
        let headline = format!(
            "Login succeeded for '{}' at {}",
            credentials.username, credentials.site_address
        );
        match kind {
            ResponseBody::Empty => format!("{} (empty response)", headline),
            ResponseBody::Json => {
                let pretty = serde_json::from_str::<serde_json::Value>(body.trim())
                    .ok()
                    .and_then(|value| serde_json::to_string_pretty(&value).ok())
                    .unwrap_or_else(|| body.trim().to_string());
                format!("{}\n{}", headline, pretty)
            }
            ResponseBody::Text => format!("{}\n{}", headline, truncate(body.trim(), BODY_PREVIEW)),
        }
    }
}

/// Key for the cookie store: host plus explicit port.
pub fn host_key(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}

fn token_headers(headers: &HeaderMap) -> HeaderMap {
    let mut forwarded = HeaderMap::new();
    for (name, value) in headers {
        if is_token_header(name) {
            forwarded.insert(name.clone(), value.clone());
        }
    }
    forwarded
}

#[async_trait]
impl ToolHandler for LoginTool {
    fn id(&self) -> ToolId {
        ToolId::Login
    }

    fn definition(&self) -> ToolDefinition {
        login_definition()
    }

    async fn call(
        &self,
        args: &ToolArguments,
        cancel: &CancellationToken,
    ) -> Result<ToolOutput, ToolError> {
        let ToolArguments::Login(credentials) = args else {
            return Err(ToolError::argument("login expects credentials"));
        };

        let site = parse_endpoint(&credentials.site_address)
            .map_err(|_| ToolError::argument(format!("invalid site address '{}'", credentials.site_address)))?;
        let host = host_key(&site);

        let preflight = self.preflight(&site, &host, cancel).await?;
        let preflight_ok = preflight.is_some();

        let login_url = parse_endpoint(&format!(
            "{}{}",
            credentials.site_address.trim_end_matches('/'),
            LOGIN_PATH
        ))?;
        let mut request = self
            .client
            .post(login_url)
            .header(ACCEPT, "application/json, text/plain, */*")
            .json(credentials);
        if let Some(headers) = preflight {
            request = request.headers(headers);
        }
        if let Some(cookie) = self.cookies.header_for(&host)
            && let Ok(value) = HeaderValue::from_str(&cookie)
        {
            request = request.header(COOKIE, value);
        }

        info!(site = %credentials.site_address, username = %credentials.username, "Submitting login");
        let response = send(request, cancel, "login").await?;
        let status = response.status();
        self.remember_cookies(&host, response.headers());
        let body = read_text(response, cancel, "login").await?;

        if status != StatusCode::OK {
            let detail = if body.trim().is_empty() {
                "(empty body)".to_string()
            } else {
                truncate(body.trim(), BODY_PREVIEW)
            };
            warn!(site = %credentials.site_address, status = status.as_u16(), "Login rejected");
            return Err(ToolError::unavailable(format!(
                "login failed with HTTP {}: {}",
                status.as_u16(),
                detail
            )));
        }

        let kind = ResponseBody::classify(&body);
        Ok(ToolOutput::new(Self::render_success(credentials, &body, kind))
            .with_metadata("source", &host)
            .with_metadata("site", &credentials.site_address)
            .with_metadata("status", status.as_u16())
            .with_metadata("response", kind.as_str())
            .with_metadata("preflight", if preflight_ok { "ok" } else { "failed" }))
    }
}

/// Whether a preflight response header is forwarded on the login request.
/// Header names are already lower-case.
pub fn is_token_header(name: &HeaderName) -> bool {
    TOKEN_HEADER_HINTS.iter().any(|hint| name.as_str().contains(hint))
}

#[cfg(test)]
mod tests {
    use super::super::http::test_support::no_proxy_client;
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials(site: &str) -> ToolArguments {
        ToolArguments::Login(LoginCredentials {
            username: "superadmin".to_string(),
            password: "0115".to_string(),
            domain: String::new(),
            site_address: site.to_string(),
            auth_type: "0".to_string(),
        })
    }

    #[test]
    fn test_classify_body() {
        assert_eq!(ResponseBody::classify("  "), ResponseBody::Empty);
        assert_eq!(ResponseBody::classify(r#"{"ok":true}"#), ResponseBody::Json);
        assert_eq!(ResponseBody::classify("Welcome back"), ResponseBody::Text);
    }

    #[test]
    fn test_host_key() {
        let url = Url::parse("http://127.0.0.1:8080/app").unwrap();
        assert_eq!(host_key(&url), "127.0.0.1:8080");
        let url = Url::parse("https://portal.example.com").unwrap();
        assert_eq!(host_key(&url), "portal.example.com");
    }

    #[test]
    fn test_token_header_detection() {
        assert!(is_token_header(&HeaderName::from_static("x-csrf-token")));
        assert!(is_token_header(&HeaderName::from_static("authorization")));
        assert!(!is_token_header(&HeaderName::from_static("content-length")));
    }

    #[tokio::test]
    async fn test_login_forwards_preflight_cookies_and_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "SID=abc123; Path=/; HttpOnly")
                    .insert_header("x-csrf-token", "tok-9"),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .and(header("cookie", "SID=abc123"))
            .and(header("x-csrf-token", "tok-9"))
            .and(body_json(json!({
                "username": "superadmin",
                "password": "0115",
                "domain": "",
                "siteaddress": server.uri(),
                "authenticationType": "0"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "t-1", "user": "superadmin"})))
            .expect(1)
            .mount(&server)
            .await;

        let cookies = Arc::new(CookieStore::new());
        let tool = LoginTool::new(no_proxy_client(), Arc::clone(&cookies));
        let out = tool
            .call(&credentials(&server.uri()), &CancellationToken::new())
            .await
            .unwrap();

        assert!(out.text.starts_with("Login succeeded for 'superadmin'"));
        assert!(out.text.contains("\"token\": \"t-1\""));
        assert_eq!(out.metadata.get("status").map(String::as_str), Some("200"));
        assert_eq!(out.metadata.get("response").map(String::as_str), Some("json"));
        assert_eq!(out.metadata.get("preflight").map(String::as_str), Some("ok"));
        assert!(!out.text.contains("0115"));

        let host = host_key(&Url::parse(&server.uri()).unwrap());
        assert_eq!(cookies.header_for(&host).as_deref(), Some("SID=abc123"));
    }

    #[tokio::test]
    async fn test_plain_text_and_empty_bodies() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("Welcome back"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let tool = LoginTool::new(no_proxy_client(), Arc::new(CookieStore::new()));
        let out = tool
            .call(&credentials(&server.uri()), &CancellationToken::new())
            .await
            .unwrap();
        assert!(out.text.ends_with("\nWelcome back"));
        assert_eq!(out.metadata.get("response").map(String::as_str), Some("text"));

        let empty = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&empty)
            .await;
        let out = tool
            .call(&credentials(&empty.uri()), &CancellationToken::new())
            .await
            .unwrap();
        assert!(out.text.ends_with("(empty response)"));
    }

    #[tokio::test]
    async fn test_rejected_login_surfaces_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let tool = LoginTool::new(no_proxy_client(), Arc::new(CookieStore::new()));
        let err = tool
            .call(&credentials(&server.uri()), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::ServiceUnavailable(_)));
        assert!(err.to_string().contains("HTTP 401"));
        assert!(err.to_string().contains("bad credentials"));
    }

    #[tokio::test]
    async fn test_non_200_success_status_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let tool = LoginTool::new(no_proxy_client(), Arc::new(CookieStore::new()));
        let err = tool
            .call(&credentials(&server.uri()), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("HTTP 204"));
        assert!(err.to_string().contains("(empty body)"));
    }

    #[tokio::test]
    async fn test_unreachable_site_is_network_error() {
        let uri = {
            let server = MockServer::start().await;
            server.uri()
        };

        let tool = LoginTool::new(no_proxy_client(), Arc::new(CookieStore::new()));
        let err = tool
            .call(&credentials(&uri), &CancellationToken::new())
            .await
            .unwrap_err();
        // Preflight failure is swallowed; the login request itself reports it
        assert!(matches!(err, ToolError::Network(_)));
    }

    #[tokio::test]
    async fn test_invalid_site_is_argument_error() {
        let tool = LoginTool::new(no_proxy_client(), Arc::new(CookieStore::new()));
        let err = tool
            .call(&credentials("not a url"), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::ArgumentExtraction(_)));
    }
}
