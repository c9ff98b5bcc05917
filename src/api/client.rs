//
//  yacargo
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the Cargo API
//!
//! This module provides the transport used by every operation. Operations
//! never touch HTTP directly: they build an [`ApiRequest`] value (method,
//! resource, query and body) and hand it to [`CargoClient::execute`] or
//! [`CargoClient::download`], which perform exactly one round trip.
//!
//! ## Features
//!
//! - Production and test host selection
//! - Bearer authentication, `Accept-Language` and User-Agent headers
//! - Equivalent `curl` command logged at `debug` level (token masked)
//! - Status code mapping into [`ApiError`]
//! - Streaming downloads for documents and reports

use std::path::{Path, PathBuf};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use url::Url;

use super::common::{is_known_error_code, ApiError, ErrorBody};
use crate::config::Config;

type Result<T> = std::result::Result<T, ApiError>;

/// Production API host.
pub const PRODUCTION_HOST: &str = "b2b.taxi.yandex.net";

/// Test API host.
pub const TEST_HOST: &str = "b2b.taxi.tst.yandex.net";

/// Path prefix shared by every resource.
pub const API_PREFIX: &str = "/b2b/cargo/integration/";

/// Response header carrying the journal polling hint, in milliseconds.
pub const POLLING_DELAY_HEADER: &str = "X-Polling-Delay-Ms";

/// Language requested for server messages.
pub const ACCEPT_LANGUAGE_VALUE: &str = "ru";

/// A fully built request, ready to be sent.
///
/// Request builders produce this value without doing any I/O, which keeps
/// validation testable on its own: a builder that fails never reaches the
/// transport.
///
/// # Example
///
/// ```rust
/// use yacargo::api::client::ApiRequest;
///
/// let request = ApiRequest::post("v1/claims/accept")
///     .query("claim_id", "abc")
///     .body(serde_json::json!({"version": 1}));
///
/// assert_eq!(request.path(), "/b2b/cargo/integration/v1/claims/accept");
/// assert_eq!(request.query_value("claim_id"), Some("abc"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method: GET for retrievals, POST otherwise.
    pub method: Method,
    /// Versioned resource, e.g. `v2/claims/create`.
    pub resource: &'static str,
    /// Query string parameters, in insertion order.
    pub query: Vec<(&'static str, String)>,
    /// JSON body, if the operation sends one.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Creates a request with the given method and resource.
    pub fn new(method: Method, resource: &'static str) -> Self {
        Self {
            method,
            resource,
            query: Vec::new(),
            body: None,
        }
    }

    /// Creates a GET request.
    pub fn get(resource: &'static str) -> Self {
        Self::new(Method::GET, resource)
    }

    /// Creates a POST request.
    pub fn post(resource: &'static str) -> Self {
        Self::new(Method::POST, resource)
    }

    /// Appends a query parameter.
    pub fn query(mut self, name: &'static str, value: impl ToString) -> Self {
        self.query.push((name, value.to_string()));
        self
    }

    /// Sets the JSON body.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns the absolute path of the resource.
    pub fn path(&self) -> String {
        format!("{}{}", API_PREFIX, self.resource)
    }

    /// Returns the first query value stored under `name`.
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// A successful JSON response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code, always 2xx.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// Decoded body, `Value::Null` for an empty body.
    pub body: Value,
}

impl ApiResponse {
    /// Returns a header value if it is present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Deserializes the body into `T`.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_value(self.body)?)
    }
}

/// Result of a download operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    /// Where the body was written.
    pub path: PathBuf,
    /// Number of bytes written.
    pub bytes_written: u64,
    /// `Content-Type` reported by the server.
    pub content_type: Option<String>,
}

/// The HTTP client for the cargo API.
///
/// A client is configured once (host and token) and is then read-only, so
/// a single instance may be shared between tasks.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use yacargo::api::CargoClient;
///
/// let client = CargoClient::new("your-oauth-token", false)?;
/// assert_eq!(client.base_url(), "https://b2b.taxi.yandex.net");
///
/// let test = CargoClient::new("your-oauth-token", true)?;
/// assert_eq!(test.base_url(), "https://b2b.taxi.tst.yandex.net");
/// # Ok::<(), yacargo::api::ApiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CargoClient {
    /// The underlying HTTP client, carrying the default headers
    http: Client,
    /// Scheme and authority, without a trailing slash
    base_url: String,
    /// Whether the test host was selected
    test_server: bool,
}

impl CargoClient {
    /// Creates a client for the production or the test host.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if `token` is empty or cannot be sent
    /// as a header value.
    pub fn new(token: impl AsRef<str>, test_server: bool) -> Result<Self> {
        let host = if test_server { TEST_HOST } else { PRODUCTION_HOST };
        Ok(Self {
            http: build_http_client(token.as_ref())?,
            base_url: format!("https://{}", host),
            test_server,
        })
    }

    /// Creates a client from the user configuration.
    ///
    /// `base_url` from the configuration wins over `test_server`.
    pub fn from_config(config: &Config, token: impl AsRef<str>) -> Result<Self> {
        let client = Self::new(token, config.test_server)?;
        match config.base_url.as_deref() {
            Some(url) => client.with_base_url(url),
            None => Ok(client),
        }
    }

    /// Points the client at another server, e.g. a local mock.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if `url` is not an absolute http(s) URL.
    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        let parsed = Url::parse(url)
            .map_err(|e| ApiError::Config(format!("Invalid base URL '{}': {}", url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ApiError::Config(format!(
                "Base URL must be an http(s) URL with a host, got '{}'",
                url
            )));
        }
        self.base_url = url.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns `true` if the client targets the test host.
    pub fn is_test_server(&self) -> bool {
        self.test_server
    }

    /// Returns the full URL for a request, query string included.
    pub fn url(&self, request: &ApiRequest) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, request.path());
        let mut url =
            Url::parse(&raw).map_err(|e| ApiError::Config(format!("Invalid URL '{}': {}", raw, e)))?;
        if !request.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(request.query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// Renders the request as an equivalent `curl` command.
    ///
    /// The bearer token is masked and every argument is single-quoted, so
    /// the command can be pasted into a POSIX shell.
    pub fn curl_command(&self, request: &ApiRequest) -> Result<String> {
        let url = self.url(request)?;
        let mut headers = vec![
            format!("Accept-Language: {}", ACCEPT_LANGUAGE_VALUE),
            "Authorization: Bearer ***".to_string(),
            format!("User-Agent: {}", crate::USER_AGENT),
        ];
        if request.body.is_some() {
            headers.push("Content-Type: application/json".to_string());
        }
        headers.sort();

        let mut command = format!("curl -X {}", request.method);
        for header in &headers {
            command.push_str(&format!(" -H {}", shell_quote(header)));
        }
        if let Some(body) = &request.body {
            command.push_str(&format!(" -d {}", shell_quote(&body.to_string())));
        }
        command.push_str(&format!(" {}", shell_quote(url.as_str())));
        Ok(command)
    }

    /// Sends the request and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Network`] if the server could not be reached
    /// - [`ApiError::Unauthorized`] for 401 and 403
    /// - [`ApiError::Api`] for 400, 404 and 409
    /// - [`ApiError::UnexpectedStatus`] for any other non-2xx status
    /// - [`ApiError::Decode`] if a success body is not JSON
    pub async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let response = self.send(request).await?;
        let status = response.status();
        let headers = response.headers().clone();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, &text));
        }

        let bytes = response.bytes().await?;
        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        tracing::debug!("Received JSON: {}", body);

        Ok(ApiResponse {
            status: status.as_u16(),
            headers,
            body,
        })
    }

    /// Sends the request and streams the response body into `destination`.
    ///
    /// The status is checked before the file is created, so an error
    /// response never leaves a file behind.
    pub async fn download(&self, request: &ApiRequest, destination: &Path) -> Result<DownloadedFile> {
        let mut response = self.send(request).await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, &text));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let mut file = tokio::fs::File::create(destination).await?;
        let mut bytes_written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            bytes_written += chunk.len() as u64;
        }
        file.flush().await?;

        tracing::debug!("Saved {} bytes to {}", bytes_written, destination.display());

        Ok(DownloadedFile {
            path: destination.to_path_buf(),
            bytes_written,
            content_type,
        })
    }

    async fn send(&self, request: &ApiRequest) -> Result<reqwest::Response> {
        let url = self.url(request)?;

        tracing::debug!("Requesting resource {}", url);
        tracing::debug!("Requesting params {:?}", request.query);
        if let Some(body) = &request.body {
            tracing::debug!("Requesting body {}", body);
        }
        tracing::debug!("CURL: {}", self.curl_command(request)?);

        let mut builder = self.http.request(request.method.clone(), url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!("{}", e);
            ApiError::Network(e)
        })?;

        tracing::debug!("Status code {}", response.status().as_u16());
        tracing::debug!("Received headers: {:?}", response.headers());
        Ok(response)
    }
}

/// Wraps `value` in single quotes, closing and reopening them around any
/// embedded quote.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

fn build_http_client(token: &str) -> Result<Client> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ApiError::Config(
            "You must provide an authorization token to access the cargo API".to_string(),
        ));
    }

    let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| ApiError::Config("Authorization token contains invalid characters".to_string()))?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));

    Client::builder()
        .user_agent(crate::USER_AGENT)
        .default_headers(headers)
        .build()
        .map_err(|e| ApiError::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Maps a non-success status and its body onto an [`ApiError`].
///
/// Codes outside [`KNOWN_ERROR_CODES`](super::common::KNOWN_ERROR_CODES)
/// are logged and still returned.
pub fn error_for_status(status: StatusCode, body: &str) -> ApiError {
    let status = status.as_u16();
    match status {
        401 | 403 => {
            let ErrorBody { code, message } = ErrorBody::parse(body);
            tracing::error!("Not authorized ({}): {}", status, message);
            ApiError::Unauthorized {
                status,
                code,
                message,
            }
        }
        400 | 404 | 409 => {
            let ErrorBody { code, message } = ErrorBody::parse(body);
            if !code.is_empty() && !is_known_error_code(&code) {
                tracing::error!("Unknown error code received: {}", code);
            }
            tracing::error!("{}: {}", code, message);
            ApiError::Api {
                status,
                code,
                message,
            }
        }
        _ => ApiError::UnexpectedStatus {
            status,
            body: body.trim().to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_token_is_config_error() {
        let err = CargoClient::new("", false).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
        let err = CargoClient::new("   ", true).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_hosts() {
        let prod = CargoClient::new("token", false).unwrap();
        assert_eq!(prod.base_url(), "https://b2b.taxi.yandex.net");
        assert!(!prod.is_test_server());

        let test = CargoClient::new("token", true).unwrap();
        assert_eq!(test.base_url(), "https://b2b.taxi.tst.yandex.net");
        assert!(test.is_test_server());
    }

    #[test]
    fn test_with_base_url() {
        let client = CargoClient::new("token", false)
            .unwrap()
            .with_base_url("http://127.0.0.1:1234/")
            .unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:1234");

        let err = CargoClient::new("token", false)
            .unwrap()
            .with_base_url("not a url")
            .unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_url_includes_query() {
        let client = CargoClient::new("token", false).unwrap();
        let request = ApiRequest::post("v1/claims/accept").query("claim_id", "abc");
        assert_eq!(
            client.url(&request).unwrap().as_str(),
            "https://b2b.taxi.yandex.net/b2b/cargo/integration/v1/claims/accept?claim_id=abc"
        );

        let request = ApiRequest::post("v1/claims/journal");
        assert!(!client.url(&request).unwrap().as_str().contains('?'));
    }

    #[test]
    fn test_curl_command_masks_token() {
        let client = CargoClient::new("secret-token", false).unwrap();
        let request = ApiRequest::post("v1/claims/accept")
            .query("claim_id", "abc")
            .body(json!({"version": 1}));
        let curl = client.curl_command(&request).unwrap();

        assert!(curl.starts_with("curl -X POST"));
        assert!(curl.contains("'Authorization: Bearer ***'"));
        assert!(!curl.contains("secret-token"));
        assert!(curl.contains(r#"-d '{"version":1}'"#));
        assert!(curl.ends_with("v1/claims/accept?claim_id=abc'"));
    }

    #[test]
    fn test_curl_command_escapes_quotes() {
        let client = CargoClient::new("secret-token", false).unwrap();
        let request = ApiRequest::post("v2/claims/create").body(json!({"comment": "Rick's door"}));
        let curl = client.curl_command(&request).unwrap();

        assert!(curl.contains(r#"-d '{"comment":"Rick'\''s door"}'"#));
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote("plain"), "'plain'");
    }

    #[test]
    fn test_error_for_status_mapping() {
        let body = r#"{"code":"not_found","message":"x"}"#;
        let err = error_for_status(StatusCode::NOT_FOUND, body);
        assert_eq!(err.code(), Some("not_found"));
        assert!(matches!(err, ApiError::Api { status: 404, .. }));

        let err = error_for_status(StatusCode::FORBIDDEN, r#"{"code":"forbidden","message":"no"}"#);
        assert!(matches!(err, ApiError::Unauthorized { status: 403, .. }));

        let err = error_for_status(StatusCode::UNAUTHORIZED, "");
        assert!(matches!(err, ApiError::Unauthorized { status: 401, .. }));

        let err = error_for_status(StatusCode::CONFLICT, r#"{"code":"old_version","message":"m"}"#);
        assert!(err.is_known_code());

        let err = error_for_status(StatusCode::TOO_MANY_REQUESTS, "slow down");
        assert!(matches!(err, ApiError::UnexpectedStatus { status: 429, ref body } if body == "slow down"));
    }

    #[test]
    fn test_request_builder() {
        let request = ApiRequest::get("v1/claims/performer-position").query("claim_id", "abc");
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.query_value("claim_id"), Some("abc"));
        assert_eq!(request.query_value("version"), None);
        assert!(request.body.is_none());
    }
}
