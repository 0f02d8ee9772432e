//! HTTP client for Grocy API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to a Grocy instance.

use std::collections::HashMap;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::GrocyConfig;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the header carrying the API key.
pub const API_KEY_HEADER: &str = "GROCY-API-KEY";

/// HTTP client for making requests to the Grocy API.
///
/// The client handles:
/// - Base URI construction from [`GrocyConfig::api_base`]
/// - Default headers including User-Agent and the API key
/// - TLS verification according to [`GrocyConfig::verify_ssl`]
/// - Mapping of non-2xx responses to [`HttpResponseError`]
///
/// Every call sends exactly one request. There is no retry logic.
///
/// # Example
///
/// ```rust,ignore
/// use grocy_api::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let client = HttpClient::new(&config)?;
/// let request = HttpRequest::builder(HttpMethod::Get, "stock").build()?;
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    /// Base URI (e.g., `https://grocy.local:9192/api`).
    base_uri: String,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &GrocyConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Grocy API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            API_KEY_HEADER.to_string(),
            config.api_key().as_ref().to_string(),
        );

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .danger_accept_invalid_certs(!config.verify_ssl())
            .build()?;

        Ok(Self {
            client,
            base_uri: config.api_base(),
            default_headers,
        })
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request to the Grocy API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!(
            "{}/{}",
            self.base_uri,
            request.path.trim_start_matches('/')
        );

        tracing::debug!(method = %request.http_method, path = %request.path, "Sending Grocy API request");

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.json(body);
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        let body = if body_text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&body_text)
                .unwrap_or_else(|_| serde_json::Value::String(body_text.clone()))
        };

        let response = HttpResponse::new(code, res_headers, body);

        if response.is_ok() {
            return Ok(response);
        }

        let message = Self::error_message(&response, &body_text);
        tracing::debug!(code, %message, path = %request.path, "Grocy API returned an error");

        Err(HttpError::Response(HttpResponseError { code, message }))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Grocy reports failures as `{"error_message": "..."}`.
    fn error_message(response: &HttpResponse, body_text: &str) -> String {
        response
            .body
            .get("error_message")
            .and_then(serde_json::Value::as_str)
            .map_or_else(|| body_text.to_string(), String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiKey, BaseUrl};
    use serde_json::json;

    fn create_test_config() -> GrocyConfig {
        GrocyConfig::builder()
            .base_url(BaseUrl::new("https://grocy.local").unwrap())
            .api_key(ApiKey::new("test-api-key").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_construction_uses_api_base() {
        let client = HttpClient::new(&create_test_config()).unwrap();
        assert_eq!(client.base_uri(), "https://grocy.local:9192/api");
    }

    #[test]
    fn test_api_key_header_injection() {
        let client = HttpClient::new(&create_test_config()).unwrap();
        assert_eq!(
            client.default_headers().get(API_KEY_HEADER),
            Some(&"test-api-key".to_string())
        );
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&create_test_config()).unwrap();
        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("Grocy API Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = GrocyConfig::builder()
            .base_url(BaseUrl::new("https://grocy.local").unwrap())
            .api_key(ApiKey::new("key").unwrap())
            .user_agent_prefix("HomeDashboard/2.0")
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("HomeDashboard/2.0 | "));
    }

    #[test]
    fn test_client_without_ssl_verification_builds() {
        let config = GrocyConfig::builder()
            .base_url(BaseUrl::new("https://grocy.local").unwrap())
            .api_key(ApiKey::new("key").unwrap())
            .verify_ssl(false)
            .build()
            .unwrap();
        assert!(HttpClient::new(&config).is_ok());
    }

    #[test]
    fn test_error_message_prefers_grocy_field() {
        let response = HttpResponse::new(
            400,
            HashMap::new(),
            json!({"error_message": "Product does not exist"}),
        );
        assert_eq!(
            HttpClient::error_message(&response, "ignored"),
            "Product does not exist"
        );

        let response = HttpResponse::new(502, HashMap::new(), json!("Bad Gateway"));
        assert_eq!(
            HttpClient::error_message(&response, "Bad Gateway"),
            "Bad Gateway"
        );
    }
}
