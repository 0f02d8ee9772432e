//! Configuration types for the Grocy API client.
//!
//! # Overview
//!
//! - [`GrocyConfig`]: connection settings for one Grocy instance
//! - [`GrocyConfigBuilder`]: a builder for constructing [`GrocyConfig`] instances
//! - [`ApiKey`]: a validated API key newtype with masked debug output
//! - [`BaseUrl`]: a validated instance URL
//!
//! # Example
//!
//! ```rust
//! use grocy_api::{ApiKey, BaseUrl, GrocyConfig};
//!
//! let config = GrocyConfig::builder()
//!     .base_url(BaseUrl::new("https://grocy.local").unwrap())
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_base(), "https://grocy.local:9192/api");
//! ```

mod newtypes;

pub use newtypes::{ApiKey, BaseUrl};

use crate::error::ConfigError;

/// Port of the Grocy add-on when none is configured.
pub const DEFAULT_PORT_NUMBER: u16 = 9192;

/// Connection settings for a Grocy instance.
///
/// `GrocyConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct GrocyConfig {
    base_url: BaseUrl,
    api_key: ApiKey,
    port: u16,
    path: Option<String>,
    verify_ssl: bool,
    user_agent_prefix: Option<String>,
}

impl GrocyConfig {
    /// Creates a new builder for constructing a `GrocyConfig`.
    #[must_use]
    pub fn builder() -> GrocyConfigBuilder {
        GrocyConfigBuilder::new()
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the extra path prefix, if configured.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns whether TLS certificates are verified.
    #[must_use]
    pub const fn verify_ssl(&self) -> bool {
        self.verify_ssl
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the root every API path is resolved against.
    ///
    /// The format is `{base_url}:{port}/api`, or `{base_url}:{port}/{path}/api`
    /// when a path prefix is configured.
    #[must_use]
    pub fn api_base(&self) -> String {
        match self.path() {
            Some(path) => format!("{}:{}/{path}/api", self.base_url, self.port),
            None => format!("{}:{}/api", self.base_url, self.port),
        }
    }
}

// Verify GrocyConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GrocyConfig>();
};

/// Builder for constructing [`GrocyConfig`] instances.
///
/// Required fields are `base_url` and `api_key`.
///
/// # Defaults
///
/// - `port`: [`DEFAULT_PORT_NUMBER`]
/// - `path`: `None`
/// - `verify_ssl`: `true`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct GrocyConfigBuilder {
    base_url: Option<BaseUrl>,
    api_key: Option<ApiKey>,
    port: Option<u16>,
    path: Option<String>,
    verify_ssl: Option<bool>,
    user_agent_prefix: Option<String>,
}

impl GrocyConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets a path prefix between the port and `/api`.
    ///
    /// Leading and trailing slashes are removed; an empty path clears it.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        let trimmed = path.trim_matches('/');
        self.path = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Sets whether TLS certificates are verified.
    #[must_use]
    pub const fn verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = Some(verify);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`GrocyConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` or
    /// `api_key` are not set.
    pub fn build(self) -> Result<GrocyConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        Ok(GrocyConfig {
            base_url,
            api_key,
            port: self.port.unwrap_or(DEFAULT_PORT_NUMBER),
            path: self.path,
            verify_ssl: self.verify_ssl.unwrap_or(true),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> GrocyConfigBuilder {
        GrocyConfig::builder()
            .base_url(BaseUrl::new("https://grocy.local").unwrap())
            .api_key(ApiKey::new("key").unwrap())
    }

    #[test]
    fn test_builder_requires_base_url() {
        let result = GrocyConfigBuilder::new()
            .api_key(ApiKey::new("key").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "base_url" })
        ));
    }

    #[test]
    fn test_builder_requires_api_key() {
        let result = GrocyConfigBuilder::new()
            .base_url(BaseUrl::new("https://grocy.local").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "api_key" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = base().build().unwrap();

        assert_eq!(config.port(), DEFAULT_PORT_NUMBER);
        assert!(config.path().is_none());
        assert!(config.verify_ssl());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_api_base_without_path() {
        let config = base().port(443).build().unwrap();
        assert_eq!(config.api_base(), "https://grocy.local:443/api");
    }

    #[test]
    fn test_api_base_with_path_prefix() {
        let config = base().path("/grocy/").build().unwrap();
        assert_eq!(config.path(), Some("grocy"));
        assert_eq!(config.api_base(), "https://grocy.local:9192/grocy/api");
    }

    #[test]
    fn test_empty_path_is_ignored() {
        let config = base().path("/").build().unwrap();
        assert!(config.path().is_none());
    }

    #[test]
    fn test_config_debug_masks_api_key() {
        let config = GrocyConfig::builder()
            .base_url(BaseUrl::new("https://grocy.local").unwrap())
            .api_key(ApiKey::new("very-secret").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("GrocyConfig"));
        assert!(!debug_str.contains("very-secret"));
    }
}
