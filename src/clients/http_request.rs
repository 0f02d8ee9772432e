//! HTTP request types.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests to the Grocy API.

use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the Grocy API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for actions and creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// An HTTP request to be sent to the Grocy API.
///
/// Bodies are always sent as JSON. Query parameters are kept as an ordered
/// list because Grocy filters repeat the `query[]` key.
///
/// # Example
///
/// ```rust
/// use grocy_api::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let get_request = HttpRequest::builder(HttpMethod::Get, "objects/shopping_list")
///     .query_param("query[]", "shopping_list_id=1")
///     .query_param("query[]", "done=0")
///     .build()
///     .unwrap();
/// assert_eq!(get_request.query.len(), 2);
///
/// let post_request = HttpRequest::builder(HttpMethod::Post, "stock/products/1/add")
///     .body(json!({"amount": 1.0}))
///     .build()
///     .unwrap();
/// assert!(post_request.body.is_some());
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path (relative to the API base) for this request.
    pub path: String,
    /// The JSON request body, if any.
    pub body: Option<serde_json::Value>,
    /// Query parameters to append to the URL, in order.
    pub query: Vec<(String, String)>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `path` is empty
    /// - `http_method` is `Post` or `Put` but `body` is `None`
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.path.trim_matches('/').is_empty() {
            return Err(InvalidHttpRequestError::EmptyPath);
        }

        if matches!(self.http_method, HttpMethod::Post | HttpMethod::Put) && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<serde_json::Value>,
    query: Vec<(String, String)>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            query: Vec::new(),
        }
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Appends a query parameter. Keys may repeat.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends one `query[]` parameter per filter expression.
    ///
    /// Filters are forwarded verbatim; they are not parsed or validated.
    #[must_use]
    pub fn query_filters(mut self, filters: Option<&[String]>) -> Self {
        for filter in filters.unwrap_or_default() {
            self.query.push(("query[]".to_string(), filter.clone()));
        }
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            query: self.query,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_request_without_body_is_valid() {
        let request = HttpRequest::builder(HttpMethod::Get, "stock").build();
        assert!(request.is_ok());
    }

    #[test]
    fn test_post_without_body_is_rejected() {
        let result = HttpRequest::builder(HttpMethod::Post, "stock/shoppinglist/clear").build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBody { .. })
        ));
    }

    #[test]
    fn test_empty_path_is_rejected() {
        let result = HttpRequest::builder(HttpMethod::Get, "/").build();
        assert!(matches!(result, Err(InvalidHttpRequestError::EmptyPath)));
    }

    #[test]
    fn test_query_filters_are_forwarded_verbatim_in_order() {
        let filters = vec!["product_group_id=1".to_string(), "name~Mi lk".to_string()];
        let request = HttpRequest::builder(HttpMethod::Get, "objects/products")
            .query_filters(Some(&filters))
            .build()
            .unwrap();

        assert_eq!(
            request.query,
            vec![
                ("query[]".to_string(), "product_group_id=1".to_string()),
                ("query[]".to_string(), "name~Mi lk".to_string()),
            ]
        );
    }

    #[test]
    fn test_no_filters_adds_no_query() {
        let request = HttpRequest::builder(HttpMethod::Get, "objects/products")
            .query_filters(None)
            .build()
            .unwrap();
        assert!(request.query.is_empty());
    }

    #[test]
    fn test_post_with_body() {
        let request = HttpRequest::builder(HttpMethod::Post, "stock/products/1/open")
            .body(json!({"amount": 1.0}))
            .build()
            .unwrap();
        assert_eq!(request.body, Some(json!({"amount": 1.0})));
    }

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "get");
        assert_eq!(HttpMethod::Delete.to_string(), "delete");
    }
}
