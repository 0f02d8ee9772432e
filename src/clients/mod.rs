//! HTTP transport for Grocy API communication.
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: the async HTTP client, one request per call
//! - [`HttpRequest`]: a request to be sent to the API
//! - [`HttpResponse`]: a parsed response from the API
//! - [`HttpMethod`]: supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`HttpError`]: everything that can go wrong on the wire
//!
//! Higher layers never talk to this module directly; they go through
//! [`GrocyApiClient`](crate::api::GrocyApiClient).

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, API_KEY_HEADER, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
