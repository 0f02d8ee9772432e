//! Error type for Grocy API operations.
//!
//! - [`GrocyError::Http`]: the API or the network failed; carries the
//!   transport error unchanged
//! - [`GrocyError::Decode`]: a payload did not match the Response Shape
//!   expected for the endpoint
//! - [`GrocyError::Encode`]: request parameters could not be turned into a
//!   JSON body
//!
//! "Not found" is never an error: lookups return `Ok(None)`.
//!
//! # Example
//!
//! ```rust,ignore
//! use grocy_api::{ConsumeProductParams, GrocyError};
//!
//! match grocy.consume_product(42, &ConsumeProductParams::new(1.0)).await {
//!     Err(GrocyError::Http(e)) if e.status_code() == Some(400) => println!("rejected: {e}"),
//!     Err(e) => println!("failed: {e}"),
//!     Ok(_) => {}
//! }
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for Grocy API operations.
#[derive(Debug, Error)]
pub enum GrocyError {
    /// An HTTP-level error, propagated as returned by the transport.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A payload could not be decoded into the expected shape.
    #[error("Failed to decode {shape} payload: {source}")]
    Decode {
        /// Name of the shape that was expected.
        shape: &'static str,
        /// The underlying decoding error.
        #[source]
        source: serde_json::Error,
    },

    /// Request parameters could not be serialised into a JSON body.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl GrocyError {
    /// Returns the HTTP status code when the API rejected the request.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status_code(),
            Self::Decode { .. } | Self::Encode(_) => None,
        }
    }

    pub(crate) fn invalid_shape(shape: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::Decode {
            shape,
            source: <serde_json::Error as serde::de::Error>::custom(reason),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = GrocyError> = std::result::Result<T, E>;
