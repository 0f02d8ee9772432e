//! # Grocy API Rust Client
//!
//! A typed client for the [Grocy](https://grocy.info) grocery and household
//! management REST API.
//!
//! ## Overview
//!
//! This library provides:
//! - Type-safe configuration via [`GrocyConfig`] and [`GrocyConfigBuilder`]
//! - Validated newtypes for the API key and instance URL
//! - An async HTTP client that sends the API key header on every request
//! - Decoded response shapes and the [`GrocyApi`](api::GrocyApi) contract
//! - Domain entities ([`Product`], [`ShoppingListProduct`], [`Group`], ...)
//!   normalised from whichever payload described them
//! - On-demand detail hydration of entities
//! - The [`Grocy`] facade composing all of the above
//!
//! ## Quick Start
//!
//! ```rust
//! use grocy_api::{ApiKey, BaseUrl, GrocyConfig};
//!
//! let config = GrocyConfig::builder()
//!     .base_url(BaseUrl::new("https://grocy.local").unwrap())
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .port(443)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_base(), "https://grocy.local:443/api");
//! ```
//!
//! ## Reading Stock
//!
//! ```rust,ignore
//! use grocy_api::Grocy;
//!
//! let grocy = Grocy::new(&config)?;
//!
//! // One request; products carry stock amounts but no barcodes yet
//! let stock = grocy.stock(false).await?;
//!
//! // One extra request per product to fetch its details
//! let detailed = grocy.stock(true).await?;
//! for product in &detailed {
//!     println!("{:?}: {:?}", product.name(), product.barcodes());
//! }
//!
//! // Not found is `None`, not an error
//! assert!(grocy.product(424_242).await?.is_none());
//! ```
//!
//! ## Booking Stock
//!
//! ```rust,ignore
//! use grocy_api::{AddProductParams, ConsumeProductParams};
//!
//! grocy.add_product(42, &AddProductParams::new(2.0).price(1.29)).await?;
//! grocy.consume_product(42, &ConsumeProductParams::new(1.0)).await?;
//!
//! let product = grocy
//!     .consume_product_by_barcode("4006381333931", &ConsumeProductParams::new(1.0), true)
//!     .await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Immutable entities**: Hydration returns a new value instead of mutating
//! - **Sequential I/O**: Each call waits for its response before the next is sent
//! - **Errors propagate unchanged**: No retries, no swallowed failures

pub mod api;
pub mod clients;
pub mod config;
pub mod error;
mod grocy;
pub mod models;

// Re-export public types at crate root for convenience
pub use config::{ApiKey, BaseUrl, GrocyConfig, GrocyConfigBuilder};
pub use error::ConfigError;
pub use grocy::Grocy;

pub use api::{
    AddProductParams, ConsumeProductParams, EntityType, GrocyError, InventoryProductParams,
    OpenProductParams, Result, ShoppingListAddParams, TransactionType,
};
pub use models::{Group, Product, ProductBarcode, QuantityUnit, ShoppingListProduct};
