//! The canonical [`Product`] entity and its barcode sub-entity.
//!
//! A `Product` is built from exactly one [`ProductShape`]. Which fields get
//! populated depends on the variant:
//!
//! | shape            | populates                                                        |
//! |------------------|------------------------------------------------------------------|
//! | current-stock    | id, every quantity field, best-before date (+ nested identity)   |
//! | missing-product  | id, name, amount missing, partly-in-stock flag                   |
//! | product-details  | available amount, best-before date, barcodes, purchase unit (+ nested identity) |
//! | product-data     | id, group, name                                                  |
//! | stock-log        | id                                                               |
//!
//! "Nested identity" means the embedded product record is applied after the
//! outer shape, and only ever writes id, name and group.
//!
//! Details that only the per-product endpoint knows are added afterwards with
//! [`Product::hydrate`], which produces a new value through the pure
//! [`Product::merge`].

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use super::quantity_unit::QuantityUnit;
use crate::api::{
    CurrentStockResponse, GrocyApi, MissingProductResponse, ProductBarcodeData, ProductData,
    ProductDetailsResponse, ProductShape, Result, StockLogResponse,
};

/// A barcode attached to a product, with the amount one scan represents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductBarcode {
    barcode: String,
    amount: Option<f64>,
}

impl ProductBarcode {
    #[must_use]
    pub fn barcode(&self) -> &str {
        &self.barcode
    }

    /// `None` when the API sent no amount, or an amount of zero.
    #[must_use]
    pub const fn amount(&self) -> Option<f64> {
        self.amount
    }
}

impl From<&ProductBarcodeData> for ProductBarcode {
    fn from(data: &ProductBarcodeData) -> Self {
        Self {
            barcode: data.barcode.clone(),
            amount: data.amount.filter(|amount| *amount != 0.0),
        }
    }
}

/// A product, normalised from whichever payload described it.
///
/// `Product::default()` is the all-empty state: every optional field `None`
/// and no barcodes.
///
/// # Example
///
/// ```rust
/// use grocy_api::api::{CurrentStockResponse, ProductData};
/// use grocy_api::Product;
///
/// let product = Product::new(CurrentStockResponse {
///     product_id: 7,
///     amount: Some(3.0),
///     product: Some(ProductData {
///         id: 7,
///         name: "Milk".to_string(),
///         ..Default::default()
///     }),
///     ..Default::default()
/// });
///
/// assert_eq!(product.name(), Some("Milk"));
/// assert_eq!(product.available_amount(), Some(3.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Product {
    id: Option<u64>,
    name: Option<String>,
    product_group_id: Option<u64>,
    available_amount: Option<f64>,
    amount_aggregated: Option<f64>,
    amount_opened: Option<f64>,
    amount_opened_aggregated: Option<f64>,
    is_aggregated_amount: Option<bool>,
    best_before_date: Option<NaiveDate>,
    amount_missing: Option<f64>,
    is_partly_in_stock: Option<bool>,
    product_barcodes: Vec<ProductBarcode>,
    default_quantity_unit_purchase: Option<QuantityUnit>,
}

impl Product {
    /// Builds a product from any of the five recognised shapes.
    #[must_use]
    pub fn new(shape: impl Into<ProductShape>) -> Self {
        Self::from(shape.into())
    }

    /// Builds a product from an undecoded JSON payload.
    ///
    /// An object that matches none of the recognised shapes yields
    /// `Product::default()`.
    ///
    /// # Errors
    ///
    /// Returns [`GrocyError::Decode`](crate::GrocyError::Decode) if `value`
    /// is not an object, or looks like a known shape but fails to decode as one.
    pub fn from_json(value: &Value) -> Result<Self> {
        Ok(ProductShape::classify(value)?.map_or_else(Self::default, Self::from))
    }

    fn from_current_stock(response: CurrentStockResponse) -> Self {
        let product = Self {
            id: Some(response.product_id),
            available_amount: response.amount,
            amount_aggregated: response.amount_aggregated,
            amount_opened: response.amount_opened,
            amount_opened_aggregated: response.amount_opened_aggregated,
            is_aggregated_amount: response.is_aggregated_amount,
            best_before_date: response.best_before_date,
            ..Self::default()
        };
        match response.product {
            Some(data) => product.with_identity(data),
            None => product,
        }
    }

    fn from_missing_product(response: MissingProductResponse) -> Self {
        Self {
            id: Some(response.id),
            name: response.name,
            amount_missing: response.amount_missing,
            is_partly_in_stock: response.is_partly_in_stock,
            ..Self::default()
        }
    }

    fn from_product_details(response: ProductDetailsResponse) -> Self {
        let product = Self {
            available_amount: response.stock_amount,
            best_before_date: response.next_best_before_date,
            product_barcodes: response
                .product_barcodes
                .iter()
                .map(ProductBarcode::from)
                .collect(),
            default_quantity_unit_purchase: response
                .default_quantity_unit_purchase
                .map(QuantityUnit::from),
            ..Self::default()
        };
        match response.product {
            Some(data) => product.with_identity(data),
            None => product,
        }
    }

    fn from_stock_log(response: &StockLogResponse) -> Self {
        Self {
            id: Some(response.product_id),
            ..Self::default()
        }
    }

    /// Applies a bare product record. Touches id, name and group only.
    fn with_identity(self, data: ProductData) -> Self {
        Self {
            id: Some(data.id),
            name: Some(data.name),
            product_group_id: data.product_group_id,
            ..self
        }
    }

    /// Returns a copy of `self` enriched with a product-details payload.
    ///
    /// Overwrites name and group (from the nested product record, when the
    /// payload has one), barcodes, and available amount. Everything else is
    /// kept as it is.
    #[must_use]
    pub fn merge(&self, details: &ProductDetailsResponse) -> Self {
        let (name, product_group_id) = details.product.as_ref().map_or_else(
            || (self.name.clone(), self.product_group_id),
            |data| (Some(data.name.clone()), data.product_group_id),
        );

        Self {
            name,
            product_group_id,
            product_barcodes: details
                .product_barcodes
                .iter()
                .map(ProductBarcode::from)
                .collect(),
            available_amount: details.stock_amount,
            ..self.clone()
        }
    }

    /// Fetches the product's details and returns the merged product.
    ///
    /// Issues exactly one request, by id. A product without an id is
    /// returned unchanged without any request; so is one the API no longer
    /// knows about.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn hydrate<A: GrocyApi>(self, api: &A) -> Result<Self> {
        let Some(id) = self.id else {
            return Ok(self);
        };

        tracing::debug!(product_id = id, "Fetching product details");
        Ok(match api.get_product(id).await? {
            Some(details) => self.merge(&details),
            None => self,
        })
    }

    #[must_use]
    pub const fn id(&self) -> Option<u64> {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub const fn product_group_id(&self) -> Option<u64> {
        self.product_group_id
    }

    #[must_use]
    pub const fn available_amount(&self) -> Option<f64> {
        self.available_amount
    }

    #[must_use]
    pub const fn amount_aggregated(&self) -> Option<f64> {
        self.amount_aggregated
    }

    #[must_use]
    pub const fn amount_opened(&self) -> Option<f64> {
        self.amount_opened
    }

    #[must_use]
    pub const fn amount_opened_aggregated(&self) -> Option<f64> {
        self.amount_opened_aggregated
    }

    #[must_use]
    pub const fn is_aggregated_amount(&self) -> Option<bool> {
        self.is_aggregated_amount
    }

    #[must_use]
    pub const fn best_before_date(&self) -> Option<NaiveDate> {
        self.best_before_date
    }

    #[must_use]
    pub const fn amount_missing(&self) -> Option<f64> {
        self.amount_missing
    }

    #[must_use]
    pub const fn is_partly_in_stock(&self) -> Option<bool> {
        self.is_partly_in_stock
    }

    #[must_use]
    pub fn product_barcodes(&self) -> &[ProductBarcode] {
        &self.product_barcodes
    }

    /// The plain barcode strings, in order.
    #[must_use]
    pub fn barcodes(&self) -> Vec<&str> {
        self.product_barcodes
            .iter()
            .map(ProductBarcode::barcode)
            .collect()
    }

    #[must_use]
    pub const fn default_quantity_unit_purchase(&self) -> Option<&QuantityUnit> {
        self.default_quantity_unit_purchase.as_ref()
    }
}

impl From<ProductShape> for Product {
    fn from(shape: ProductShape) -> Self {
        match shape {
            ProductShape::CurrentStock(response) => Self::from_current_stock(response),
            ProductShape::MissingProduct(response) => Self::from_missing_product(response),
            ProductShape::ProductDetails(response) => Self::from_product_details(*response),
            ProductShape::ProductData(data) => Self::default().with_identity(data),
            ProductShape::StockLog(response) => Self::from_stock_log(&response),
        }
    }
}
