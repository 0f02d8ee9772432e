//! Decoded Response Shapes.
//!
//! Each struct mirrors one JSON payload variant returned by the Grocy API.
//! Fields decode leniently (see the `de` module); only the identifiers a
//! shape cannot exist without are required.
//!
//! [`ProductShape`] is the closed set of payloads a
//! [`Product`](crate::models::Product) can be built from.

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::de;
use super::errors::GrocyError;

/// Bare product record, as found in `objects/products` and nested in stock
/// and details payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductData {
    #[serde(deserialize_with = "de::id")]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::option_u64")]
    pub location_id: Option<u64>,
    #[serde(default, deserialize_with = "de::option_u64")]
    pub product_group_id: Option<u64>,
    #[serde(default, deserialize_with = "de::option_u64")]
    pub qu_id_stock: Option<u64>,
    #[serde(default, deserialize_with = "de::option_u64")]
    pub qu_id_purchase: Option<u64>,
    #[serde(default, deserialize_with = "de::option_f64")]
    pub min_stock_amount: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductBarcodeData {
    pub barcode: String,
    #[serde(default, deserialize_with = "de::option_f64")]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityUnitData {
    #[serde(deserialize_with = "de::id")]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub name_plural: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One entry of `GET stock`, also used for due, overdue and expired lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentStockResponse {
    #[serde(deserialize_with = "de::id")]
    pub product_id: u64,
    #[serde(default, deserialize_with = "de::option_f64")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "de::option_f64")]
    pub amount_aggregated: Option<f64>,
    #[serde(default, deserialize_with = "de::option_f64")]
    pub amount_opened: Option<f64>,
    #[serde(default, deserialize_with = "de::option_f64")]
    pub amount_opened_aggregated: Option<f64>,
    #[serde(default, deserialize_with = "de::option_bool")]
    pub is_aggregated_amount: Option<bool>,
    #[serde(default, deserialize_with = "de::option_date")]
    pub best_before_date: Option<NaiveDate>,
    #[serde(default)]
    pub product: Option<ProductData>,
}

/// One entry of the `missing_products` list of `GET stock/volatile`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissingProductResponse {
    #[serde(deserialize_with = "de::id")]
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::option_f64")]
    pub amount_missing: Option<f64>,
    #[serde(default, deserialize_with = "de::option_bool")]
    pub is_partly_in_stock: Option<bool>,
}

/// Payload of `GET stock/products/{id}` and its by-barcode variant.
///
/// Grocy renamed several fields across releases. Either spelling is
/// accepted, and a payload carrying both decodes to the first non-null one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawProductDetails")]
pub struct ProductDetailsResponse {
    pub product: Option<ProductData>,
    pub stock_amount: Option<f64>,
    pub stock_amount_opened: Option<f64>,
    pub next_best_before_date: Option<NaiveDate>,
    pub last_purchased: Option<NaiveDate>,
    pub last_used: Option<NaiveDateTime>,
    pub last_price: Option<f64>,
    pub product_barcodes: Vec<ProductBarcodeData>,
    pub default_quantity_unit_purchase: Option<QuantityUnitData>,
    pub quantity_unit_stock: Option<QuantityUnitData>,
}

/// Wire form of [`ProductDetailsResponse`], old and new field names side by side.
#[derive(Deserialize)]
struct RawProductDetails {
    #[serde(default)]
    product: Option<ProductData>,
    #[serde(default, deserialize_with = "de::option_f64")]
    stock_amount: Option<f64>,
    #[serde(default, deserialize_with = "de::option_f64")]
    stock_amount_opened: Option<f64>,
    #[serde(default, deserialize_with = "de::option_date")]
    next_best_before_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::option_date")]
    next_due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::option_date")]
    last_purchased: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::option_date_time")]
    last_used: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "de::option_f64")]
    last_price: Option<f64>,
    #[serde(default, deserialize_with = "de::vec_or_null")]
    product_barcodes: Vec<ProductBarcodeData>,
    #[serde(default, deserialize_with = "de::vec_or_null")]
    barcodes: Vec<ProductBarcodeData>,
    #[serde(default)]
    default_quantity_unit_purchase: Option<QuantityUnitData>,
    #[serde(default)]
    quantity_unit_purchase: Option<QuantityUnitData>,
    #[serde(default)]
    quantity_unit_stock: Option<QuantityUnitData>,
}

impl From<RawProductDetails> for ProductDetailsResponse {
    fn from(raw: RawProductDetails) -> Self {
        let product_barcodes = if raw.product_barcodes.is_empty() {
            raw.barcodes
        } else {
            raw.product_barcodes
        };

        Self {
            product: raw.product,
            stock_amount: raw.stock_amount,
            stock_amount_opened: raw.stock_amount_opened,
            next_best_before_date: raw.next_best_before_date.or(raw.next_due_date),
            last_purchased: raw.last_purchased,
            last_used: raw.last_used,
            last_price: raw.last_price,
            product_barcodes,
            default_quantity_unit_purchase: raw
                .default_quantity_unit_purchase
                .or(raw.quantity_unit_purchase),
            quantity_unit_stock: raw.quantity_unit_stock,
        }
    }
}

/// A stock booking, as returned by the add / consume / open / inventory
/// endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockLogResponse {
    #[serde(default, deserialize_with = "de::option_u64")]
    pub id: Option<u64>,
    #[serde(deserialize_with = "de::id")]
    pub product_id: u64,
    #[serde(default, deserialize_with = "de::option_f64")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "de::option_date")]
    pub best_before_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::option_date")]
    pub purchased_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::option_date")]
    pub used_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::option_bool")]
    pub spoiled: Option<bool>,
    #[serde(default)]
    pub stock_id: Option<String>,
    #[serde(default)]
    pub transaction_type: Option<String>,
    #[serde(default, deserialize_with = "de::option_f64")]
    pub price: Option<f64>,
}

/// Payload of `GET stock/volatile`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolatileStockResponse {
    #[serde(default, deserialize_with = "de::vec_or_null")]
    pub due_products: Vec<CurrentStockResponse>,
    #[serde(default, deserialize_with = "de::vec_or_null")]
    pub overdue_products: Vec<CurrentStockResponse>,
    #[serde(default, deserialize_with = "de::vec_or_null")]
    pub expired_products: Vec<CurrentStockResponse>,
    #[serde(default, deserialize_with = "de::vec_or_null")]
    pub missing_products: Vec<MissingProductResponse>,
}

/// One row of `objects/shopping_list`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    #[serde(deserialize_with = "de::id")]
    pub id: u64,
    #[serde(default, deserialize_with = "de::option_u64")]
    pub product_id: Option<u64>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "de::f64_or_zero")]
    pub amount: f64,
    #[serde(default, deserialize_with = "de::option_u64")]
    pub shopping_list_id: Option<u64>,
    #[serde(default, deserialize_with = "de::option_bool")]
    pub done: Option<bool>,
}

/// One row of `objects/product_groups`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupData {
    #[serde(deserialize_with = "de::id")]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Answer of `POST objects/{entity}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedObjectResponse {
    #[serde(default, deserialize_with = "de::option_u64")]
    pub created_object_id: Option<u64>,
}

/// Answer of `GET system/db-changed-time`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbChangedTimeResponse {
    #[serde(default, deserialize_with = "de::option_date_time")]
    pub changed_time: Option<NaiveDateTime>,
}

/// The payloads a [`Product`](crate::models::Product) can be built from.
///
/// # Example
///
/// ```rust
/// use grocy_api::api::ProductShape;
/// use serde_json::json;
///
/// let shape = ProductShape::classify(&json!({"id": 3, "amount_missing": 2}))
///     .unwrap()
///     .unwrap();
/// assert_eq!(shape.kind(), "missing-product");
///
/// assert!(ProductShape::classify(&json!({"foo": 1})).unwrap().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ProductShape {
    CurrentStock(CurrentStockResponse),
    MissingProduct(MissingProductResponse),
    ProductDetails(Box<ProductDetailsResponse>),
    ProductData(ProductData),
    StockLog(StockLogResponse),
}

impl ProductShape {
    /// Returns a short name of the variant, used in logs and errors.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CurrentStock(_) => "current-stock",
            Self::MissingProduct(_) => "missing-product",
            Self::ProductDetails(_) => "product-details",
            Self::ProductData(_) => "product-data",
            Self::StockLog(_) => "stock-log",
        }
    }

    /// Recognises a raw JSON object by its distinguishing keys and decodes it.
    ///
    /// Returns `Ok(None)` for an object that matches none of the five shapes.
    ///
    /// # Errors
    ///
    /// Returns [`GrocyError::Decode`] if `value` is not an object, or if it
    /// carries a shape's keys but fails that shape's decoding.
    pub fn classify(value: &Value) -> Result<Option<Self>, GrocyError> {
        let Some(object) = value.as_object() else {
            return Err(GrocyError::invalid_shape(
                "product",
                format!("expected a JSON object, found {value}"),
            ));
        };
        let has = |key: &str| object.contains_key(key);

        let shape = if has("amount_missing") {
            Self::MissingProduct(decode("missing-product", value.clone())?)
        } else if has("stock_amount") || has("product_barcodes") {
            Self::ProductDetails(Box::new(decode("product-details", value.clone())?))
        } else if has("transaction_type") && has("product_id") {
            Self::StockLog(decode("stock-log", value.clone())?)
        } else if has("product_id") && has("amount") {
            Self::CurrentStock(decode("current-stock", value.clone())?)
        } else if has("id") && has("name") {
            Self::ProductData(decode("product-data", value.clone())?)
        } else {
            return Ok(None);
        };
        Ok(Some(shape))
    }
}

impl From<CurrentStockResponse> for ProductShape {
    fn from(response: CurrentStockResponse) -> Self {
        Self::CurrentStock(response)
    }
}

impl From<MissingProductResponse> for ProductShape {
    fn from(response: MissingProductResponse) -> Self {
        Self::MissingProduct(response)
    }
}

impl From<ProductDetailsResponse> for ProductShape {
    fn from(response: ProductDetailsResponse) -> Self {
        Self::ProductDetails(Box::new(response))
    }
}

impl From<ProductData> for ProductShape {
    fn from(data: ProductData) -> Self {
        Self::ProductData(data)
    }
}

impl From<StockLogResponse> for ProductShape {
    fn from(response: StockLogResponse) -> Self {
        Self::StockLog(response)
    }
}

/// Decodes `value` into shape `T`, naming the shape on failure.
pub(crate) fn decode<T: DeserializeOwned>(shape: &'static str, value: Value) -> Result<T, GrocyError> {
    serde_json::from_value(value).map_err(|source| GrocyError::Decode { shape, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_current_stock_decodes_nested_product() {
        let response: CurrentStockResponse = serde_json::from_value(json!({
            "product_id": "7",
            "amount": "3",
            "amount_aggregated": "3",
            "amount_opened": "0",
            "amount_opened_aggregated": "0",
            "is_aggregated_amount": "0",
            "best_before_date": "2024-06-01",
            "product": {"id": "7", "name": "Milk", "product_group_id": "2"}
        }))
        .unwrap();

        assert_eq!(response.product_id, 7);
        assert_eq!(response.amount, Some(3.0));
        assert_eq!(response.is_aggregated_amount, Some(false));
        let product = response.product.unwrap();
        assert_eq!(product.name, "Milk");
        assert_eq!(product.product_group_id, Some(2));
    }

    #[test]
    fn test_product_details_accepts_newer_field_names() {
        let response: ProductDetailsResponse = serde_json::from_value(json!({
            "product": {"id": 1, "name": "Rice"},
            "stock_amount": 4,
            "next_due_date": "2025-01-31",
            "barcodes": [{"barcode": "400123", "amount": "1"}],
            "quantity_unit_purchase": {"id": 2, "name": "Pack", "name_plural": "Packs"}
        }))
        .unwrap();

        assert_eq!(
            response.next_best_before_date,
            NaiveDate::from_ymd_opt(2025, 1, 31)
        );
        assert_eq!(response.product_barcodes.len(), 1);
        assert_eq!(
            response.default_quantity_unit_purchase.unwrap().name,
            "Pack"
        );
    }

    #[test]
    fn test_product_details_accepts_both_field_names_at_once() {
        let response: ProductDetailsResponse = serde_json::from_value(json!({
            "product": {"id": 1, "name": "Rice"},
            "stock_amount": 4,
            "next_best_before_date": null,
            "next_due_date": "2025-01-31",
            "product_barcodes": [{"barcode": "400123"}],
            "barcodes": [{"barcode": "400999"}],
            "default_quantity_unit_purchase": {"id": 2, "name": "Pack"},
            "quantity_unit_purchase": {"id": 3, "name": "Box"}
        }))
        .unwrap();

        assert_eq!(
            response.next_best_before_date,
            NaiveDate::from_ymd_opt(2025, 1, 31)
        );
        assert_eq!(response.product_barcodes[0].barcode, "400123");
        assert_eq!(response.product_barcodes.len(), 1);
        assert_eq!(response.default_quantity_unit_purchase.unwrap().id, 2);
    }

    #[test]
    fn test_classify_details_with_both_field_names() {
        let shape = ProductShape::classify(&json!({
            "stock_amount": "1",
            "next_best_before_date": "2025-01-31",
            "next_due_date": "2025-01-31"
        }))
        .unwrap()
        .unwrap();
        assert_eq!(shape.kind(), "product-details");
    }

    #[test]
    fn test_volatile_stock_tolerates_missing_and_null_lists() {
        let response: VolatileStockResponse =
            serde_json::from_value(json!({"due_products": null})).unwrap();
        assert!(response.due_products.is_empty());
        assert!(response.missing_products.is_empty());
    }

    #[test]
    fn test_shopping_list_item_without_product() {
        let item: ShoppingListItem =
            serde_json::from_value(json!({"id": 5, "note": "Birthday candles", "amount": "2"}))
                .unwrap();
        assert_eq!(item.product_id, None);
        assert_eq!(item.amount, 2.0);
    }

    #[test]
    fn test_created_object_and_changed_time() {
        let created: CreatedObjectResponse =
            serde_json::from_value(json!({"created_object_id": "12"})).unwrap();
        assert_eq!(created.created_object_id, Some(12));

        let changed: DbChangedTimeResponse =
            serde_json::from_value(json!({"changed_time": "2024-05-01 18:30:00"})).unwrap();
        assert_eq!(
            changed.changed_time.unwrap().to_string(),
            "2024-05-01 18:30:00"
        );
    }

    #[test]
    fn test_classify_recognises_each_shape() {
        let cases = [
            (json!({"id": 1, "name": "Milk", "amount_missing": 1}), "missing-product"),
            (json!({"stock_amount": 1}), "product-details"),
            (json!({"product_barcodes": []}), "product-details"),
            (json!({"product_id": 1, "transaction_type": "purchase", "amount": 1}), "stock-log"),
            (json!({"product_id": 1, "amount": 1}), "current-stock"),
            (json!({"id": 1, "name": "Milk"}), "product-data"),
        ];

        for (value, kind) in cases {
            let shape = ProductShape::classify(&value).unwrap().unwrap();
            assert_eq!(shape.kind(), kind, "classifying {value}");
        }
    }

    #[test]
    fn test_classify_unrecognised_object_is_none() {
        assert!(ProductShape::classify(&json!({"battery_id": 3}))
            .unwrap()
            .is_none());
        assert!(ProductShape::classify(&json!({})).unwrap().is_none());
    }

    #[test]
    fn test_classify_non_object_is_decode_error() {
        let result = ProductShape::classify(&json!([1, 2, 3]));
        assert!(matches!(result, Err(GrocyError::Decode { .. })));
    }

    #[test]
    fn test_classify_malformed_shape_is_decode_error() {
        let result = ProductShape::classify(&json!({"product_id": "abc", "amount": 1}));
        assert!(matches!(
            result,
            Err(GrocyError::Decode {
                shape: "current-stock",
                ..
            })
        ));
    }
}
