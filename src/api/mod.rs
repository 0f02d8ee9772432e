//! The API Client collaborator: endpoints in, decoded Response Shapes out.
//!
//! # Overview
//!
//! - [`GrocyApi`]: the contract the mapping layer consumes. Entity
//!   hydration and the [`Grocy`](crate::Grocy) facade are written against it.
//! - [`GrocyApiClient`]: the HTTP implementation.
//! - Response Shapes: one struct per JSON payload variant, plus the
//!   [`ProductShape`] sum type.
//! - Request parameter types for the stock and shopping-list actions.
//!
//! Every method issues exactly one request. A missing resource is `Ok(None)`
//! (or an empty list); transport and API failures are returned unchanged as
//! [`GrocyError::Http`].

mod client;
mod de;
mod errors;
mod shapes;
mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use client::GrocyApiClient;
pub use errors::{GrocyError, Result};
pub use shapes::{
    CreatedObjectResponse, CurrentStockResponse, DbChangedTimeResponse, GroupData,
    MissingProductResponse, ProductBarcodeData, ProductData, ProductDetailsResponse, ProductShape,
    QuantityUnitData, ShoppingListItem, StockLogResponse, VolatileStockResponse,
};
pub(crate) use shapes::decode;
pub use types::{
    AddProductParams, ConsumeProductParams, EntityType, InventoryProductParams,
    OpenProductParams, ShoppingListAddParams, TransactionType,
};

use chrono::NaiveDateTime;
use serde_json::{Map, Value};

/// Request/response contract of the Grocy API.
///
/// Query filters are opaque `field=value` expressions forwarded verbatim.
#[allow(async_fn_in_trait)]
pub trait GrocyApi {
    /// `GET stock`
    async fn get_stock(&self) -> Result<Vec<CurrentStockResponse>>;

    /// `GET stock/volatile`
    async fn get_volatile_stock(&self) -> Result<VolatileStockResponse>;

    /// `GET stock/products/{id}`; `None` when the API returns nothing.
    async fn get_product(&self, product_id: u64) -> Result<Option<ProductDetailsResponse>>;

    /// `GET stock/products/by-barcode/{barcode}`; `None` when the API returns nothing.
    async fn get_product_by_barcode(&self, barcode: &str)
        -> Result<Option<ProductDetailsResponse>>;

    /// `GET objects/shopping_list`
    async fn get_shopping_list(
        &self,
        query_filters: Option<&[String]>,
    ) -> Result<Vec<ShoppingListItem>>;

    /// `GET objects/product_groups`
    async fn get_product_groups(&self, query_filters: Option<&[String]>)
        -> Result<Vec<GroupData>>;

    /// `GET objects/{entity}`, undecoded.
    async fn get_generic_objects(
        &self,
        entity: EntityType,
        query_filters: Option<&[String]>,
    ) -> Result<Vec<Value>>;

    /// `POST objects/{entity}`; the id Grocy assigned, if it reported one.
    async fn add_generic(&self, entity: EntityType, data: &Value) -> Result<Option<u64>>;

    /// `GET objects/{entity}/{id}`, undecoded; `None` when the API returns nothing.
    async fn get_generic(&self, entity: EntityType, object_id: u64) -> Result<Option<Value>>;

    /// `PUT objects/{entity}/{id}`
    async fn update_generic(&self, entity: EntityType, object_id: u64, data: &Value)
        -> Result<()>;

    /// `DELETE objects/{entity}/{id}`
    async fn delete_generic(&self, entity: EntityType, object_id: u64) -> Result<()>;

    /// `GET userfields/{entity}/{id}`
    async fn get_userfields(
        &self,
        entity: EntityType,
        object_id: u64,
    ) -> Result<Map<String, Value>>;

    /// `PUT userfields/{entity}/{id}` with a single field.
    async fn set_userfields(
        &self,
        entity: EntityType,
        object_id: u64,
        key: &str,
        value: &Value,
    ) -> Result<()>;

    /// `GET system/db-changed-time`
    async fn get_last_db_changed(&self) -> Result<Option<NaiveDateTime>>;

    /// `POST stock/products/{id}/add`
    async fn add_product(
        &self,
        product_id: u64,
        params: &AddProductParams,
    ) -> Result<Option<StockLogResponse>>;

    /// `POST stock/products/{id}/consume`
    async fn consume_product(
        &self,
        product_id: u64,
        params: &ConsumeProductParams,
    ) -> Result<Option<StockLogResponse>>;

    /// `POST stock/products/{id}/open`
    async fn open_product(
        &self,
        product_id: u64,
        params: &OpenProductParams,
    ) -> Result<Option<StockLogResponse>>;

    /// `POST stock/products/{id}/inventory`
    async fn inventory_product(
        &self,
        product_id: u64,
        params: &InventoryProductParams,
    ) -> Result<Option<StockLogResponse>>;

    /// `POST stock/products/by-barcode/{barcode}/add`
    async fn add_product_by_barcode(
        &self,
        barcode: &str,
        params: &AddProductParams,
    ) -> Result<Option<StockLogResponse>>;

    /// `POST stock/products/by-barcode/{barcode}/consume`
    async fn consume_product_by_barcode(
        &self,
        barcode: &str,
        params: &ConsumeProductParams,
    ) -> Result<Option<StockLogResponse>>;

    /// `POST stock/products/by-barcode/{barcode}/inventory`
    async fn inventory_product_by_barcode(
        &self,
        barcode: &str,
        params: &InventoryProductParams,
    ) -> Result<Option<StockLogResponse>>;

    /// `POST stock/shoppinglist/add-product`
    async fn add_product_to_shopping_list(&self, params: &ShoppingListAddParams) -> Result<()>;

    /// `POST stock/shoppinglist/add-missing-products`
    async fn add_missing_products_to_shopping_list(&self, shopping_list_id: u64) -> Result<()>;

    /// `POST stock/shoppinglist/clear`
    async fn clear_shopping_list(&self, shopping_list_id: u64) -> Result<()>;

    /// `POST stock/shoppinglist/remove-product`
    async fn remove_product_in_shopping_list(
        &self,
        product_id: u64,
        shopping_list_id: u64,
        amount: f64,
    ) -> Result<()>;
}
