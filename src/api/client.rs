//! HTTP implementation of [`GrocyApi`].

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};

use super::errors::{GrocyError, Result};
use super::shapes::{
    decode, CreatedObjectResponse, CurrentStockResponse, DbChangedTimeResponse, GroupData, ProductDetailsResponse, ShoppingListItem,
    StockLogResponse, VolatileStockResponse,
};
use super::types::{
    AddProductParams, ConsumeProductParams, EntityType, InventoryProductParams,
    OpenProductParams, ShoppingListAddParams,
};
use super::GrocyApi;
use crate::clients::{HttpClient, HttpMethod, HttpRequest, HttpResponse, InvalidHttpRequestError};
use crate::config::GrocyConfig;

/// The API Client: one method per Grocy endpoint, returning decoded shapes.
///
/// # Example
///
/// ```rust,ignore
/// use grocy_api::api::{GrocyApi, GrocyApiClient};
///
/// let client = GrocyApiClient::new(&config)?;
/// let details = client.get_product(42).await?;
/// ```
#[derive(Debug)]
pub struct GrocyApiClient {
    http_client: HttpClient,
}

// Verify GrocyApiClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GrocyApiClient>();
};

impl GrocyApiClient {
    /// Creates a client for the configured Grocy instance.
    ///
    /// # Errors
    ///
    /// Returns [`GrocyError::Http`] if the HTTP client cannot be created.
    pub fn new(config: &GrocyConfig) -> Result<Self> {
        Ok(Self {
            http_client: HttpClient::new(config)?,
        })
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    async fn get(&self, path: &str, query_filters: Option<&[String]>) -> Result<HttpResponse> {
        let request = HttpRequest::builder(HttpMethod::Get, path)
            .query_filters(query_filters)
            .build()
            .map_err(invalid_request)?;
        Ok(self.http_client.request(request).await?)
    }

    async fn post(&self, path: &str, body: Value) -> Result<HttpResponse> {
        let request = HttpRequest::builder(HttpMethod::Post, path)
            .body(body)
            .build()
            .map_err(invalid_request)?;
        Ok(self.http_client.request(request).await?)
    }

    async fn put(&self, path: &str, body: Value) -> Result<HttpResponse> {
        let request = HttpRequest::builder(HttpMethod::Put, path)
            .body(body)
            .build()
            .map_err(invalid_request)?;
        Ok(self.http_client.request(request).await?)
    }

    async fn delete(&self, path: &str) -> Result<HttpResponse> {
        let request = HttpRequest::builder(HttpMethod::Delete, path)
            .build()
            .map_err(invalid_request)?;
        Ok(self.http_client.request(request).await?)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        shape: &'static str,
        path: &str,
        query_filters: Option<&[String]>,
    ) -> Result<Vec<T>> {
        let response = self.get(path, query_filters).await?;
        if response.is_empty_body() {
            return Ok(Vec::new());
        }
        decode(shape, response.body)
    }

    async fn get_optional<T: DeserializeOwned>(
        &self,
        shape: &'static str,
        path: &str,
    ) -> Result<Option<T>> {
        let response = self.get(path, None).await?;
        if response.is_empty_body() {
            return Ok(None);
        }
        decode(shape, response.body).map(Some)
    }

    /// Stock actions answer with the list of bookings they created.
    async fn post_stock_action(
        &self,
        path: &str,
        params: &impl Serialize,
    ) -> Result<Option<StockLogResponse>> {
        let response = self.post(path, encode(params)?).await?;
        if response.is_empty_body() {
            return Ok(None);
        }

        let entries: Vec<StockLogResponse> = match response.body {
            Value::Array(_) => decode("stock-log", response.body)?,
            single => vec![decode("stock-log", single)?],
        };
        Ok(entries.into_iter().next())
    }
}

fn invalid_request(error: InvalidHttpRequestError) -> GrocyError {
    GrocyError::Http(error.into())
}

fn encode(params: &impl Serialize) -> Result<Value> {
    serde_json::to_value(params).map_err(GrocyError::Encode)
}

fn object_path(entity: EntityType, object_id: u64) -> String {
    format!("objects/{entity}/{object_id}")
}

fn barcode_path(barcode: &str) -> String {
    format!("stock/products/by-barcode/{}", urlencoding::encode(barcode))
}

impl GrocyApi for GrocyApiClient {
    async fn get_stock(&self) -> Result<Vec<CurrentStockResponse>> {
        self.get_list("current-stock", "stock", None).await
    }

    async fn get_volatile_stock(&self) -> Result<VolatileStockResponse> {
        let response = self.get("stock/volatile", None).await?;
        if response.is_empty_body() {
            return Ok(VolatileStockResponse::default());
        }
        decode("volatile-stock", response.body)
    }

    async fn get_product(&self, product_id: u64) -> Result<Option<ProductDetailsResponse>> {
        self.get_optional("product-details", &format!("stock/products/{product_id}"))
            .await
    }

    async fn get_product_by_barcode(
        &self,
        barcode: &str,
    ) -> Result<Option<ProductDetailsResponse>> {
        self.get_optional("product-details", &barcode_path(barcode))
            .await
    }

    async fn get_shopping_list(
        &self,
        query_filters: Option<&[String]>,
    ) -> Result<Vec<ShoppingListItem>> {
        self.get_list("shopping-list", "objects/shopping_list", query_filters)
            .await
    }

    async fn get_product_groups(&self, query_filters: Option<&[String]>) -> Result<Vec<GroupData>> {
        self.get_list("product-group", "objects/product_groups", query_filters)
            .await
    }

    async fn get_generic_objects(
        &self,
        entity: EntityType,
        query_filters: Option<&[String]>,
    ) -> Result<Vec<Value>> {
        self.get_list(entity.as_str(), &format!("objects/{entity}"), query_filters)
            .await
    }

    async fn add_generic(&self, entity: EntityType, data: &Value) -> Result<Option<u64>> {
        let response = self.post(&format!("objects/{entity}"), data.clone()).await?;
        if response.is_empty_body() {
            return Ok(None);
        }
        let created: CreatedObjectResponse = decode("created-object", response.body)?;
        Ok(created.created_object_id)
    }

    async fn get_generic(&self, entity: EntityType, object_id: u64) -> Result<Option<Value>> {
        let response = self.get(&object_path(entity, object_id), None).await?;
        if response.is_empty_body() {
            return Ok(None);
        }
        Ok(Some(response.body))
    }

    async fn update_generic(
        &self,
        entity: EntityType,
        object_id: u64,
        data: &Value,
    ) -> Result<()> {
        self.put(&object_path(entity, object_id), data.clone())
            .await?;
        Ok(())
    }

    async fn delete_generic(&self, entity: EntityType, object_id: u64) -> Result<()> {
        self.delete(&object_path(entity, object_id)).await?;
        Ok(())
    }

    async fn get_userfields(
        &self,
        entity: EntityType,
        object_id: u64,
    ) -> Result<Map<String, Value>> {
        let response = self
            .get(&format!("userfields/{entity}/{object_id}"), None)
            .await?;
        if response.is_empty_body() {
            return Ok(Map::new());
        }
        decode("userfields", response.body)
    }

    async fn set_userfields(
        &self,
        entity: EntityType,
        object_id: u64,
        key: &str,
        value: &Value,
    ) -> Result<()> {
        let mut body = Map::new();
        body.insert(key.to_string(), value.clone());
        self.put(
            &format!("userfields/{entity}/{object_id}"),
            Value::Object(body),
        )
        .await?;
        Ok(())
    }

    async fn get_last_db_changed(&self) -> Result<Option<NaiveDateTime>> {
        let response = self.get("system/db-changed-time", None).await?;
        if response.is_empty_body() {
            return Ok(None);
        }
        let changed: DbChangedTimeResponse = decode("db-changed-time", response.body)?;
        Ok(changed.changed_time)
    }

    async fn add_product(
        &self,
        product_id: u64,
        params: &AddProductParams,
    ) -> Result<Option<StockLogResponse>> {
        self.post_stock_action(&format!("stock/products/{product_id}/add"), params)
            .await
    }

    async fn consume_product(
        &self,
        product_id: u64,
        params: &ConsumeProductParams,
    ) -> Result<Option<StockLogResponse>> {
        self.post_stock_action(&format!("stock/products/{product_id}/consume"), params)
            .await
    }

    async fn open_product(
        &self,
        product_id: u64,
        params: &OpenProductParams,
    ) -> Result<Option<StockLogResponse>> {
        self.post_stock_action(&format!("stock/products/{product_id}/open"), params)
            .await
    }

    async fn inventory_product(
        &self,
        product_id: u64,
        params: &InventoryProductParams,
    ) -> Result<Option<StockLogResponse>> {
        self.post_stock_action(&format!("stock/products/{product_id}/inventory"), params)
            .await
    }

    async fn add_product_by_barcode(
        &self,
        barcode: &str,
        params: &AddProductParams,
    ) -> Result<Option<StockLogResponse>> {
        self.post_stock_action(&format!("{}/add", barcode_path(barcode)), params)
            .await
    }

    async fn consume_product_by_barcode(
        &self,
        barcode: &str,
        params: &ConsumeProductParams,
    ) -> Result<Option<StockLogResponse>> {
        self.post_stock_action(&format!("{}/consume", barcode_path(barcode)), params)
            .await
    }

    async fn inventory_product_by_barcode(
        &self,
        barcode: &str,
        params: &InventoryProductParams,
    ) -> Result<Option<StockLogResponse>> {
        self.post_stock_action(&format!("{}/inventory", barcode_path(barcode)), params)
            .await
    }

    async fn add_product_to_shopping_list(&self, params: &ShoppingListAddParams) -> Result<()> {
        self.post("stock/shoppinglist/add-product", encode(params)?)
            .await?;
        Ok(())
    }

    async fn add_missing_products_to_shopping_list(&self, shopping_list_id: u64) -> Result<()> {
        self.post(
            "stock/shoppinglist/add-missing-products",
            json!({ "list_id": shopping_list_id }),
        )
        .await?;
        Ok(())
    }

    async fn clear_shopping_list(&self, shopping_list_id: u64) -> Result<()> {
        self.post(
            "stock/shoppinglist/clear",
            json!({ "list_id": shopping_list_id }),
        )
        .await?;
        Ok(())
    }

    async fn remove_product_in_shopping_list(
        &self,
        product_id: u64,
        shopping_list_id: u64,
        amount: f64,
    ) -> Result<()> {
        self.post(
            "stock/shoppinglist/remove-product",
            json!({
                "product_id": product_id,
                "list_id": shopping_list_id,
                "product_amount": amount,
            }),
        )
        .await?;
        Ok(())
    }
}
