//! In-memory [`GrocyApi`] used by unit tests.

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde_json::{Map, Value};

use super::{
    AddProductParams, ConsumeProductParams, CurrentStockResponse, EntityType, GrocyApi, GroupData,
    InventoryProductParams, OpenProductParams, ProductDetailsResponse, Result,
    ShoppingListAddParams, ShoppingListItem, StockLogResponse, VolatileStockResponse,
};
use crate::clients::{HttpError, HttpResponseError};

/// Canned responses plus a log of every call made.
#[derive(Debug, Default)]
pub struct FakeApi {
    pub stock: Vec<CurrentStockResponse>,
    pub volatile: VolatileStockResponse,
    pub products: HashMap<u64, ProductDetailsResponse>,
    pub barcodes: HashMap<String, ProductDetailsResponse>,
    pub shopping_list: Vec<ShoppingListItem>,
    pub groups: Vec<GroupData>,
    pub generic: Vec<Value>,
    pub stock_log: Option<StockLogResponse>,
    pub created_object_id: Option<u64>,
    pub generic_object: Option<Value>,
    pub userfields: Map<String, Value>,
    pub last_db_changed: Option<NaiveDateTime>,
    /// When set, `get_product` fails with this status code.
    pub product_error: Option<u16>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeApi {
    pub fn with_product(mut self, id: u64, details: ProductDetailsResponse) -> Self {
        self.products.insert(id, details);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }
}

impl GrocyApi for FakeApi {
    async fn get_stock(&self) -> Result<Vec<CurrentStockResponse>> {
        self.record("get_stock");
        Ok(self.stock.clone())
    }

    async fn get_volatile_stock(&self) -> Result<VolatileStockResponse> {
        self.record("get_volatile_stock");
        Ok(self.volatile.clone())
    }

    async fn get_product(&self, product_id: u64) -> Result<Option<ProductDetailsResponse>> {
        self.record(format!("get_product:{product_id}"));
        if let Some(code) = self.product_error {
            return Err(HttpError::Response(HttpResponseError {
                code,
                message: "Product does not exist".to_string(),
            })
            .into());
        }
        Ok(self.products.get(&product_id).cloned())
    }

    async fn get_product_by_barcode(
        &self,
        barcode: &str,
    ) -> Result<Option<ProductDetailsResponse>> {
        self.record(format!("get_product_by_barcode:{barcode}"));
        Ok(self.barcodes.get(barcode).cloned())
    }

    async fn get_shopping_list(
        &self,
        query_filters: Option<&[String]>,
    ) -> Result<Vec<ShoppingListItem>> {
        self.record(format!(
            "get_shopping_list:{}",
            query_filters.unwrap_or_default().join("&")
        ));
        Ok(self.shopping_list.clone())
    }

    async fn get_product_groups(&self, query_filters: Option<&[String]>) -> Result<Vec<GroupData>> {
        self.record(format!(
            "get_product_groups:{}",
            query_filters.unwrap_or_default().join("&")
        ));
        Ok(self.groups.clone())
    }

    async fn get_generic_objects(
        &self,
        entity: EntityType,
        _query_filters: Option<&[String]>,
    ) -> Result<Vec<Value>> {
        self.record(format!("get_generic_objects:{entity}"));
        Ok(self.generic.clone())
    }

    async fn add_generic(&self, entity: EntityType, _data: &Value) -> Result<Option<u64>> {
        self.record(format!("add_generic:{entity}"));
        Ok(self.created_object_id)
    }

    async fn get_generic(&self, entity: EntityType, object_id: u64) -> Result<Option<Value>> {
        self.record(format!("get_generic:{entity}:{object_id}"));
        Ok(self.generic_object.clone())
    }

    async fn update_generic(
        &self,
        entity: EntityType,
        object_id: u64,
        _data: &Value,
    ) -> Result<()> {
        self.record(format!("update_generic:{entity}:{object_id}"));
        Ok(())
    }

    async fn delete_generic(&self, entity: EntityType, object_id: u64) -> Result<()> {
        self.record(format!("delete_generic:{entity}:{object_id}"));
        Ok(())
    }

    async fn get_userfields(
        &self,
        entity: EntityType,
        object_id: u64,
    ) -> Result<Map<String, Value>> {
        self.record(format!("get_userfields:{entity}:{object_id}"));
        Ok(self.userfields.clone())
    }

    async fn set_userfields(
        &self,
        entity: EntityType,
        object_id: u64,
        key: &str,
        _value: &Value,
    ) -> Result<()> {
        self.record(format!("set_userfields:{entity}:{object_id}:{key}"));
        Ok(())
    }

    async fn get_last_db_changed(&self) -> Result<Option<NaiveDateTime>> {
        self.record("get_last_db_changed");
        Ok(self.last_db_changed)
    }

    async fn add_product(
        &self,
        product_id: u64,
        _params: &AddProductParams,
    ) -> Result<Option<StockLogResponse>> {
        self.record(format!("add_product:{product_id}"));
        Ok(self.stock_log.clone())
    }

    async fn consume_product(
        &self,
        product_id: u64,
        _params: &ConsumeProductParams,
    ) -> Result<Option<StockLogResponse>> {
        self.record(format!("consume_product:{product_id}"));
        Ok(self.stock_log.clone())
    }

    async fn open_product(
        &self,
        product_id: u64,
        _params: &OpenProductParams,
    ) -> Result<Option<StockLogResponse>> {
        self.record(format!("open_product:{product_id}"));
        Ok(self.stock_log.clone())
    }

    async fn inventory_product(
        &self,
        product_id: u64,
        _params: &InventoryProductParams,
    ) -> Result<Option<StockLogResponse>> {
        self.record(format!("inventory_product:{product_id}"));
        Ok(self.stock_log.clone())
    }

    async fn add_product_by_barcode(
        &self,
        barcode: &str,
        _params: &AddProductParams,
    ) -> Result<Option<StockLogResponse>> {
        self.record(format!("add_product_by_barcode:{barcode}"));
        Ok(self.stock_log.clone())
    }

    async fn consume_product_by_barcode(
        &self,
        barcode: &str,
        _params: &ConsumeProductParams,
    ) -> Result<Option<StockLogResponse>> {
        self.record(format!("consume_product_by_barcode:{barcode}"));
        Ok(self.stock_log.clone())
    }

    async fn inventory_product_by_barcode(
        &self,
        barcode: &str,
        _params: &InventoryProductParams,
    ) -> Result<Option<StockLogResponse>> {
        self.record(format!("inventory_product_by_barcode:{barcode}"));
        Ok(self.stock_log.clone())
    }

    async fn add_product_to_shopping_list(&self, params: &ShoppingListAddParams) -> Result<()> {
        self.record(format!("add_product_to_shopping_list:{}", params.product_id));
        Ok(())
    }

    async fn add_missing_products_to_shopping_list(&self, shopping_list_id: u64) -> Result<()> {
        self.record(format!(
            "add_missing_products_to_shopping_list:{shopping_list_id}"
        ));
        Ok(())
    }

    async fn clear_shopping_list(&self, shopping_list_id: u64) -> Result<()> {
        self.record(format!("clear_shopping_list:{shopping_list_id}"));
        Ok(())
    }

    async fn remove_product_in_shopping_list(
        &self,
        product_id: u64,
        shopping_list_id: u64,
        _amount: f64,
    ) -> Result<()> {
        self.record(format!(
            "remove_product_in_shopping_list:{product_id}:{shopping_list_id}"
        ));
        Ok(())
    }
}
