//! The [`Grocy`] facade.

use chrono::NaiveDateTime;
use serde_json::{Map, Value};

use crate::api::{
    AddProductParams, ConsumeProductParams, CurrentStockResponse, EntityType, GrocyApi,
    GrocyApiClient, InventoryProductParams, OpenProductParams, Result, ShoppingListAddParams,
    StockLogResponse,
};
use crate::config::GrocyConfig;
use crate::models::{Group, Product, ShoppingListProduct};

/// Entry point of the library: one method per logical Grocy operation.
///
/// Every method issues its requests one after another. Methods taking a
/// `get_details` flag fetch each returned product's details in list order,
/// and stop at the first failing fetch.
///
/// # Example
///
/// ```rust,ignore
/// use grocy_api::{ApiKey, BaseUrl, Grocy, GrocyConfig};
///
/// let config = GrocyConfig::builder()
///     .base_url(BaseUrl::new("https://grocy.local")?)
///     .api_key(ApiKey::new("my-api-key")?)
///     .build()?;
/// let grocy = Grocy::new(&config)?;
///
/// for product in grocy.due_products(true).await? {
///     println!("{:?} is due on {:?}", product.name(), product.best_before_date());
/// }
/// ```
#[derive(Debug)]
pub struct Grocy<A = GrocyApiClient> {
    api: A,
}

// Verify Grocy is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Grocy>();
};

impl Grocy {
    /// Creates a facade talking HTTP to the configured instance.
    ///
    /// # Errors
    ///
    /// Returns [`GrocyError::Http`](crate::GrocyError::Http) if the HTTP
    /// client cannot be created.
    pub fn new(config: &GrocyConfig) -> Result<Self> {
        Ok(Self::with_api(GrocyApiClient::new(config)?))
    }
}

impl<A: GrocyApi> Grocy<A> {
    /// Wraps any [`GrocyApi`] implementation.
    #[must_use]
    pub const fn with_api(api: A) -> Self {
        Self { api }
    }

    /// Returns the underlying API client.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    async fn hydrate_all(&self, products: Vec<Product>, get_details: bool) -> Result<Vec<Product>> {
        if !get_details {
            return Ok(products);
        }

        let mut hydrated = Vec::with_capacity(products.len());
        for product in products {
            hydrated.push(product.hydrate(&self.api).await?);
        }
        Ok(hydrated)
    }

    async fn stock_products(
        &self,
        entries: Vec<CurrentStockResponse>,
        get_details: bool,
    ) -> Result<Vec<Product>> {
        let products = entries.into_iter().map(Product::new).collect();
        self.hydrate_all(products, get_details).await
    }

    async fn stock_log_product(
        &self,
        entry: Option<StockLogResponse>,
        get_details: bool,
    ) -> Result<Option<Product>> {
        let Some(entry) = entry else {
            return Ok(None);
        };

        let product = Product::new(entry);
        if get_details {
            return product.hydrate(&self.api).await.map(Some);
        }
        Ok(Some(product))
    }

    /// Everything currently in stock.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn stock(&self, get_details: bool) -> Result<Vec<Product>> {
        let entries = self.api.get_stock().await?;
        self.stock_products(entries, get_details).await
    }

    /// Products due soon.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn due_products(&self, get_details: bool) -> Result<Vec<Product>> {
        let volatile = self.api.get_volatile_stock().await?;
        self.stock_products(volatile.due_products, get_details)
            .await
    }

    /// Products due soon.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    #[deprecated(note = "use `due_products` instead")]
    pub async fn expiring_products(&self, get_details: bool) -> Result<Vec<Product>> {
        tracing::warn!("expiring_products is deprecated, use due_products instead");
        self.due_products(get_details).await
    }

    /// Products past their due date.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn overdue_products(&self, get_details: bool) -> Result<Vec<Product>> {
        let volatile = self.api.get_volatile_stock().await?;
        self.stock_products(volatile.overdue_products, get_details)
            .await
    }

    /// Products past their expiry date.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn expired_products(&self, get_details: bool) -> Result<Vec<Product>> {
        let volatile = self.api.get_volatile_stock().await?;
        self.stock_products(volatile.expired_products, get_details)
            .await
    }

    /// Products below their minimum stock amount.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn missing_products(&self, get_details: bool) -> Result<Vec<Product>> {
        let volatile = self.api.get_volatile_stock().await?;
        let products = volatile
            .missing_products
            .into_iter()
            .map(Product::new)
            .collect();
        self.hydrate_all(products, get_details).await
    }

    /// A single product by id, or `None` if Grocy doesn't know it.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn product(&self, product_id: u64) -> Result<Option<Product>> {
        Ok(self.api.get_product(product_id).await?.map(Product::new))
    }

    /// A single product by barcode, or `None` if Grocy doesn't know it.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn product_by_barcode(&self, barcode: &str) -> Result<Option<Product>> {
        Ok(self
            .api
            .get_product_by_barcode(barcode)
            .await?
            .map(Product::new))
    }

    /// Every product defined in Grocy, in stock or not.
    ///
    /// # Errors
    ///
    /// Returns the API client's error, or a decoding error for a malformed
    /// product record.
    pub async fn all_products(&self) -> Result<Vec<Product>> {
        self.api
            .get_generic_objects(EntityType::Products, None)
            .await?
            .iter()
            .map(Product::from_json)
            .collect()
    }

    /// Shopping list rows matching `query_filters` (all rows when `None`).
    ///
    /// With `get_details`, each row referencing a product gets that product
    /// attached.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn shopping_list(
        &self,
        get_details: bool,
        query_filters: Option<&[String]>,
    ) -> Result<Vec<ShoppingListProduct>> {
        let rows = self
            .api
            .get_shopping_list(query_filters)
            .await?
            .into_iter()
            .map(ShoppingListProduct::from);
        if !get_details {
            return Ok(rows.collect());
        }

        let mut hydrated = Vec::new();
        for row in rows {
            hydrated.push(row.hydrate(&self.api).await?);
        }
        Ok(hydrated)
    }

    /// Product groups matching `query_filters` (all groups when `None`).
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn product_groups(&self, query_filters: Option<&[String]>) -> Result<Vec<Group>> {
        Ok(self
            .api
            .get_product_groups(query_filters)
            .await?
            .into_iter()
            .map(Group::from)
            .collect())
    }

    /// Creates an object of any entity type and returns its new id.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn add_generic(&self, entity: EntityType, data: &Value) -> Result<Option<u64>> {
        self.api.add_generic(entity, data).await
    }

    /// A single object of any entity type, undecoded.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn get_generic(&self, entity: EntityType, object_id: u64) -> Result<Option<Value>> {
        self.api.get_generic(entity, object_id).await
    }

    /// Overwrites the given fields of an object.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn update_generic(
        &self,
        entity: EntityType,
        object_id: u64,
        data: &Value,
    ) -> Result<()> {
        self.api.update_generic(entity, object_id, data).await
    }

    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn delete_generic(&self, entity: EntityType, object_id: u64) -> Result<()> {
        self.api.delete_generic(entity, object_id).await
    }

    /// All objects of an entity type matching `query_filters`, undecoded.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn get_generic_objects_for_type(
        &self,
        entity: EntityType,
        query_filters: Option<&[String]>,
    ) -> Result<Vec<Value>> {
        self.api.get_generic_objects(entity, query_filters).await
    }

    /// The user-defined fields of an object, keyed by field name.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn get_userfields(
        &self,
        entity: EntityType,
        object_id: u64,
    ) -> Result<Map<String, Value>> {
        self.api.get_userfields(entity, object_id).await
    }

    /// Sets one user-defined field of an object.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn set_userfields(
        &self,
        entity: EntityType,
        object_id: u64,
        key: &str,
        value: &Value,
    ) -> Result<()> {
        self.api
            .set_userfields(entity, object_id, key, value)
            .await
    }

    /// When anything in Grocy's database last changed.
    ///
    /// Cheap enough to poll before deciding whether to refetch.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn get_last_db_changed(&self) -> Result<Option<NaiveDateTime>> {
        self.api.get_last_db_changed().await
    }

    /// Books a purchase and returns the created stock entry.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn add_product(
        &self,
        product_id: u64,
        params: &AddProductParams,
    ) -> Result<Option<StockLogResponse>> {
        self.api.add_product(product_id, params).await
    }

    /// Books a consumption and returns the created stock entry.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn consume_product(
        &self,
        product_id: u64,
        params: &ConsumeProductParams,
    ) -> Result<Option<StockLogResponse>> {
        self.api.consume_product(product_id, params).await
    }

    /// Marks stock as opened and returns the created stock entry.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn open_product(
        &self,
        product_id: u64,
        params: &OpenProductParams,
    ) -> Result<Option<StockLogResponse>> {
        self.api.open_product(product_id, params).await
    }

    /// Sets the stock amount of a product and returns the affected product.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn inventory_product(
        &self,
        product_id: u64,
        params: &InventoryProductParams,
        get_details: bool,
    ) -> Result<Option<Product>> {
        let entry = self.api.inventory_product(product_id, params).await?;
        self.stock_log_product(entry, get_details).await
    }

    /// Books a purchase by barcode and returns the affected product.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn add_product_by_barcode(
        &self,
        barcode: &str,
        params: &AddProductParams,
        get_details: bool,
    ) -> Result<Option<Product>> {
        let entry = self.api.add_product_by_barcode(barcode, params).await?;
        self.stock_log_product(entry, get_details).await
    }

    /// Books a consumption by barcode and returns the affected product.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn consume_product_by_barcode(
        &self,
        barcode: &str,
        params: &ConsumeProductParams,
        get_details: bool,
    ) -> Result<Option<Product>> {
        let entry = self.api.consume_product_by_barcode(barcode, params).await?;
        self.stock_log_product(entry, get_details).await
    }

    /// Sets the stock amount by barcode and returns the affected product.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn inventory_product_by_barcode(
        &self,
        barcode: &str,
        params: &InventoryProductParams,
        get_details: bool,
    ) -> Result<Option<Product>> {
        let entry = self
            .api
            .inventory_product_by_barcode(barcode, params)
            .await?;
        self.stock_log_product(entry, get_details).await
    }

    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn add_product_to_shopping_list(&self, params: &ShoppingListAddParams) -> Result<()> {
        self.api.add_product_to_shopping_list(params).await
    }

    /// Adds every product below its minimum stock amount to a shopping list.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn add_missing_product_to_shopping_list(&self, shopping_list_id: u64) -> Result<()> {
        self.api
            .add_missing_products_to_shopping_list(shopping_list_id)
            .await
    }

    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn clear_shopping_list(&self, shopping_list_id: u64) -> Result<()> {
        self.api.clear_shopping_list(shopping_list_id).await
    }

    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn remove_product_in_shopping_list(
        &self,
        product_id: u64,
        shopping_list_id: u64,
        amount: f64,
    ) -> Result<()> {
        self.api
            .remove_product_in_shopping_list(product_id, shopping_list_id, amount)
            .await
    }
}
