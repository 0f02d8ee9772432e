use serde::Serialize;

use super::product::Product;
use crate::api::{GrocyApi, Result, ShoppingListItem};

/// One row of a shopping list.
///
/// A row may reference a product or be a free-text note. The referenced
/// [`Product`] is only known after [`hydrate`](Self::hydrate).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShoppingListProduct {
    id: u64,
    product_id: Option<u64>,
    note: Option<String>,
    amount: f64,
    product: Option<Product>,
}

impl ShoppingListProduct {
    /// Fetches the referenced product and returns the row with it attached.
    ///
    /// Rows without a product id are returned unchanged and no request is
    /// made. If the API knows no such product, `product` stays `None`.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn hydrate<A: GrocyApi>(self, api: &A) -> Result<Self> {
        let Some(product_id) = self.product_id else {
            return Ok(self);
        };

        tracing::debug!(product_id, "Fetching shopping list product");
        let product = api.get_product(product_id).await?.map(Product::new);
        Ok(Self { product, ..self })
    }

    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub const fn product_id(&self) -> Option<u64> {
        self.product_id
    }

    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    #[must_use]
    pub const fn amount(&self) -> f64 {
        self.amount
    }

    #[must_use]
    pub const fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }
}

impl From<ShoppingListItem> for ShoppingListProduct {
    fn from(item: ShoppingListItem) -> Self {
        Self {
            id: item.id,
            product_id: item.product_id,
            note: item.note,
            amount: item.amount,
            product: None,
        }
    }
}
