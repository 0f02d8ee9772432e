//! Request parameter types for the stock and shopping-list endpoints.
//!
//! Each params struct serialises directly into the JSON body Grocy expects.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of stock booking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionType {
    #[default]
    Purchase,
    Consume,
    InventoryCorrection,
    ProductOpened,
}

/// Entity names accepted by the generic `objects/{entity}` and
/// `userfields/{entity}` endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityType {
    Products,
    ProductBarcodes,
    ProductGroups,
    ShoppingList,
    ShoppingLists,
    ShoppingLocations,
    QuantityUnits,
    QuantityUnitConversions,
    Locations,
    Recipes,
    Chores,
    Batteries,
    Tasks,
    TaskCategories,
    Equipment,
    MealPlan,
    MealPlanSections,
}

impl EntityType {
    /// Returns the path segment for this entity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::ProductBarcodes => "product_barcodes",
            Self::ProductGroups => "product_groups",
            Self::ShoppingList => "shopping_list",
            Self::ShoppingLists => "shopping_lists",
            Self::ShoppingLocations => "shopping_locations",
            Self::QuantityUnits => "quantity_units",
            Self::QuantityUnitConversions => "quantity_unit_conversions",
            Self::Locations => "locations",
            Self::Recipes => "recipes",
            Self::Chores => "chores",
            Self::Batteries => "batteries",
            Self::Tasks => "tasks",
            Self::TaskCategories => "task_categories",
            Self::Equipment => "equipment",
            Self::MealPlan => "meal_plan",
            Self::MealPlanSections => "meal_plan_sections",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `stock/products/{id}/add` and its by-barcode variant.
///
/// # Example
///
/// ```rust
/// use grocy_api::AddProductParams;
///
/// let params = AddProductParams::new(2.0).price(1.49);
/// let body = serde_json::to_value(&params).unwrap();
/// assert_eq!(body["amount"], 2.0);
/// assert_eq!(body["transaction_type"], "purchase");
/// assert!(body.get("best_before_date").is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AddProductParams {
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_before_date: Option<NaiveDate>,
    pub transaction_type: TransactionType,
}

impl AddProductParams {
    #[must_use]
    pub const fn new(amount: f64) -> Self {
        Self {
            amount,
            price: None,
            best_before_date: None,
            transaction_type: TransactionType::Purchase,
        }
    }

    #[must_use]
    pub const fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub const fn best_before_date(mut self, date: NaiveDate) -> Self {
        self.best_before_date = Some(date);
        self
    }

    #[must_use]
    pub const fn transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = transaction_type;
        self
    }
}

/// Body of `stock/products/{id}/consume` and its by-barcode variant.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConsumeProductParams {
    pub amount: f64,
    pub spoiled: bool,
    pub transaction_type: TransactionType,
    pub allow_subproduct_substitution: bool,
}

impl ConsumeProductParams {
    #[must_use]
    pub const fn new(amount: f64) -> Self {
        Self {
            amount,
            spoiled: false,
            transaction_type: TransactionType::Consume,
            allow_subproduct_substitution: false,
        }
    }

    #[must_use]
    pub const fn spoiled(mut self, spoiled: bool) -> Self {
        self.spoiled = spoiled;
        self
    }

    #[must_use]
    pub const fn allow_subproduct_substitution(mut self, allow: bool) -> Self {
        self.allow_subproduct_substitution = allow;
        self
    }
}

/// Body of `stock/products/{id}/open`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OpenProductParams {
    pub amount: f64,
    pub allow_subproduct_substitution: bool,
}

impl OpenProductParams {
    #[must_use]
    pub const fn new(amount: f64) -> Self {
        Self {
            amount,
            allow_subproduct_substitution: false,
        }
    }
}

/// Body of `stock/products/{id}/inventory` and its by-barcode variant.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InventoryProductParams {
    pub new_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_before_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shopping_location_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl InventoryProductParams {
    #[must_use]
    pub const fn new(new_amount: f64) -> Self {
        Self {
            new_amount,
            best_before_date: None,
            shopping_location_id: None,
            location_id: None,
            price: None,
        }
    }

    #[must_use]
    pub const fn best_before_date(mut self, date: NaiveDate) -> Self {
        self.best_before_date = Some(date);
        self
    }

    #[must_use]
    pub const fn location_id(mut self, location_id: u64) -> Self {
        self.location_id = Some(location_id);
        self
    }

    #[must_use]
    pub const fn shopping_location_id(mut self, shopping_location_id: u64) -> Self {
        self.shopping_location_id = Some(shopping_location_id);
        self
    }

    #[must_use]
    pub const fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }
}

/// Body of `stock/shoppinglist/add-product`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShoppingListAddParams {
    pub product_id: u64,
    #[serde(rename = "list_id", skip_serializing_if = "Option::is_none")]
    pub shopping_list_id: Option<u64>,
    #[serde(rename = "product_amount", skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(rename = "qu_id", skip_serializing_if = "Option::is_none")]
    pub quantity_unit_id: Option<u64>,
}

impl ShoppingListAddParams {
    #[must_use]
    pub const fn new(product_id: u64) -> Self {
        Self {
            product_id,
            shopping_list_id: None,
            amount: None,
            quantity_unit_id: None,
        }
    }

    #[must_use]
    pub const fn shopping_list_id(mut self, shopping_list_id: u64) -> Self {
        self.shopping_list_id = Some(shopping_list_id);
        self
    }

    #[must_use]
    pub const fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    #[must_use]
    pub const fn quantity_unit_id(mut self, quantity_unit_id: u64) -> Self {
        self.quantity_unit_id = Some(quantity_unit_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transaction_type_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_value(TransactionType::InventoryCorrection).unwrap(),
            json!("inventory-correction")
        );
        assert_eq!(
            serde_json::to_value(TransactionType::ProductOpened).unwrap(),
            json!("product-opened")
        );
    }

    #[test]
    fn test_entity_type_path_segments() {
        assert_eq!(EntityType::ProductGroups.to_string(), "product_groups");
        assert_eq!(EntityType::ShoppingList.as_str(), "shopping_list");
    }

    #[test]
    fn test_add_product_body_includes_date_when_set() {
        let params =
            AddProductParams::new(1.0).best_before_date(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        let body = serde_json::to_value(&params).unwrap();

        assert_eq!(body["best_before_date"], json!("2024-07-01"));
        assert!(body.get("price").is_none());
    }

    #[test]
    fn test_consume_defaults() {
        let body = serde_json::to_value(ConsumeProductParams::new(1.0)).unwrap();
        assert_eq!(
            body,
            json!({
                "amount": 1.0,
                "spoiled": false,
                "transaction_type": "consume",
                "allow_subproduct_substitution": false
            })
        );
    }

    #[test]
    fn test_shopping_list_add_uses_grocy_field_names() {
        let params = ShoppingListAddParams::new(9)
            .shopping_list_id(2)
            .amount(3.0)
            .quantity_unit_id(4);
        let body = serde_json::to_value(&params).unwrap();

        assert_eq!(
            body,
            json!({"product_id": 9, "list_id": 2, "product_amount": 3.0, "qu_id": 4})
        );
    }

    #[test]
    fn test_inventory_omits_unset_fields() {
        let body = serde_json::to_value(InventoryProductParams::new(5.0).location_id(3)).unwrap();
        assert_eq!(body, json!({"new_amount": 5.0, "location_id": 3}));
    }
}
