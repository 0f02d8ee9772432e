//! Domain entities built from the API's response shapes.
//!
//! Every entity is a plain value: constructing one never performs I/O, and
//! the only way to enrich one afterwards is its `hydrate` method, which
//! returns a new value.

mod group;
mod product;
mod quantity_unit;
mod shopping_list;

pub use group::Group;
pub use product::{Product, ProductBarcode};
pub use quantity_unit::QuantityUnit;
pub use shopping_list::ShoppingListProduct;
