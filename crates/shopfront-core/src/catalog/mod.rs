//! Product catalog module.
//!
//! Contains the product record and the store holding the fetched list.

mod product;
mod store;

pub use product::Product;
pub use store::{CatalogReader, ProductCatalogStore};
