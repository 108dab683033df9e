//! Product record.

use serde::{Deserialize, Serialize};

use crate::ids::ProductId;
use crate::price::Price;

/// A catalog product as fetched from the backend.
///
/// Immutable once fetched; the catalog is only ever replaced wholesale.
/// A `None` price marks a price-less product: displayed, never added to
/// the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Price, or `None` for a price-less product.
    pub price: Option<Price>,
    /// Long description shown in the detail view.
    pub description: String,
    /// Category tag.
    pub category: String,
    /// Image path relative to the CDN origin.
    pub image: String,
}

impl Product {
    /// Whether this product can be added to the cart.
    pub fn is_purchasable(&self) -> bool {
        self.price.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_price_deserializes_as_priceless() {
        let json = r#"{
            "id": "p1",
            "title": "Untitled",
            "price": null,
            "description": "",
            "category": "misc",
            "image": "p1.png"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, None);
        assert!(!product.is_purchasable());
    }

    #[test]
    fn test_priced_product_is_purchasable() {
        let json = r#"{
            "id": "p2",
            "title": "Widget",
            "price": 450,
            "description": "a widget",
            "category": "widgets",
            "image": "p2.png"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, Some(Price::new(450)));
        assert!(product.is_purchasable());
    }
}
