//! Catalog store.

use std::sync::{Arc, Mutex};

use crate::catalog::Product;
use crate::events::{AppEvent, EventBus};
use crate::ids::ProductId;

/// Read-only lookup capability over the catalog.
///
/// Components that only resolve identifiers (the cart, the overlay
/// data providers) depend on this trait rather than on the store type.
pub trait CatalogReader: Send + Sync {
    /// Look up one product by id. Absent ids are not an error.
    fn product(&self, id: &ProductId) -> Option<Product>;
    /// Snapshot of the full catalog in fetch order.
    fn products(&self) -> Vec<Product>;
}

/// Holds the fetched product list.
///
/// There is no partial update: `set_catalog` replaces the whole list
/// atomically from a fetch result and announces the change.
pub struct ProductCatalogStore {
    bus: Arc<EventBus>,
    products: Mutex<Vec<Product>>,
}

impl ProductCatalogStore {
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self {
            bus,
            products: Mutex::new(Vec::new()),
        }
    }

    /// Replace the full product list and announce the new catalog.
    pub fn set_catalog(&self, products: Vec<Product>) {
        *self.products.lock().unwrap() = products.clone();
        self.bus.publish(AppEvent::CatalogChanged { products });
    }

    /// Look up a product by id.
    pub fn find(&self, id: &ProductId) -> Option<Product> {
        self.products
            .lock()
            .unwrap()
            .iter()
            .find(|p| &p.id == id)
            .cloned()
    }

    /// Snapshot of the current catalog.
    pub fn all(&self) -> Vec<Product> {
        self.products.lock().unwrap().clone()
    }
}

impl CatalogReader for ProductCatalogStore {
    fn product(&self, id: &ProductId) -> Option<Product> {
        self.find(id)
    }

    fn products(&self) -> Vec<Product> {
        self.all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use crate::price::Price;

    fn product(id: &str, price: Option<u64>) -> Product {
        Product {
            id: ProductId::new(id),
            title: id.to_string(),
            price: price.map(Price::new),
            description: String::new(),
            category: "misc".to_string(),
            image: format!("{id}.png"),
        }
    }

    #[test]
    fn test_set_catalog_replaces_and_publishes() {
        let bus = Arc::new(EventBus::new());
        let store = ProductCatalogStore::new(Arc::clone(&bus));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        bus.subscribe(EventKind::CatalogChanged, move |event| {
            if let AppEvent::CatalogChanged { products } = event {
                sink.lock().unwrap().push(products.len());
            }
        });

        store.set_catalog(vec![product("a", Some(100)), product("b", None)]);
        store.set_catalog(vec![product("c", Some(50))]);

        assert_eq!(*seen.lock().unwrap(), vec![2, 1]);
        assert_eq!(store.all().len(), 1);
        assert!(store.find(&ProductId::new("a")).is_none());
    }

    #[test]
    fn test_find_missing_is_none_not_error() {
        let bus = Arc::new(EventBus::new());
        let store = ProductCatalogStore::new(bus);
        assert!(store.find(&ProductId::new("ghost")).is_none());
    }
}
