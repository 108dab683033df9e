//! Cart store.
//!
//! Holds the ordered set of product ids selected for purchase and the
//! derived total. The total is always recomputed from current
//! membership against the catalog, never patched incrementally, so it
//! cannot drift from the item list.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogReader;
use crate::events::{AppEvent, EventBus, EventKind};
use crate::ids::ProductId;
use crate::price::Price;

/// Why an add was declined. Carried on the rejection event; the cart
/// state is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartRejection {
    /// The id is already in the cart.
    Duplicate,
    /// The product has no price and cannot be purchased.
    Priceless,
    /// The id does not resolve to any catalog product.
    UnknownProduct,
}

impl CartRejection {
    /// Human-readable reason for inline UI feedback.
    pub fn message(&self) -> &'static str {
        match self {
            CartRejection::Duplicate => "item is already in the cart",
            CartRejection::Priceless => "item has no price and cannot be purchased",
            CartRejection::UnknownProduct => "item is not in the catalog",
        }
    }
}

/// Read capability over the cart: snapshot accessors only.
pub trait CartReader: Send + Sync {
    /// Item ids in insertion order.
    fn items(&self) -> Vec<ProductId>;
    /// Derived total of the current membership.
    fn total(&self) -> Price;
}

/// Write capability over the cart.
pub trait CartWriter: Send + Sync {
    fn add(&self, id: &ProductId);
    fn remove(&self, id: &ProductId);
    fn clear(&self);
}

struct CartState {
    items: Vec<ProductId>,
    total: Price,
}

/// The cart store.
pub struct CartStore {
    bus: Arc<EventBus>,
    catalog: Arc<dyn CatalogReader>,
    state: Mutex<CartState>,
}

impl CartStore {
    pub fn new(bus: Arc<EventBus>, catalog: Arc<dyn CatalogReader>) -> Self {
        Self {
            bus,
            catalog,
            state: Mutex::new(CartState {
                items: Vec::new(),
                total: Price::ZERO,
            }),
        }
    }

    /// Subscribe this store's intent handlers on its bus.
    pub fn attach(self: &Arc<Self>) {
        let store = Arc::clone(self);
        self.bus.subscribe(EventKind::AddToCartRequested, move |event| {
            if let AppEvent::AddToCartRequested { id } = event {
                store.add(id);
            }
        });

        let store = Arc::clone(self);
        self.bus
            .subscribe(EventKind::RemoveFromCartRequested, move |event| {
                if let AppEvent::RemoveFromCartRequested { id } = event {
                    store.remove(id);
                }
            });

        // The cart empties only once the backend has confirmed the order.
        let store = Arc::clone(self);
        self.bus.subscribe(EventKind::OrderSubmitted, move |_| {
            store.clear();
        });
    }

    /// Add a product id to the cart.
    ///
    /// Declined adds (unknown id, price-less product, duplicate) leave
    /// the state untouched and publish a rejection event instead.
    pub fn add(&self, id: &ProductId) {
        let rejection = match self.catalog.product(id) {
            None => Some(CartRejection::UnknownProduct),
            Some(product) if !product.is_purchasable() => Some(CartRejection::Priceless),
            Some(_) => None,
        };

        let changed = match rejection {
            Some(_) => None,
            None => {
                let mut state = self.state.lock().unwrap();
                if state.items.contains(id) {
                    None
                } else {
                    state.items.push(id.clone());
                    state.total = self.resolve_total(&state.items);
                    Some((state.items.clone(), state.total))
                }
            }
        };

        match (rejection, changed) {
            (Some(reason), _) => self.bus.publish(AppEvent::CartAddRejected {
                id: id.clone(),
                reason,
            }),
            (None, Some((items, total))) => {
                self.bus.publish(AppEvent::CartChanged { items, total });
                self.bus.publish(AppEvent::CartItemAdded { id: id.clone() });
            }
            (None, None) => self.bus.publish(AppEvent::CartAddRejected {
                id: id.clone(),
                reason: CartRejection::Duplicate,
            }),
        }
    }

    /// Remove a product id. Removing an id that is not in the cart is a
    /// strict no-op: no mutation, no event.
    pub fn remove(&self, id: &ProductId) {
        let changed = {
            let mut state = self.state.lock().unwrap();
            if let Some(position) = state.items.iter().position(|item| item == id) {
                state.items.remove(position);
                state.total = self.resolve_total(&state.items);
                Some((state.items.clone(), state.total))
            } else {
                None
            }
        };

        if let Some((items, total)) = changed {
            self.bus.publish(AppEvent::CartChanged { items, total });
            self.bus
                .publish(AppEvent::CartItemRemoved { id: id.clone() });
        }
    }

    /// Empty the cart.
    pub fn clear(&self) {
        {
            let mut state = self.state.lock().unwrap();
            state.items.clear();
            state.total = Price::ZERO;
        }
        self.bus.publish(AppEvent::CartChanged {
            items: Vec::new(),
            total: Price::ZERO,
        });
        self.bus.publish(AppEvent::CartCleared);
    }

    /// Item ids in insertion order.
    pub fn items(&self) -> Vec<ProductId> {
        self.state.lock().unwrap().items.clone()
    }

    /// Current derived total.
    pub fn total(&self) -> Price {
        self.state.lock().unwrap().total
    }

    fn resolve_total(&self, items: &[ProductId]) -> Price {
        Price::sum(
            items
                .iter()
                .filter_map(|id| self.catalog.product(id))
                .filter_map(|product| product.price),
        )
    }
}

impl CartReader for CartStore {
    fn items(&self) -> Vec<ProductId> {
        CartStore::items(self)
    }

    fn total(&self) -> Price {
        CartStore::total(self)
    }
}

impl CartWriter for CartStore {
    fn add(&self, id: &ProductId) {
        CartStore::add(self, id);
    }

    fn remove(&self, id: &ProductId) {
        CartStore::remove(self, id);
    }

    fn clear(&self) {
        CartStore::clear(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Product, ProductCatalogStore};

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

    fn setup(products: Vec<Product>) -> (Arc<EventBus>, Arc<CartStore>) {
        let bus = Arc::new(EventBus::new());
        let catalog = Arc::new(ProductCatalogStore::new(Arc::clone(&bus)));
        catalog.set_catalog(products);
        let cart = Arc::new(CartStore::new(
            Arc::clone(&bus),
            catalog as Arc<dyn CatalogReader>,
        ));
        (bus, cart)
    }

    fn record(bus: &Arc<EventBus>) -> Arc<Mutex<Vec<AppEvent>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        bus.subscribe_any(move |event| sink.lock().unwrap().push(event.clone()));
        seen
    }

    #[test]
    fn test_add_updates_items_and_total() {
        let (_bus, cart) = setup(vec![product("a", Some(100))]);
        cart.add(&ProductId::new("a"));
        assert_eq!(cart.items(), vec![ProductId::new("a")]);
        assert_eq!(cart.total(), Price::new(100));
    }

    #[test]
    fn test_duplicate_add_rejected_without_state_change() {
        let (bus, cart) = setup(vec![product("a", Some(100))]);
        cart.add(&ProductId::new("a"));

        let seen = record(&bus);
        cart.add(&ProductId::new("a"));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total(), Price::new(100));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![AppEvent::CartAddRejected {
                id: ProductId::new("a"),
                reason: CartRejection::Duplicate,
            }]
        );
    }

    #[test]
    fn test_priceless_add_rejected() {
        let (bus, cart) = setup(vec![product("b", None)]);
        let seen = record(&bus);

        cart.add(&ProductId::new("b"));

        assert!(cart.items().is_empty());
        assert_eq!(
            *seen.lock().unwrap(),
            vec![AppEvent::CartAddRejected {
                id: ProductId::new("b"),
                reason: CartRejection::Priceless,
            }]
        );
    }

    #[test]
    fn test_unknown_product_rejected() {
        let (bus, cart) = setup(vec![]);
        let seen = record(&bus);

        cart.add(&ProductId::new("ghost"));

        assert!(cart.items().is_empty());
        assert_eq!(
            *seen.lock().unwrap(),
            vec![AppEvent::CartAddRejected {
                id: ProductId::new("ghost"),
                reason: CartRejection::UnknownProduct,
            }]
        );
    }

    #[test]
    fn test_total_tracks_membership_through_mutations() {
        let (_bus, cart) = setup(vec![
            product("a", Some(100)),
            product("b", Some(250)),
            product("c", Some(40)),
        ]);

        for id in ["a", "b", "c"] {
            cart.add(&ProductId::new(id));
            let expected = Price::sum(
                cart.items()
                    .iter()
                    .filter_map(|i| match i.as_str() {
                        "a" => Some(100),
                        "b" => Some(250),
                        "c" => Some(40),
                        _ => None,
                    })
                    .map(Price::new),
            );
            assert_eq!(cart.total(), expected);
        }

        cart.remove(&ProductId::new("b"));
        assert_eq!(cart.total(), Price::new(140));
        cart.remove(&ProductId::new("a"));
        assert_eq!(cart.total(), Price::new(40));
    }

    #[test]
    fn test_remove_absent_id_is_silent_noop() {
        let (bus, cart) = setup(vec![product("a", Some(100))]);
        cart.add(&ProductId::new("a"));

        let seen = record(&bus);
        cart.remove(&ProductId::new("ghost"));

        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(cart.items(), vec![ProductId::new("a")]);
    }

    #[test]
    fn test_add_publishes_changed_then_item_added() {
        let (bus, cart) = setup(vec![product("a", Some(100))]);
        let seen = record(&bus);

        cart.add(&ProductId::new("a"));

        let events = seen.lock().unwrap();
        assert_eq!(
            events[0],
            AppEvent::CartChanged {
                items: vec![ProductId::new("a")],
                total: Price::new(100),
            }
        );
        assert_eq!(
            events[1],
            AppEvent::CartItemAdded {
                id: ProductId::new("a")
            }
        );
    }

    #[test]
    fn test_clear_publishes_changed_then_cleared() {
        let (bus, cart) = setup(vec![product("a", Some(100))]);
        cart.add(&ProductId::new("a"));

        let seen = record(&bus);
        cart.clear();

        let events = seen.lock().unwrap();
        assert_eq!(
            events[0],
            AppEvent::CartChanged {
                items: Vec::new(),
                total: Price::ZERO,
            }
        );
        assert_eq!(events[1], AppEvent::CartCleared);
        assert!(cart.items().is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let (_bus, cart) = setup(vec![
            product("z", Some(1)),
            product("a", Some(2)),
            product("m", Some(3)),
        ]);
        for id in ["z", "a", "m"] {
            cart.add(&ProductId::new(id));
        }
        assert_eq!(
            cart.items(),
            vec![ProductId::new("z"), ProductId::new("a"), ProductId::new("m")]
        );
    }
}
