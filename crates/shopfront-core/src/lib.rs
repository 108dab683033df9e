//! Storefront state stores and event coordination.
//!
//! This crate provides the state/event layer of a single-page
//! storefront:
//!
//! - **Events**: a closed event vocabulary and a synchronous
//!   publish/subscribe bus
//! - **Catalog**: the fetched product list with lookup by id
//! - **Cart**: membership plus a derived total that never drifts
//! - **Order**: the checkout form with full revalidation per keystroke
//! - **Modal**: the mutually exclusive overlay state machine
//!
//! All communication between components is indirect through the bus:
//! views publish intent events, stores mutate and publish state-changed
//! events carrying self-contained snapshots.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use shopfront_core::prelude::*;
//!
//! let bus = Arc::new(EventBus::new());
//! let catalog = Arc::new(ProductCatalogStore::new(Arc::clone(&bus)));
//! let cart = Arc::new(CartStore::new(
//!     Arc::clone(&bus),
//!     Arc::clone(&catalog) as Arc<dyn CatalogReader>,
//! ));
//! cart.attach();
//!
//! catalog.set_catalog(vec![Product {
//!     id: ProductId::new("a"),
//!     title: "Widget".to_string(),
//!     price: Some(Price::new(100)),
//!     description: String::new(),
//!     category: "widgets".to_string(),
//!     image: "a.png".to_string(),
//! }]);
//!
//! bus.publish(AppEvent::AddToCartRequested { id: ProductId::new("a") });
//! assert_eq!(cart.total(), Price::new(100));
//! ```

pub mod cart;
pub mod catalog;
pub mod events;
pub mod ids;
pub mod modal;
pub mod order;
pub mod price;

pub use events::{AppEvent, EventBus, EventKind};
pub use ids::{OrderId, ProductId};
pub use price::Price;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::events::{AppEvent, EventBus, EventKind, Subscription};
    pub use crate::ids::{OrderId, ProductId};
    pub use crate::price::Price;

    pub use crate::catalog::{CatalogReader, Product, ProductCatalogStore};

    pub use crate::cart::{CartReader, CartRejection, CartStore, CartWriter};

    pub use crate::order::{
        FieldError, OrderConfirmation, OrderField, OrderFormSnapshot, OrderFormStore, OrderRequest,
        PaymentMethod,
    };

    pub use crate::modal::{ModalCoordinator, ModalKind};
}
