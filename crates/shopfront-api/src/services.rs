//! Services translating between the async API boundary and the bus.
//!
//! Failures are recovered here and converted to events; nothing crosses
//! the bus as an error. No store is mutated before the backend confirms
//! the operation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use shopfront_core::cart::CartReader;
use shopfront_core::catalog::ProductCatalogStore;
use shopfront_core::events::{AppEvent, EventBus};
use shopfront_core::order::{OrderFormStore, OrderRequest};

use crate::client::ShopApi;

/// Fetches the catalog and applies it to the catalog store.
///
/// Fetches are not cancellable, so overlapping calls can resolve in any
/// order. A generation counter guards against the stale one winning:
/// only the response of the most recently started fetch is applied.
pub struct CatalogFetchService {
    api: Arc<dyn ShopApi>,
    bus: Arc<EventBus>,
    catalog: Arc<ProductCatalogStore>,
    generation: AtomicU64,
}

impl CatalogFetchService {
    pub fn new(api: Arc<dyn ShopApi>, bus: Arc<EventBus>, catalog: Arc<ProductCatalogStore>) -> Self {
        Self {
            api,
            bus,
            catalog,
            generation: AtomicU64::new(0),
        }
    }

    /// Fetch the catalog and, if still current, replace the store's
    /// contents. On failure the catalog is left unchanged and a failure
    /// event is published.
    pub async fn refresh(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.api.fetch_catalog().await;

        if self.generation.load(Ordering::SeqCst) != generation {
            warn!(generation, "discarding stale catalog fetch result");
            return;
        }

        match result {
            Ok(products) => {
                info!(count = products.len(), "catalog fetched");
                self.catalog.set_catalog(products);
            }
            Err(err) => {
                warn!(error = %err, "catalog fetch failed");
                self.bus.publish(AppEvent::CatalogFetchFailed {
                    reason: err.to_string(),
                });
            }
        }
    }
}

/// Builds the order request from current state and submits it.
pub struct OrderSubmitService {
    api: Arc<dyn ShopApi>,
    bus: Arc<EventBus>,
    cart: Arc<dyn CartReader>,
    form: Arc<OrderFormStore>,
}

impl OrderSubmitService {
    pub fn new(
        api: Arc<dyn ShopApi>,
        bus: Arc<EventBus>,
        cart: Arc<dyn CartReader>,
        form: Arc<OrderFormStore>,
    ) -> Self {
        Self {
            api,
            bus,
            cart,
            form,
        }
    }

    /// Submit the current form and cart contents.
    ///
    /// An invalid form or an empty cart fails fast without touching the
    /// network. The cart and form react to the `OrderSubmitted` event
    /// themselves; this service mutates nothing.
    pub async fn submit(&self) {
        let form = self.form.snapshot();
        if !form.is_valid {
            let reason = form
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            self.bus.publish(AppEvent::OrderSubmitFailed { reason });
            return;
        }
        // is_valid guarantees payment is set; stay typed anyway.
        let payment = match form.payment {
            Some(payment) => payment,
            None => {
                self.bus.publish(AppEvent::OrderSubmitFailed {
                    reason: "payment method is required".to_string(),
                });
                return;
            }
        };

        let items = self.cart.items();
        if items.is_empty() {
            self.bus.publish(AppEvent::OrderSubmitFailed {
                reason: "cart is empty".to_string(),
            });
            return;
        }

        let request = OrderRequest {
            payment,
            address: form.address,
            email: form.email,
            phone: form.phone,
            total: self.cart.total(),
            items,
        };

        match self.api.submit_order(&request).await {
            Ok(confirmation) => {
                info!(order_id = %confirmation.order_id, "order confirmed");
                self.bus.publish(AppEvent::OrderSubmitted { confirmation });
            }
            Err(err) => {
                warn!(error = %err, "order submission failed");
                self.bus.publish(AppEvent::OrderSubmitFailed {
                    reason: err.to_string(),
                });
            }
        }
    }
}
