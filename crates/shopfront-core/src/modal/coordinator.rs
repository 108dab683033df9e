//! Overlay state machine.
//!
//! At most one overlay is active at a time. Opening one while another
//! is showing emits exactly one closed notification followed by one
//! opened notification.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::events::{AppEvent, EventBus, EventKind};
use crate::ids::ProductId;

/// The overlays the storefront can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalKind {
    /// Product detail view; carries the product id it was opened for.
    ProductDetail,
    /// Cart panel.
    Cart,
    /// Checkout step one: delivery address and payment method.
    CheckoutDelivery,
    /// Checkout step two: email and phone.
    CheckoutContacts,
    /// Order confirmation.
    Confirmation,
}

impl ModalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModalKind::ProductDetail => "product_detail",
            ModalKind::Cart => "cart",
            ModalKind::CheckoutDelivery => "checkout_delivery",
            ModalKind::CheckoutContacts => "checkout_contacts",
            ModalKind::Confirmation => "confirmation",
        }
    }
}

#[derive(Clone)]
struct ActiveModal {
    kind: ModalKind,
    product: Option<ProductId>,
}

/// Tracks which single overlay (if any) is open.
pub struct ModalCoordinator {
    bus: Arc<EventBus>,
    state: Mutex<Option<ActiveModal>>,
}

impl ModalCoordinator {
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self {
            bus,
            state: Mutex::new(None),
        }
    }

    /// Subscribe this coordinator's intent handlers on its bus.
    pub fn attach(self: &Arc<Self>) {
        let coordinator = Arc::clone(self);
        self.bus.subscribe(EventKind::ProductClicked, move |event| {
            if let AppEvent::ProductClicked { id } = event {
                coordinator.open(ModalKind::ProductDetail, Some(id.clone()));
            }
        });

        let coordinator = Arc::clone(self);
        self.bus.subscribe(EventKind::CartOpenRequested, move |_| {
            coordinator.open(ModalKind::Cart, None);
        });

        let coordinator = Arc::clone(self);
        self.bus.subscribe(EventKind::CheckoutStarted, move |_| {
            coordinator.open(ModalKind::CheckoutDelivery, None);
        });

        let coordinator = Arc::clone(self);
        self.bus.subscribe(EventKind::NextStepRequested, move |_| {
            coordinator.open(ModalKind::CheckoutContacts, None);
        });

        let coordinator = Arc::clone(self);
        self.bus.subscribe(EventKind::OrderSubmitted, move |_| {
            coordinator.open(ModalKind::Confirmation, None);
        });

        let coordinator = Arc::clone(self);
        self.bus.subscribe(EventKind::ModalCloseRequested, move |_| {
            coordinator.close();
        });
    }

    /// Open an overlay, implicitly closing whichever was open.
    ///
    /// Re-opening the overlay that is already showing emits only the
    /// opened notification (the payload may differ, e.g. a different
    /// product id in the detail view).
    pub fn open(&self, kind: ModalKind, product: Option<ProductId>) {
        let previous = {
            let mut state = self.state.lock().unwrap();
            let previous = state.take();
            *state = Some(ActiveModal {
                kind,
                product: product.clone(),
            });
            previous
        };

        if let Some(previous) = previous {
            if previous.kind != kind {
                self.bus.publish(AppEvent::ModalClosed {
                    modal: previous.kind,
                });
            }
        }
        self.bus.publish(AppEvent::ModalOpened {
            modal: kind,
            product,
        });
    }

    /// Dismiss the active overlay. No-op when nothing is open.
    pub fn close(&self) {
        let previous = self.state.lock().unwrap().take();
        if let Some(previous) = previous {
            self.bus.publish(AppEvent::ModalClosed {
                modal: previous.kind,
            });
        }
    }

    /// The active overlay and its optional product id.
    pub fn active(&self) -> Option<(ModalKind, Option<ProductId>)> {
        self.state
            .lock()
            .unwrap()
            .as_ref()
            .map(|active| (active.kind, active.product.clone()))
    }
}
