//! Application wiring.
//!
//! Constructs the bus, the stores, and the services exactly once and
//! injects them explicitly; nothing here is a global. Synchronous bus
//! handlers cannot await, so intents that need the network are bridged
//! onto a command channel drained by [`Storefront::run`].

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::warn;

use shopfront_core::cart::{CartReader, CartStore};
use shopfront_core::catalog::{CatalogReader, ProductCatalogStore};
use shopfront_core::events::{EventBus, EventKind};
use shopfront_core::modal::ModalCoordinator;
use shopfront_core::order::OrderFormStore;

use crate::client::ShopApi;
use crate::services::{CatalogFetchService, OrderSubmitService};

/// Async work requested by synchronous bus handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceCommand {
    RefreshCatalog,
    SubmitOrder,
}

/// The assembled storefront state layer.
pub struct Storefront {
    bus: Arc<EventBus>,
    catalog: Arc<ProductCatalogStore>,
    cart: Arc<CartStore>,
    order_form: Arc<OrderFormStore>,
    modal: Arc<ModalCoordinator>,
    catalog_fetch: Arc<CatalogFetchService>,
    order_submit: Arc<OrderSubmitService>,
    commands: Mutex<Option<mpsc::UnboundedReceiver<ServiceCommand>>>,
}

impl Storefront {
    /// Build and wire every component against the given backend.
    pub fn new(api: Arc<dyn ShopApi>) -> Self {
        let bus = Arc::new(EventBus::new());

        let catalog = Arc::new(ProductCatalogStore::new(Arc::clone(&bus)));
        let cart = Arc::new(CartStore::new(
            Arc::clone(&bus),
            Arc::clone(&catalog) as Arc<dyn CatalogReader>,
        ));
        let order_form = Arc::new(OrderFormStore::new(Arc::clone(&bus)));
        let modal = Arc::new(ModalCoordinator::new(Arc::clone(&bus)));

        cart.attach();
        order_form.attach();
        modal.attach();

        let catalog_fetch = Arc::new(CatalogFetchService::new(
            Arc::clone(&api),
            Arc::clone(&bus),
            Arc::clone(&catalog),
        ));
        let order_submit = Arc::new(OrderSubmitService::new(
            api,
            Arc::clone(&bus),
            Arc::clone(&cart) as Arc<dyn CartReader>,
            Arc::clone(&order_form),
        ));

        let (sender, receiver) = mpsc::unbounded_channel();

        let tx = sender.clone();
        bus.subscribe(EventKind::PageLoaded, move |_| {
            let _ = tx.send(ServiceCommand::RefreshCatalog);
        });
        let tx = sender;
        bus.subscribe(EventKind::OrderSubmitRequested, move |_| {
            let _ = tx.send(ServiceCommand::SubmitOrder);
        });

        Self {
            bus,
            catalog,
            cart,
            order_form,
            modal,
            catalog_fetch,
            order_submit,
            commands: Mutex::new(Some(receiver)),
        }
    }

    /// Drain service commands until the storefront is dropped.
    ///
    /// Returns immediately if the loop is already running elsewhere.
    pub async fn run(&self) {
        let receiver = self.commands.lock().unwrap().take();
        let Some(mut receiver) = receiver else {
            warn!("storefront service loop already taken");
            return;
        };
        while let Some(command) = receiver.recv().await {
            match command {
                ServiceCommand::RefreshCatalog => self.catalog_fetch.refresh().await,
                ServiceCommand::SubmitOrder => self.order_submit.submit().await,
            }
        }
    }

    /// Fetch the catalog now, bypassing the command loop.
    pub async fn refresh_catalog(&self) {
        self.catalog_fetch.refresh().await;
    }

    /// Submit the current order now, bypassing the command loop.
    pub async fn submit_order(&self) {
        self.order_submit.submit().await;
    }

    pub fn bus(&self) -> Arc<EventBus> {
        Arc::clone(&self.bus)
    }

    pub fn catalog(&self) -> Arc<ProductCatalogStore> {
        Arc::clone(&self.catalog)
    }

    pub fn cart(&self) -> Arc<CartStore> {
        Arc::clone(&self.cart)
    }

    pub fn order_form(&self) -> Arc<OrderFormStore> {
        Arc::clone(&self.order_form)
    }

    pub fn modal(&self) -> Arc<ModalCoordinator> {
        Arc::clone(&self.modal)
    }
}
