//! End-to-end checkout flow against a scripted backend double.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use shopfront_api::{ApiError, ShopApi, Storefront};
use shopfront_core::prelude::*;

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

#[derive(Default)]
struct ScriptedApi {
    catalogs: Mutex<VecDeque<Result<Vec<Product>, ApiError>>>,
    orders: Mutex<VecDeque<Result<OrderConfirmation, ApiError>>>,
}

#[async_trait]
impl ShopApi for ScriptedApi {
    async fn fetch_catalog(&self) -> Result<Vec<Product>, ApiError> {
        self.catalogs
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted fetch_catalog call")
    }

    async fn submit_order(&self, _request: &OrderRequest) -> Result<OrderConfirmation, ApiError> {
        self.orders
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted submit_order call")
    }
}

async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(1), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

fn fill_checkout(bus: &EventBus, product_id: &str) {
    bus.publish(AppEvent::AddToCartRequested {
        id: ProductId::new(product_id),
    });
    bus.publish(AppEvent::CheckoutStarted);
    bus.publish(AppEvent::AddressEntered {
        value: "Main St 1".to_string(),
    });
    bus.publish(AppEvent::PaymentMethodChosen {
        method: PaymentMethod::Online,
    });
    bus.publish(AppEvent::NextStepRequested);
    bus.publish(AppEvent::EmailEntered {
        value: "a@b.com".to_string(),
    });
    bus.publish(AppEvent::PhoneEntered {
        value: "+71234567890".to_string(),
    });
}

#[tokio::test]
async fn page_load_to_confirmation_through_the_command_loop() {
    let api = Arc::new(ScriptedApi::default());
    api.catalogs
        .lock()
        .unwrap()
        .push_back(Ok(vec![product("a", Some(100)), product("b", None)]));
    api.orders.lock().unwrap().push_back(Ok(OrderConfirmation {
        order_id: OrderId::new("ord-1"),
        total: Price::new(100),
    }));

    let storefront = Arc::new(Storefront::new(api));
    let runner = Arc::clone(&storefront);
    tokio::spawn(async move { runner.run().await });

    let bus = storefront.bus();
    bus.publish(AppEvent::PageLoaded);

    let catalog = storefront.catalog();
    wait_until(move || !catalog.all().is_empty()).await;

    fill_checkout(&bus, "a");
    assert!(storefront.order_form().snapshot().is_valid);

    bus.publish(AppEvent::OrderSubmitRequested);

    let modal = storefront.modal();
    wait_until(move || modal.active() == Some((ModalKind::Confirmation, None))).await;

    // Confirmed order empties the cart and resets the form.
    assert!(storefront.cart().items().is_empty());
    assert_eq!(storefront.cart().total(), Price::ZERO);
    assert!(!storefront.order_form().snapshot().is_valid);
}

#[tokio::test]
async fn failed_submit_keeps_cart_and_checkout_step() {
    let api = Arc::new(ScriptedApi::default());
    api.catalogs
        .lock()
        .unwrap()
        .push_back(Ok(vec![product("a", Some(100))]));
    api.orders.lock().unwrap().push_back(Err(ApiError::Http {
        status: 500,
        message: "temporarily unavailable".to_string(),
    }));

    let storefront = Storefront::new(api);
    storefront.refresh_catalog().await;

    let bus = storefront.bus();
    fill_checkout(&bus, "a");

    let failures = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&failures);
    bus.subscribe(EventKind::OrderSubmitFailed, move |event| {
        if let AppEvent::OrderSubmitFailed { reason } = event {
            sink.lock().unwrap().push(reason.clone());
        }
    });

    storefront.submit_order().await;

    assert_eq!(storefront.cart().items(), vec![ProductId::new("a")]);
    assert_eq!(storefront.cart().total(), Price::new(100));
    // Still on the contacts step; nothing opened or closed the overlay.
    assert_eq!(
        storefront.modal().active(),
        Some((ModalKind::CheckoutContacts, None))
    );
    let failures = failures.lock().unwrap();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].contains("temporarily unavailable"));
}

#[tokio::test]
async fn priceless_product_never_reaches_the_cart() {
    let api = Arc::new(ScriptedApi::default());
    api.catalogs
        .lock()
        .unwrap()
        .push_back(Ok(vec![product("b", None)]));

    let storefront = Storefront::new(api);
    storefront.refresh_catalog().await;

    let bus = storefront.bus();
    let rejections = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&rejections);
    bus.subscribe(EventKind::CartAddRejected, move |event| {
        if let AppEvent::CartAddRejected { reason, .. } = event {
            sink.lock().unwrap().push(*reason);
        }
    });

    bus.publish(AppEvent::AddToCartRequested {
        id: ProductId::new("b"),
    });

    assert!(storefront.cart().items().is_empty());
    assert_eq!(*rejections.lock().unwrap(), vec![CartRejection::Priceless]);
}
