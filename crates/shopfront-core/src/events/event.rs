//! Application event vocabulary.
//!
//! A single closed enum covers both directions of the event flow:
//! intent events emitted by views describing user actions, and
//! state-changed events emitted by stores after a successful mutation.
//! State-changed payloads are fully self-contained snapshots, so a
//! subscriber never has to reach back into a store mid-dispatch.

use crate::cart::CartRejection;
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::modal::ModalKind;
use crate::order::{OrderConfirmation, OrderField, OrderFormSnapshot, PaymentMethod};
use crate::price::Price;

/// Every event that can cross the bus.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    // Intent events (view -> store/service).
    /// The page finished loading; kicks off the initial catalog fetch.
    PageLoaded,
    /// A product card was clicked.
    ProductClicked { id: ProductId },
    /// The "add to cart" control was used on a product.
    AddToCartRequested { id: ProductId },
    /// The "remove" control was used on a cart line.
    RemoveFromCartRequested { id: ProductId },
    /// The cart button was clicked.
    CartOpenRequested,
    /// The "checkout" button was clicked from the cart panel.
    CheckoutStarted,
    /// The delivery address input changed.
    AddressEntered { value: String },
    /// A payment method was selected.
    PaymentMethodChosen { method: PaymentMethod },
    /// The email input changed.
    EmailEntered { value: String },
    /// The phone input changed.
    PhoneEntered { value: String },
    /// The "next" button on the delivery step was clicked.
    NextStepRequested,
    /// The final submit button was clicked.
    OrderSubmitRequested,
    /// The active overlay's close control was used.
    ModalCloseRequested,

    // State-changed events (store/service -> view).
    /// The catalog was replaced wholesale from a fetch result.
    CatalogChanged { products: Vec<Product> },
    /// The catalog fetch failed; the catalog is unchanged.
    CatalogFetchFailed { reason: String },
    /// Cart membership or total changed.
    CartChanged { items: Vec<ProductId>, total: Price },
    /// An item was appended to the cart.
    CartItemAdded { id: ProductId },
    /// An item was removed from the cart.
    CartItemRemoved { id: ProductId },
    /// An add was declined; cart state is unchanged.
    CartAddRejected { id: ProductId, reason: CartRejection },
    /// The cart was emptied after a confirmed order.
    CartCleared,
    /// A form field changed; carries the full revalidated snapshot.
    OrderFormChanged { form: OrderFormSnapshot },
    /// Per-keystroke verdict for the field that just changed.
    FieldValidated {
        field: OrderField,
        error: Option<String>,
    },
    /// An overlay became active.
    ModalOpened {
        modal: ModalKind,
        product: Option<ProductId>,
    },
    /// An overlay was dismissed or replaced.
    ModalClosed { modal: ModalKind },
    /// The backend confirmed the order.
    OrderSubmitted { confirmation: OrderConfirmation },
    /// The submission failed; no store was mutated.
    OrderSubmitFailed { reason: String },
}

impl AppEvent {
    /// The topic this event belongs to.
    pub fn kind(&self) -> EventKind {
        match self {
            AppEvent::PageLoaded => EventKind::PageLoaded,
            AppEvent::ProductClicked { .. } => EventKind::ProductClicked,
            AppEvent::AddToCartRequested { .. } => EventKind::AddToCartRequested,
            AppEvent::RemoveFromCartRequested { .. } => EventKind::RemoveFromCartRequested,
            AppEvent::CartOpenRequested => EventKind::CartOpenRequested,
            AppEvent::CheckoutStarted => EventKind::CheckoutStarted,
            AppEvent::AddressEntered { .. } => EventKind::AddressEntered,
            AppEvent::PaymentMethodChosen { .. } => EventKind::PaymentMethodChosen,
            AppEvent::EmailEntered { .. } => EventKind::EmailEntered,
            AppEvent::PhoneEntered { .. } => EventKind::PhoneEntered,
            AppEvent::NextStepRequested => EventKind::NextStepRequested,
            AppEvent::OrderSubmitRequested => EventKind::OrderSubmitRequested,
            AppEvent::ModalCloseRequested => EventKind::ModalCloseRequested,
            AppEvent::CatalogChanged { .. } => EventKind::CatalogChanged,
            AppEvent::CatalogFetchFailed { .. } => EventKind::CatalogFetchFailed,
            AppEvent::CartChanged { .. } => EventKind::CartChanged,
            AppEvent::CartItemAdded { .. } => EventKind::CartItemAdded,
            AppEvent::CartItemRemoved { .. } => EventKind::CartItemRemoved,
            AppEvent::CartAddRejected { .. } => EventKind::CartAddRejected,
            AppEvent::CartCleared => EventKind::CartCleared,
            AppEvent::OrderFormChanged { .. } => EventKind::OrderFormChanged,
            AppEvent::FieldValidated { .. } => EventKind::FieldValidated,
            AppEvent::ModalOpened { .. } => EventKind::ModalOpened,
            AppEvent::ModalClosed { .. } => EventKind::ModalClosed,
            AppEvent::OrderSubmitted { .. } => EventKind::OrderSubmitted,
            AppEvent::OrderSubmitFailed { .. } => EventKind::OrderSubmitFailed,
        }
    }
}

/// Topic discriminants for [`AppEvent`].
///
/// Subscriptions are keyed by kind so handlers register against a closed
/// vocabulary instead of ad hoc strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PageLoaded,
    ProductClicked,
    AddToCartRequested,
    RemoveFromCartRequested,
    CartOpenRequested,
    CheckoutStarted,
    AddressEntered,
    PaymentMethodChosen,
    EmailEntered,
    PhoneEntered,
    NextStepRequested,
    OrderSubmitRequested,
    ModalCloseRequested,
    CatalogChanged,
    CatalogFetchFailed,
    CartChanged,
    CartItemAdded,
    CartItemRemoved,
    CartAddRejected,
    CartCleared,
    OrderFormChanged,
    FieldValidated,
    ModalOpened,
    ModalClosed,
    OrderSubmitted,
    OrderSubmitFailed,
}

impl EventKind {
    /// Stable topic name, used for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::PageLoaded => "ui:page_loaded",
            EventKind::ProductClicked => "ui:product_clicked",
            EventKind::AddToCartRequested => "ui:add_to_cart",
            EventKind::RemoveFromCartRequested => "ui:remove_from_cart",
            EventKind::CartOpenRequested => "ui:open_cart",
            EventKind::CheckoutStarted => "ui:start_checkout",
            EventKind::AddressEntered => "ui:address_changed",
            EventKind::PaymentMethodChosen => "ui:payment_chosen",
            EventKind::EmailEntered => "ui:email_changed",
            EventKind::PhoneEntered => "ui:phone_changed",
            EventKind::NextStepRequested => "ui:next_step",
            EventKind::OrderSubmitRequested => "ui:submit_order",
            EventKind::ModalCloseRequested => "ui:close_modal",
            EventKind::CatalogChanged => "catalog:changed",
            EventKind::CatalogFetchFailed => "catalog:fetch_failed",
            EventKind::CartChanged => "cart:changed",
            EventKind::CartItemAdded => "cart:item_added",
            EventKind::CartItemRemoved => "cart:item_removed",
            EventKind::CartAddRejected => "cart:add_rejected",
            EventKind::CartCleared => "cart:cleared",
            EventKind::OrderFormChanged => "order_form:changed",
            EventKind::FieldValidated => "order_form:field_validated",
            EventKind::ModalOpened => "modal:opened",
            EventKind::ModalClosed => "modal:closed",
            EventKind::OrderSubmitted => "order:submitted",
            EventKind::OrderSubmitFailed => "order:submit_failed",
        }
    }
}
