//! Order form store.
//!
//! Holds the in-progress checkout fields. Every field change triggers a
//! full revalidation pass, so views always render the current aggregate
//! validity instead of a stale one.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::events::{AppEvent, EventBus, EventKind};
use crate::order::validate;

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Online,
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Online => "online",
            PaymentMethod::Cash => "cash",
        }
    }
}

/// The four required checkout fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderField {
    Address,
    Payment,
    Email,
    Phone,
}

impl OrderField {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderField::Address => "address",
            OrderField::Payment => "payment",
            OrderField::Email => "email",
            OrderField::Phone => "phone",
        }
    }
}

/// A field-tagged validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: OrderField,
    pub message: String,
}

impl FieldError {
    pub fn new(field: OrderField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Immutable snapshot of the form, carried on every form-changed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFormSnapshot {
    pub payment: Option<PaymentMethod>,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub is_valid: bool,
    pub errors: Vec<FieldError>,
}

impl OrderFormSnapshot {
    fn empty() -> Self {
        let verdict = validate::validate(None, "", "", "");
        Self {
            payment: None,
            address: String::new(),
            email: String::new(),
            phone: String::new(),
            is_valid: verdict.is_valid,
            errors: verdict.errors,
        }
    }

    /// The current error for one field, if any.
    pub fn error_for(&self, field: OrderField) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }
}

/// The order form store.
pub struct OrderFormStore {
    bus: Arc<EventBus>,
    state: Mutex<OrderFormSnapshot>,
}

impl OrderFormStore {
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self {
            bus,
            state: Mutex::new(OrderFormSnapshot::empty()),
        }
    }

    /// Subscribe this store's intent handlers on its bus.
    pub fn attach(self: &Arc<Self>) {
        let store = Arc::clone(self);
        self.bus.subscribe(EventKind::AddressEntered, move |event| {
            if let AppEvent::AddressEntered { value } = event {
                store.set_address(value);
            }
        });

        let store = Arc::clone(self);
        self.bus
            .subscribe(EventKind::PaymentMethodChosen, move |event| {
                if let AppEvent::PaymentMethodChosen { method } = event {
                    store.set_payment_method(*method);
                }
            });

        let store = Arc::clone(self);
        self.bus.subscribe(EventKind::EmailEntered, move |event| {
            if let AppEvent::EmailEntered { value } = event {
                store.set_email(value);
            }
        });

        let store = Arc::clone(self);
        self.bus.subscribe(EventKind::PhoneEntered, move |event| {
            if let AppEvent::PhoneEntered { value } = event {
                store.set_phone(value);
            }
        });

        // A confirmed order restarts checkout from a clean form.
        let store = Arc::clone(self);
        self.bus.subscribe(EventKind::OrderSubmitted, move |_| {
            store.reset();
        });
    }

    pub fn set_address(&self, value: &str) {
        self.update(OrderField::Address, |state| {
            state.address = value.to_string();
        });
    }

    pub fn set_payment_method(&self, method: PaymentMethod) {
        self.update(OrderField::Payment, |state| {
            state.payment = Some(method);
        });
    }

    pub fn set_email(&self, value: &str) {
        self.update(OrderField::Email, |state| {
            state.email = value.to_string();
        });
    }

    pub fn set_phone(&self, value: &str) {
        self.update(OrderField::Phone, |state| {
            state.phone = value.to_string();
        });
    }

    /// Return all fields to empty/unset and republish.
    pub fn reset(&self) {
        let snapshot = {
            let mut state = self.state.lock().unwrap();
            *state = OrderFormSnapshot::empty();
            state.clone()
        };
        self.bus.publish(AppEvent::OrderFormChanged { form: snapshot });
    }

    /// Snapshot of the current form.
    pub fn snapshot(&self) -> OrderFormSnapshot {
        self.state.lock().unwrap().clone()
    }

    fn update(&self, field: OrderField, apply: impl FnOnce(&mut OrderFormSnapshot)) {
        let snapshot = {
            let mut state = self.state.lock().unwrap();
            apply(&mut state);
            let verdict =
                validate::validate(state.payment, &state.address, &state.email, &state.phone);
            state.is_valid = verdict.is_valid;
            state.errors = verdict.errors;
            state.clone()
        };

        // Per-keystroke verdict for the field that changed, then the
        // aggregate snapshot.
        self.bus.publish(AppEvent::FieldValidated {
            field,
            error: snapshot.error_for(field).map(|e| e.message.clone()),
        });
        self.bus.publish(AppEvent::OrderFormChanged { form: snapshot });
    }
}
