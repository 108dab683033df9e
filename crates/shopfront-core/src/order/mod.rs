//! Checkout order module.
//!
//! Contains the in-progress order form store, field validation, and the
//! wire types exchanged with the order endpoint.

mod form;
mod request;
mod validate;

pub use form::{FieldError, OrderField, OrderFormSnapshot, OrderFormStore, PaymentMethod};
pub use request::{OrderConfirmation, OrderRequest};
