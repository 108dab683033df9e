//! Wire types for the order endpoint.

use serde::{Deserialize, Serialize};

use crate::ids::{OrderId, ProductId};
use crate::order::PaymentMethod;
use crate::price::Price;

/// Request body for order submission: the form fields plus the cart's
/// membership and total captured at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub payment: PaymentMethod,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub total: Price,
    pub items: Vec<ProductId>,
}

/// Successful order response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    #[serde(rename = "orderId")]
    pub order_id: OrderId,
    pub total: Price,
}
