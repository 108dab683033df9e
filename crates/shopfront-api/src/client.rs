//! Backend API contract.

use async_trait::async_trait;
use thiserror::Error;

use shopfront_core::catalog::Product;
use shopfront_core::order::{OrderConfirmation, OrderRequest};

/// Errors surfaced by the API boundary.
///
/// These never cross the event bus as errors: the services translate
/// them into failure events carrying a human-readable reason.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// The two operations the storefront core depends on.
#[async_trait]
pub trait ShopApi: Send + Sync {
    /// Fetch the full product catalog.
    async fn fetch_catalog(&self) -> Result<Vec<Product>, ApiError>;

    /// Submit an order; success means the backend confirmed it.
    async fn submit_order(&self, request: &OrderRequest) -> Result<OrderConfirmation, ApiError>;
}
