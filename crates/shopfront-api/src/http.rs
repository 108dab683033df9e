//! HTTP implementation of the backend contract.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use shopfront_core::catalog::Product;
use shopfront_core::order::{OrderConfirmation, OrderRequest};

use crate::client::{ApiError, ShopApi};

/// Product list envelope returned by the catalog endpoint.
#[derive(Debug, Deserialize)]
struct ProductListResponse {
    #[allow(dead_code)]
    total: u64,
    items: Vec<Product>,
}

/// Error body the backend attaches to non-success responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// `reqwest`-backed API client.
pub struct HttpShopApi {
    client: reqwest::Client,
    base: Url,
}

impl HttpShopApi {
    /// Create a client against the given API origin.
    pub fn new(base: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base,
        }
    }

    /// Create a client with a preconfigured `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::Transport(e.to_string()))
    }
}

#[async_trait]
impl ShopApi for HttpShopApi {
    async fn fetch_catalog(&self) -> Result<Vec<Product>, ApiError> {
        let response = self
            .client
            .get(self.endpoint("product")?)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let list: ProductListResponse = read_json(response).await?;
        Ok(list.items)
    }

    async fn submit_order(&self, request: &OrderRequest) -> Result<OrderConfirmation, ApiError> {
        let response = self
            .client
            .post(self.endpoint("order")?)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        read_json(response).await
    }
}

/// Decode a success body, or surface the backend's error message for a
/// non-success status.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };
        return Err(ApiError::Http {
            status: status.as_u16(),
            message,
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
