//! Backend API boundary and service glue for the storefront.
//!
//! The core stores in `shopfront-core` are synchronous and I/O-free;
//! this crate supplies everything that touches the network:
//!
//! - **Client**: the [`ShopApi`] contract and its `reqwest`-backed
//!   implementation
//! - **Services**: catalog fetch (with a stale-response guard) and
//!   order submission, both translating failures into bus events
//! - **App**: [`Storefront`], which constructs and wires the whole
//!   state layer once at startup

mod app;
mod client;
mod http;
mod services;

pub use app::{ServiceCommand, Storefront};
pub use client::{ApiError, ShopApi};
pub use http::HttpShopApi;
pub use services::{CatalogFetchService, OrderSubmitService};
