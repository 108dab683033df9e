//! Shopping cart module.

mod store;

pub use store::{CartReader, CartRejection, CartStore, CartWriter};
