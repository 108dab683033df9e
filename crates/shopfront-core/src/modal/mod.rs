//! Overlay coordination module.

mod coordinator;

pub use coordinator::{ModalCoordinator, ModalKind};
