//! Event coordination module.
//!
//! Contains the closed application event vocabulary and the synchronous
//! publish/subscribe bus every other component communicates through.

mod bus;
mod event;

pub use bus::{EventBus, Subscription};
pub use event::{AppEvent, EventKind};
