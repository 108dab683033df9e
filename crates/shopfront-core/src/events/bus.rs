//! Synchronous publish/subscribe bus.
//!
//! Dispatch rules:
//! - handlers for a topic run in registration order;
//! - wildcard handlers run after the topic's own handlers, also in
//!   registration order;
//! - publishing with no subscribers is a no-op;
//! - a handler may publish further events; the nested publish runs to
//!   completion before the outer publish resumes its remaining handlers.
//!
//! The registry lock is never held while handlers run, which is what
//! makes re-entrant publish and subscribe-from-a-handler safe.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::events::{AppEvent, EventKind};

type Handler = Arc<dyn Fn(&AppEvent) + Send + Sync + 'static>;

/// Token returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    id: u64,
    kind: Option<EventKind>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    by_kind: HashMap<EventKind, Vec<(u64, Handler)>>,
    wildcard: Vec<(u64, Handler)>,
}

/// The application event bus.
pub struct EventBus {
    registry: Mutex<Registry>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Registry::default()),
        }
    }

    /// Register a handler for one topic.
    pub fn subscribe<F>(&self, kind: EventKind, handler: F) -> Subscription
    where
        F: Fn(&AppEvent) + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock().unwrap();
        let id = registry.next_id;
        registry.next_id += 1;
        registry
            .by_kind
            .entry(kind)
            .or_default()
            .push((id, Arc::new(handler)));
        Subscription {
            id,
            kind: Some(kind),
        }
    }

    /// Register a handler that receives every event, after the topic's
    /// own handlers. Used for diagnostics and test recording.
    pub fn subscribe_any<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&AppEvent) + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock().unwrap();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.wildcard.push((id, Arc::new(handler)));
        Subscription { id, kind: None }
    }

    /// Remove a registration. Removing the last handler for a topic
    /// frees the topic's bucket. Unknown tokens are ignored.
    pub fn unsubscribe(&self, subscription: Subscription) {
        let mut registry = self.registry.lock().unwrap();
        match subscription.kind {
            Some(kind) => {
                if let Some(handlers) = registry.by_kind.get_mut(&kind) {
                    handlers.retain(|(id, _)| *id != subscription.id);
                    if handlers.is_empty() {
                        registry.by_kind.remove(&kind);
                    }
                }
            }
            None => registry.wildcard.retain(|(id, _)| *id != subscription.id),
        }
    }

    /// Synchronously deliver an event to every matching handler.
    ///
    /// The handler list is snapshotted up front: handlers added or
    /// removed during dispatch take effect from the next publish.
    pub fn publish(&self, event: AppEvent) {
        let handlers: Vec<Handler> = {
            let registry = self.registry.lock().unwrap();
            let topic = registry
                .by_kind
                .get(&event.kind())
                .into_iter()
                .flatten()
                .map(|(_, h)| Arc::clone(h));
            let wildcard = registry.wildcard.iter().map(|(_, h)| Arc::clone(h));
            topic.chain(wildcard).collect()
        };

        debug!(
            topic = event.kind().as_str(),
            subscribers = handlers.len(),
            "publish"
        );

        for handler in handlers {
            handler(&event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
