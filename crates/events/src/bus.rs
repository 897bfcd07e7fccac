//! Event publishing/subscription (mechanics only).
//!
//! The bus fans out domain change notifications to consumers that need to
//! refresh derived state (dashboards, notification counters) without the
//! producers holding references to them.
//!
//! Design constraints:
//!
//! - **No singleton**: a bus is constructed explicitly and cloned into
//!   whoever needs it (cheap handle over shared state).
//! - **Closed event union**: the bus is generic over [`Message`], whose
//!   associated `Topic` is a small `Copy` enum. There are no string-keyed
//!   topics to drift.
//! - **Synchronous dispatch**: `publish` runs every handler to completion on
//!   the calling thread before returning. A handler that itself publishes
//!   dispatches the nested event fully before the outer publish resumes.
//! - **Isolated failures**: a failing handler is logged and skipped; it never
//!   aborts sibling handlers or surfaces to the publisher.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, Weak};

/// A bus-routable message with a closed set of topics.
///
/// `Topic` is the routing key: subscribers register per topic and only see
/// messages whose [`Message::topic`] matches.
pub trait Message: Clone + core::fmt::Debug + Send + Sync + 'static {
    type Topic: Copy + Eq + Hash + core::fmt::Debug + Send + Sync + 'static;

    fn topic(&self) -> Self::Topic;
}

/// Identifies one registration on a bus.
///
/// The same handler function subscribed twice yields two distinct ids, and
/// both registrations fire independently.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Handler<M> = Arc<dyn Fn(&M) -> anyhow::Result<()> + Send + Sync>;

struct Registration<M> {
    id: SubscriberId,
    handler: Handler<M>,
}

impl<M> Clone for Registration<M> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            handler: Arc::clone(&self.handler),
        }
    }
}

struct Registry<M: Message> {
    next_id: u64,
    topics: HashMap<M::Topic, Vec<Registration<M>>>,
}

impl<M: Message> Registry<M> {
    fn new() -> Self {
        Self {
            next_id: 0,
            topics: HashMap::new(),
        }
    }
}

/// Synchronous in-process pub/sub bus.
///
/// Cloning produces another handle to the same registry, so a bus can be
/// handed to producers and consumers alike.
pub struct EventBus<M: Message> {
    registry: Arc<Mutex<Registry<M>>>,
}

impl<M: Message> Clone for EventBus<M> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<M: Message> Default for EventBus<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Message> core::fmt::Debug for EventBus<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventBus").finish_non_exhaustive()
    }
}

impl<M: Message> EventBus<M> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry::new())),
        }
    }

    /// Register `handler` for `topic`.
    ///
    /// Handlers for a topic are delivered in registration order. The returned
    /// [`Subscription`] is the capability to remove exactly this
    /// registration; dropping it without calling [`Subscription::cancel`]
    /// leaves the handler subscribed.
    pub fn subscribe<F>(&self, topic: M::Topic, handler: F) -> Subscription<M>
    where
        F: Fn(&M) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let mut registry = self.lock();
        let id = SubscriberId(registry.next_id);
        registry.next_id += 1;
        registry.topics.entry(topic).or_default().push(Registration {
            id,
            handler: Arc::new(handler),
        });

        Subscription {
            registry: Arc::downgrade(&self.registry),
            topic,
            id,
        }
    }

    /// Remove the registration `id` from `topic`.
    ///
    /// Unknown topic or id is a no-op. Removing the last handler of a topic
    /// drops the topic entry entirely so the registry does not accumulate
    /// stale keys.
    pub fn unsubscribe(&self, topic: M::Topic, id: SubscriberId) {
        let mut registry = self.lock();
        if let Some(handlers) = registry.topics.get_mut(&topic) {
            handlers.retain(|r| r.id != id);
            if handlers.is_empty() {
                registry.topics.remove(&topic);
            }
        }
    }

    /// Deliver `message` to every handler currently registered for its topic.
    ///
    /// Delivery is synchronous and in registration order, against a snapshot
    /// of the registrations taken at the start of the call: handlers added or
    /// removed by a running handler take effect for the *next* publish.
    ///
    /// Zero subscribers is a no-op. A handler error is logged per handler and
    /// never propagates to the caller.
    pub fn publish(&self, message: &M) {
        let topic = message.topic();
        let snapshot: Vec<Registration<M>> = {
            let registry = self.lock();
            registry.topics.get(&topic).cloned().unwrap_or_default()
        };

        for registration in snapshot {
            if let Err(error) = (registration.handler)(message) {
                tracing::error!(
                    ?topic,
                    subscriber = registration.id.0,
                    %error,
                    "event handler failed"
                );
            }
        }
    }

    /// Number of live registrations for `topic`.
    pub fn subscriber_count(&self, topic: M::Topic) -> usize {
        self.lock().topics.get(&topic).map_or(0, Vec::len)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Registry<M>> {
        // Handlers run outside the lock, so the only way to poison it is a
        // panic inside the registry bookkeeping itself.
        self.registry
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Capability to remove one registration from the bus.
#[derive(Debug)]
pub struct Subscription<M: Message> {
    registry: Weak<Mutex<Registry<M>>>,
    topic: M::Topic,
    id: SubscriberId,
}

impl<M: Message> Subscription<M> {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    pub fn topic(&self) -> M::Topic {
        self.topic
    }

    /// Remove the registration. No-op if the bus is gone or the handler was
    /// already unsubscribed.
    pub fn cancel(self) {
        if let Some(registry) = self.registry.upgrade() {
            let bus = EventBus { registry };
            bus.unsubscribe(self.topic, self.id);
        }
    }
}
