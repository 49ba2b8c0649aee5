// kiosk/src/broker/bus.rs

//! Defines the `EventBroker<E>`, a synchronous publish/subscribe hub generic over
//! a closed event type `E`, and the `Subscription<E>` handle used for listeners
//! whose lifetime is tied to a scope (for example a checkout state).

use parking_lot::Mutex;
use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::{event, instrument, Level};

/// An event that can travel through an [`EventBroker`].
///
/// Every event kind maps to exactly one topic. Subscribers register against a
/// topic and receive the full, statically typed event.
pub trait Event: fmt::Debug + Send + Sync + 'static {
  /// Fieldless key identifying the event kind. Matching is by exact equality.
  type Topic: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static;

  fn topic(&self) -> Self::Topic;
}

/// Type alias for a broker handler.
///
/// Handlers run synchronously inside [`EventBroker::publish`] and may publish
/// further events themselves.
pub type Handler<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Identifies one registration on a broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

struct Subscriber<E: Event> {
  id: SubscriptionId,
  // None listens to every topic.
  filter: Option<E::Topic>,
  handler: Handler<E>,
}

impl<E: Event> Subscriber<E> {
  fn matches(&self, topic: E::Topic) -> bool {
    self.filter.map_or(true, |t| t == topic)
  }
}

/// The publish/subscribe hub.
///
/// - Handlers for a topic run in subscription order; wildcard handlers are
///   interleaved according to when they subscribed.
/// - `publish` dispatches synchronously on the calling thread; nothing is queued.
/// - Each dispatch works on a snapshot of the matching handlers taken when it
///   starts. Handlers added or removed while it runs only affect later dispatches.
///
/// The registry lock is never held while a handler runs, so handlers may
/// subscribe, unsubscribe and publish freely.
pub struct EventBroker<E: Event> {
  subscribers: Mutex<Vec<Subscriber<E>>>,
  next_id: AtomicU64,
}

impl<E: Event> EventBroker<E> {
  pub fn new() -> Self {
    Self {
      subscribers: Mutex::new(Vec::new()),
      next_id: AtomicU64::new(1),
    }
  }

  fn register(&self, filter: Option<E::Topic>, handler: Handler<E>) -> SubscriptionId {
    let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
    self.subscribers.lock().push(Subscriber { id, filter, handler });
    event!(Level::TRACE, ?filter, subscription = id.0, "Handler subscribed.");
    id
  }

  fn remove(&self, filter: Option<E::Topic>, id: SubscriptionId) -> bool {
    let mut guard = self.subscribers.lock();
    match guard.iter().position(|s| s.id == id && s.filter == filter) {
      Some(idx) => {
        guard.remove(idx);
        event!(Level::TRACE, ?filter, subscription = id.0, "Handler unsubscribed.");
        true
      }
      None => false,
    }
  }

  /// Registers `handler` for `topic` until [`unsubscribe`](Self::unsubscribe) is called.
  pub fn subscribe<F>(&self, topic: E::Topic, handler: F) -> SubscriptionId
  where
    F: Fn(&E) + Send + Sync + 'static,
  {
    self.register(Some(topic), Arc::new(handler))
  }

  /// Registers `handler` for every topic.
  pub fn subscribe_all<F>(&self, handler: F) -> SubscriptionId
  where
    F: Fn(&E) + Send + Sync + 'static,
  {
    self.register(None, Arc::new(handler))
  }

  /// Registers `handler` for `topic`; the registration lives as long as the
  /// returned [`Subscription`].
  pub fn subscribe_scoped<F>(self: &Arc<Self>, topic: E::Topic, handler: F) -> Subscription<E>
  where
    F: Fn(&E) + Send + Sync + 'static,
  {
    let id = self.subscribe(topic, handler);
    Subscription {
      broker: Arc::downgrade(self),
      filter: Some(topic),
      id,
    }
  }

  /// Wildcard counterpart of [`subscribe_scoped`](Self::subscribe_scoped).
  pub fn subscribe_all_scoped<F>(self: &Arc<Self>, handler: F) -> Subscription<E>
  where
    F: Fn(&E) + Send + Sync + 'static,
  {
    let id = self.subscribe_all(handler);
    Subscription {
      broker: Arc::downgrade(self),
      filter: None,
      id,
    }
  }

  /// Removes a topic registration. Unknown ids are ignored; returns whether
  /// anything was removed.
  pub fn unsubscribe(&self, topic: E::Topic, id: SubscriptionId) -> bool {
    self.remove(Some(topic), id)
  }

  /// Removes a wildcard registration made with [`subscribe_all`](Self::subscribe_all).
  pub fn unsubscribe_all(&self, id: SubscriptionId) -> bool {
    self.remove(None, id)
  }

  /// Invokes every handler currently subscribed to the event's topic, plus
  /// wildcard handlers, and returns how many ran.
  #[instrument(name = "EventBroker::publish", level = "trace", skip_all, fields(topic = ?event.topic()))]
  pub fn publish(&self, event: E) -> usize {
    let topic = event.topic();
    let snapshot: Vec<Handler<E>> = {
      let guard = self.subscribers.lock();
      guard
        .iter()
        .filter(|s| s.matches(topic))
        .map(|s| Arc::clone(&s.handler))
        .collect()
    };

    if snapshot.is_empty() {
      event!(Level::TRACE, "No handlers for topic.");
      return 0;
    }

    for (handler_idx, handler) in snapshot.iter().enumerate() {
      event!(Level::TRACE, handler_index = handler_idx, "Invoking handler.");
      handler(&event);
    }
    snapshot.len()
  }

  /// Number of handlers registered for exactly `topic` (wildcards excluded).
  pub fn subscriber_count(&self, topic: E::Topic) -> usize {
    self
      .subscribers
      .lock()
      .iter()
      .filter(|s| s.filter == Some(topic))
      .count()
  }

  pub fn wildcard_count(&self) -> usize {
    self.subscribers.lock().iter().filter(|s| s.filter.is_none()).count()
  }

  /// Drops every registration. Outstanding [`Subscription`] handles become inert.
  pub fn clear(&self) {
    self.subscribers.lock().clear();
  }
}

impl<E: Event> Default for EventBroker<E> {
  fn default() -> Self {
    Self::new()
  }
}

impl<E: Event> fmt::Debug for EventBroker<E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("EventBroker")
      .field("subscribers", &self.subscribers.lock().len())
      .finish()
  }
}

/// A registration released when dropped.
///
/// The handle holds the broker weakly: a subscription never keeps a broker alive.
#[must_use = "dropping a Subscription unsubscribes its handler immediately"]
pub struct Subscription<E: Event> {
  broker: Weak<EventBroker<E>>,
  filter: Option<E::Topic>,
  id: SubscriptionId,
}

impl<E: Event> Subscription<E> {
  pub fn id(&self) -> SubscriptionId {
    self.id
  }

  /// `None` for wildcard subscriptions.
  pub fn topic(&self) -> Option<E::Topic> {
    self.filter
  }
}

impl<E: Event> Drop for Subscription<E> {
  fn drop(&mut self) {
    if let Some(broker) = self.broker.upgrade() {
      broker.remove(self.filter, self.id);
    }
  }
}

impl<E: Event> fmt::Debug for Subscription<E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Subscription")
      .field("topic", &self.filter)
      .field("id", &self.id)
      .finish()
  }
}
