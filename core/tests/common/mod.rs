// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use kiosk::{
  BasketSnapshot, Item, ItemId, KioskConfig, Presenter, ScriptedGateway, ShopBroker, ShopEvent, Storefront,
  Subscription, Surface, Topic,
};
use kiosk::Event;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tracing::Level;

// --- Item fixtures ---
pub fn item(id: &str, price: Option<Decimal>) -> Item {
  Item {
    id: ItemId::new(id),
    title: format!("Item {}", id),
    description: String::new(),
    image_ref: format!("/{}.svg", id.to_lowercase()),
    category: "other".to_string(),
    price,
  }
}

pub fn item_a() -> Item {
  item("A", Some(dec!(100)))
}

pub fn item_b() -> Item {
  item("B", Some(dec!(200)))
}

pub fn priceless() -> Item {
  item("P", None)
}

pub fn sample_catalog() -> Vec<Item> {
  vec![item_a(), item_b(), priceless()]
}

/// Local configuration without touching the environment.
pub fn test_config() -> KioskConfig {
  KioskConfig::default()
}

pub fn storefront_with(gateway: Arc<ScriptedGateway>) -> Storefront {
  Storefront::new(&test_config(), gateway)
}

// --- Event recorder ---

/// Records every event published on a broker, in publication order of the
/// recorder's own invocations.
pub struct EventLog {
  events: Arc<Mutex<Vec<ShopEvent>>>,
  _subscription: Subscription<ShopEvent>,
}

impl EventLog {
  pub fn attach(broker: &Arc<ShopBroker>) -> Self {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let subscription = broker.subscribe_all_scoped(move |event: &ShopEvent| sink.lock().push(event.clone()));
    Self {
      events,
      _subscription: subscription,
    }
  }

  pub fn all(&self) -> Vec<ShopEvent> {
    self.events.lock().clone()
  }

  pub fn of_topic(&self, topic: Topic) -> Vec<ShopEvent> {
    self.events.lock().iter().filter(|e| e.topic() == topic).cloned().collect()
  }

  pub fn count(&self, topic: Topic) -> usize {
    self.of_topic(topic).len()
  }

  pub fn surfaces(&self) -> Vec<Surface> {
    self
      .events
      .lock()
      .iter()
      .filter_map(|e| match e {
        ShopEvent::SurfaceShown(surface) => Some(surface.clone()),
        _ => None,
      })
      .collect()
  }

  pub fn last_surface(&self) -> Option<Surface> {
    self.surfaces().pop()
  }

  pub fn submit_toggles(&self) -> Vec<bool> {
    self
      .events
      .lock()
      .iter()
      .filter_map(|e| match e {
        ShopEvent::SubmitToggled { enabled } => Some(*enabled),
        _ => None,
      })
      .collect()
  }

  pub fn basket_snapshots(&self) -> Vec<BasketSnapshot> {
    self
      .events
      .lock()
      .iter()
      .filter_map(|e| match e {
        ShopEvent::BasketChanged(snapshot) => Some(snapshot.clone()),
        _ => None,
      })
      .collect()
  }

  pub fn failures(&self) -> Vec<String> {
    self
      .events
      .lock()
      .iter()
      .filter_map(|e| match e {
        ShopEvent::CheckoutFailed { message } => Some(message.clone()),
        _ => None,
      })
      .collect()
  }

  pub fn clear(&self) {
    self.events.lock().clear();
  }
}

// --- Recording presenter ---
#[derive(Debug, Default)]
pub struct RecordingPresenter {
  pub shown: Mutex<Vec<Surface>>,
  pub closed: Mutex<usize>,
  pub locked: Mutex<Vec<bool>>,
  pub counter: Mutex<Option<usize>>,
  pub notices: Mutex<Vec<String>>,
  pub catalog_sizes: Mutex<Vec<usize>>,
}

impl Presenter for RecordingPresenter {
  fn show(&self, surface: &Surface) {
    self.shown.lock().push(surface.clone());
  }

  fn close(&self) {
    *self.closed.lock() += 1;
  }

  fn page_locked(&self, locked: bool) {
    self.locked.lock().push(locked);
  }

  fn catalog(&self, items: &[Item]) {
    self.catalog_sizes.lock().push(items.len());
  }

  fn basket_counter(&self, count: usize) {
    *self.counter.lock() = Some(count);
  }

  fn notice(&self, message: &str) {
    self.notices.lock().push(message.to_string());
  }
}

/// Every topic, for comparing subscriber counts.
pub const ALL_TOPICS: [Topic; 20] = [
  Topic::CatalogChanged,
  Topic::CatalogUnavailable,
  Topic::BasketChanged,
  Topic::ItemSelected,
  Topic::AddToBasket,
  Topic::RemoveFromBasket,
  Topic::OpenBasket,
  Topic::ProceedToDelivery,
  Topic::DeliveryEdited,
  Topic::ConfirmDelivery,
  Topic::ContactsEdited,
  Topic::ConfirmContacts,
  Topic::CloseSurface,
  Topic::AcknowledgeOrder,
  Topic::SurfaceShown,
  Topic::SurfaceClosed,
  Topic::SubmitToggled,
  Topic::PageLocked,
  Topic::OrderSubmitting,
  Topic::CheckoutFailed,
];

pub fn subscriber_counts(broker: &ShopBroker) -> Vec<usize> {
  ALL_TOPICS.iter().map(|topic| broker.subscriber_count(*topic)).collect()
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
