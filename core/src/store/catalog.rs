// kiosk/src/store/catalog.rs

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{event, instrument, Level};

use crate::broker::{ShopBroker, ShopEvent};
use crate::error::{KioskError, KioskResult};
use crate::model::{Item, ItemId};

/// Holds the sellable items. The collection is only ever replaced wholesale.
#[derive(Debug)]
pub struct CatalogStore {
  items: RwLock<Vec<Item>>,
  broker: Arc<ShopBroker>,
}

impl CatalogStore {
  pub fn new(broker: Arc<ShopBroker>) -> Self {
    Self {
      items: RwLock::new(Vec::new()),
      broker,
    }
  }

  /// Replaces the collection and publishes `CatalogChanged`.
  #[instrument(name = "CatalogStore::load", skip_all, fields(num_items = items.len()))]
  pub fn load(&self, items: Vec<Item>) {
    let published = items.clone();
    *self.items.write() = items;
    event!(Level::DEBUG, "Catalog replaced.");
    self.broker.publish(ShopEvent::CatalogChanged(published));
  }

  pub fn lookup(&self, id: &ItemId) -> KioskResult<Item> {
    self
      .items
      .read()
      .iter()
      .find(|item| &item.id == id)
      .cloned()
      .ok_or_else(|| KioskError::NotFound { id: id.clone() })
  }

  /// Empties the collection and publishes an empty `CatalogChanged`.
  pub fn clear(&self) {
    self.items.write().clear();
    event!(Level::DEBUG, "Catalog cleared.");
    self.broker.publish(ShopEvent::CatalogChanged(Vec::new()));
  }

  pub fn items(&self) -> Vec<Item> {
    self.items.read().clone()
  }

  pub fn len(&self) -> usize {
    self.items.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.read().is_empty()
  }
}
