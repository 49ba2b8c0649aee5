// kiosk/src/store/basket.rs

use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{event, instrument, Level};

use crate::broker::{ShopBroker, ShopEvent};
use crate::model::{Item, ItemId};

/// Whether an item without a price may enter the basket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PricelessPolicy {
  /// Priceless items are refused by [`BasketStore::add`].
  #[default]
  Reject,
  /// Priceless items are accepted and contribute zero to the total.
  CountAsZero,
}

/// Result of [`BasketStore::add`]. Only `Added` changes state and publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
  Added,
  AlreadyPresent,
  Priceless,
}

/// Immutable view of the basket, carried by `BasketChanged`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BasketSnapshot {
  pub items: Vec<Item>,
  pub count: usize,
  pub total: Decimal,
}

impl BasketSnapshot {
  fn of(items: &[Item]) -> Self {
    Self {
      items: items.to_vec(),
      count: items.len(),
      total: items.iter().map(Item::price_or_zero).sum(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.count == 0
  }

  pub fn item_ids(&self) -> Vec<ItemId> {
    self.items.iter().map(|item| item.id.clone()).collect()
  }
}

/// The shopper's selection: an insertion-ordered set of items keyed by id.
#[derive(Debug)]
pub struct BasketStore {
  items: RwLock<Vec<Item>>,
  policy: PricelessPolicy,
  broker: Arc<ShopBroker>,
}

impl BasketStore {
  pub fn new(broker: Arc<ShopBroker>, policy: PricelessPolicy) -> Self {
    Self {
      items: RwLock::new(Vec::new()),
      policy,
      broker,
    }
  }

  pub fn policy(&self) -> PricelessPolicy {
    self.policy
  }

  #[instrument(name = "BasketStore::add", skip_all, fields(item_id = %item.id))]
  pub fn add(&self, item: Item) -> AddOutcome {
    let snapshot = {
      let mut guard = self.items.write();
      if guard.iter().any(|present| present.id == item.id) {
        event!(Level::DEBUG, "Item already in basket, ignoring.");
        return AddOutcome::AlreadyPresent;
      }
      if item.is_priceless() && self.policy == PricelessPolicy::Reject {
        event!(Level::WARN, "Priceless item refused by basket policy.");
        return AddOutcome::Priceless;
      }
      guard.push(item);
      BasketSnapshot::of(&guard)
    };
    event!(Level::DEBUG, count = snapshot.count, total = %snapshot.total, "Item added.");
    self.broker.publish(ShopEvent::BasketChanged(snapshot));
    AddOutcome::Added
  }

  pub fn is_present(&self, id: &ItemId) -> bool {
    self.items.read().iter().any(|item| &item.id == id)
  }

  /// Whether `add(item)` would succeed right now.
  pub fn accepts(&self, item: &Item) -> bool {
    let policy_allows = !item.is_priceless() || self.policy == PricelessPolicy::CountAsZero;
    policy_allows && !self.is_present(&item.id)
  }

  /// Removes the element at the 0-based `index`.
  ///
  /// An out-of-range index is a no-op: nothing is published and `None` is returned.
  #[instrument(name = "BasketStore::remove_at", skip(self))]
  pub fn remove_at(&self, index: usize) -> Option<Item> {
    let (removed, snapshot) = {
      let mut guard = self.items.write();
      if index >= guard.len() {
        event!(Level::DEBUG, len = guard.len(), "Index out of range, nothing removed.");
        return None;
      }
      let removed = guard.remove(index);
      (removed, BasketSnapshot::of(&guard))
    };
    event!(Level::DEBUG, item_id = %removed.id, count = snapshot.count, "Item removed.");
    self.broker.publish(ShopEvent::BasketChanged(snapshot));
    Some(removed)
  }

  /// Empties the basket. Always publishes, even when it was already empty.
  pub fn clear(&self) {
    self.items.write().clear();
    event!(Level::DEBUG, "Basket cleared.");
    self.broker.publish(ShopEvent::BasketChanged(BasketSnapshot::default()));
  }

  pub fn count(&self) -> usize {
    self.items.read().len()
  }

  /// Sum of prices; a priceless item contributes zero.
  pub fn total(&self) -> Decimal {
    self.items.read().iter().map(Item::price_or_zero).sum()
  }

  pub fn snapshot(&self) -> BasketSnapshot {
    BasketSnapshot::of(&self.items.read())
  }
}
