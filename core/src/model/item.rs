// kiosk/src/model/item.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
  pub fn new(id: impl Into<String>) -> Self {
    ItemId(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ItemId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for ItemId {
  fn from(value: &str) -> Self {
    ItemId(value.to_string())
  }
}

impl From<String> for ItemId {
  fn from(value: String) -> Self {
    ItemId(value)
  }
}

/// A sellable item as delivered by the catalog endpoint.
///
/// Items are immutable once loaded. A `None` price marks the item as
/// "priceless": it is shown in the catalog but is not purchasable unless the
/// basket runs with [`PricelessPolicy::CountAsZero`](crate::PricelessPolicy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
  pub id: ItemId,
  pub title: String,
  #[serde(default)]
  pub description: String,
  #[serde(rename = "image", default)]
  pub image_ref: String,
  #[serde(default)]
  pub category: String,
  pub price: Option<Decimal>,
}

impl Item {
  pub fn is_priceless(&self) -> bool {
    self.price.is_none()
  }

  /// Contribution of this item to a basket total.
  pub fn price_or_zero(&self) -> Decimal {
    self.price.unwrap_or(Decimal::ZERO)
  }
}
