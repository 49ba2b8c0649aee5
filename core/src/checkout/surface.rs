// kiosk/src/checkout/surface.rs

//! What the checkout asks presentation surfaces to show, and the `Presenter`
//! seam through which a rendering layer attaches to the broker.

use rust_decimal::Decimal;
use std::sync::Arc;

use crate::broker::{ShopBroker, ShopEvent, Subscription, Topic};
use crate::forms::{ContactInfo, DeliveryInfo};
use crate::model::{Item, OrderConfirmation};
use crate::store::BasketSnapshot;

/// One basket row. `position` is 1-based, as displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct BasketLine {
  pub position: usize,
  pub item: Item,
}

/// The content of the single modal overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
  Preview { item: Item, can_add: bool },
  Basket { lines: Vec<BasketLine>, total: Decimal, can_submit: bool },
  Delivery { info: DeliveryInfo, can_submit: bool },
  Contacts { info: ContactInfo, can_submit: bool },
  Confirmation(OrderConfirmation),
}

impl Surface {
  pub fn basket(snapshot: &BasketSnapshot) -> Self {
    let lines = snapshot
      .items
      .iter()
      .enumerate()
      .map(|(idx, item)| BasketLine {
        position: idx + 1,
        item: item.clone(),
      })
      .collect();
    Surface::Basket {
      lines,
      total: snapshot.total,
      can_submit: snapshot.count > 0,
    }
  }

  /// State of the primary button, if the surface has one that can be disabled.
  pub fn can_submit(&self) -> Option<bool> {
    match self {
      Surface::Preview { can_add, .. } => Some(*can_add),
      Surface::Basket { can_submit, .. }
      | Surface::Delivery { can_submit, .. }
      | Surface::Contacts { can_submit, .. } => Some(*can_submit),
      Surface::Confirmation(_) => None,
    }
  }
}

/// A rendering layer. Every method except `show` defaults to doing nothing.
pub trait Presenter: Send + Sync + 'static {
  /// Replace the overlay content with `surface`.
  fn show(&self, surface: &Surface);

  fn close(&self) {}

  fn submit_enabled(&self, _enabled: bool) {}

  fn page_locked(&self, _locked: bool) {}

  fn catalog(&self, _items: &[Item]) {}

  /// Header counter of the page shell.
  fn basket_counter(&self, _count: usize) {}

  /// A user-visible failure (catalog unavailable, order rejected).
  fn notice(&self, _message: &str) {}
}

/// Subscribes `presenter` to every render topic. Dropping the returned
/// subscriptions detaches it.
pub fn attach_presenter<P: Presenter>(broker: &Arc<ShopBroker>, presenter: Arc<P>) -> Vec<Subscription<ShopEvent>> {
  const RENDER_TOPICS: [Topic; 8] = [
    Topic::CatalogChanged,
    Topic::CatalogUnavailable,
    Topic::BasketChanged,
    Topic::SurfaceShown,
    Topic::SurfaceClosed,
    Topic::SubmitToggled,
    Topic::PageLocked,
    Topic::CheckoutFailed,
  ];

  RENDER_TOPICS
    .iter()
    .map(|topic| {
      let presenter = Arc::clone(&presenter);
      broker.subscribe_scoped(*topic, move |event: &ShopEvent| match event {
        ShopEvent::CatalogChanged(items) => presenter.catalog(items),
        ShopEvent::CatalogUnavailable { reason } => presenter.notice(reason),
        ShopEvent::BasketChanged(snapshot) => presenter.basket_counter(snapshot.count),
        ShopEvent::SurfaceShown(surface) => presenter.show(surface),
        ShopEvent::SurfaceClosed => presenter.close(),
        ShopEvent::SubmitToggled { enabled } => presenter.submit_enabled(*enabled),
        ShopEvent::PageLocked(locked) => presenter.page_locked(*locked),
        ShopEvent::CheckoutFailed { message } => presenter.notice(message),
        _ => {}
      })
    })
    .collect()
}
