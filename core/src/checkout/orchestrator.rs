// kiosk/src/checkout/orchestrator.rs

//! Contains `Checkout`, the state machine behind the storefront overlay.
//!
//! Every handler follows the same discipline: decide under the machine lock,
//! collect the events to publish, release the lock, then publish. Store
//! mutations (which publish on their own) also happen after the lock is
//! released, so a nested dispatch can always re-enter the machine.

use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tracing::{event, instrument, Level};

use super::step::CheckoutStep;
use super::surface::Surface;
use crate::broker::{Event, ShopBroker, ShopEvent, Subscription, Topic};
use crate::error::KioskResult;
use crate::forms::{ContactInfo, DeliveryInfo, FormState};
use crate::gateway::StoreGateway;
use crate::model::{ItemId, OrderConfirmation, OrderRequest};
use crate::order::OrderAssembler;
use crate::store::{BasketStore, CatalogStore};

/// Topics the checkout listens to in every step.
const RESIDENT_TOPICS: [Topic; 4] = [Topic::ItemSelected, Topic::AddToBasket, Topic::OpenBasket, Topic::CloseSurface];

struct Machine {
  step: CheckoutStep,
  delivery: FormState<DeliveryInfo>,
  contact: FormState<ContactInfo>,
  // Listeners owned by `step`. Replacing the vector unsubscribes the old ones.
  scope: Vec<Subscription<ShopEvent>>,
  pending: Option<OrderRequest>,
}

impl Machine {
  fn enter(&mut self, inner: &CheckoutInner, next: CheckoutStep) {
    event!(Level::DEBUG, from = %self.step, to = %next, "Checkout transition.");
    self.scope.clear();
    self.step = next;
    self.scope = self
      .step
      .scoped_topics()
      .iter()
      .map(|topic| inner.listen(*topic))
      .collect();
  }

  fn contacts_surface(&self) -> Surface {
    Surface::Contacts {
      info: self.contact.current().clone(),
      can_submit: self.contact.is_valid(),
    }
  }
}

struct CheckoutInner {
  me: Weak<CheckoutInner>,
  broker: Arc<ShopBroker>,
  catalog: Arc<CatalogStore>,
  basket: Arc<BasketStore>,
  gateway: Arc<dyn StoreGateway>,
  machine: Mutex<Machine>,
  resident: Mutex<Vec<Subscription<ShopEvent>>>,
}

/// The checkout orchestrator. Cheap to clone; clones share one machine.
///
/// The order submission is the only asynchronous part: confirming the contact
/// form queues the assembled order and moves to `Submitting`, and
/// [`settle`](Checkout::settle) performs the gateway call and applies the answer.
#[derive(Clone)]
pub struct Checkout {
  inner: Arc<CheckoutInner>,
}

impl Checkout {
  pub fn new(
    broker: Arc<ShopBroker>,
    catalog: Arc<CatalogStore>,
    basket: Arc<BasketStore>,
    gateway: Arc<dyn StoreGateway>,
  ) -> Self {
    let inner = Arc::new_cyclic(|me| CheckoutInner {
      me: me.clone(),
      broker,
      catalog,
      basket,
      gateway,
      machine: Mutex::new(Machine {
        step: CheckoutStep::Browsing,
        delivery: FormState::new(),
        contact: FormState::new(),
        scope: Vec::new(),
        pending: None,
      }),
      resident: Mutex::new(Vec::new()),
    });

    let resident: Vec<_> = RESIDENT_TOPICS.iter().map(|topic| inner.listen(*topic)).collect();
    *inner.resident.lock() = resident;
    event!(Level::DEBUG, "Checkout attached to broker.");

    Self { inner }
  }

  pub fn step(&self) -> CheckoutStep {
    self.inner.machine.lock().step.clone()
  }

  /// Committed delivery details.
  pub fn delivery(&self) -> DeliveryInfo {
    self.inner.machine.lock().delivery.current().clone()
  }

  /// Committed contact details.
  pub fn contact(&self) -> ContactInfo {
    self.inner.machine.lock().contact.current().clone()
  }

  pub fn is_submitting(&self) -> bool {
    self.inner.machine.lock().step == CheckoutStep::Submitting
  }

  /// Submits the queued order, if any, and applies the outcome.
  ///
  /// - `Ok(None)`: nothing was queued.
  /// - `Ok(Some(confirmation))`: the checkout moved to `Confirmed`.
  /// - `Err(e)`: the checkout rolled back to `ContactsOpen` with all entered
  ///   data intact and published `CheckoutFailed`.
  ///
  /// No lock is held while the gateway call is in flight.
  #[instrument(name = "Checkout::settle", skip_all)]
  pub async fn settle(&self) -> KioskResult<Option<OrderConfirmation>> {
    let pending = self.inner.machine.lock().pending.take();
    let order = match pending {
      Some(order) => order,
      None => return Ok(None),
    };

    event!(Level::INFO, total = %order.total, num_items = order.items.len(), "Submitting order.");
    let outcome = self.inner.gateway.submit_order(&order).await;
    self.inner.finish_submission(outcome)
  }
}

impl CheckoutInner {
  fn listen(&self, topic: Topic) -> Subscription<ShopEvent> {
    let me = self.me.clone();
    self.broker.subscribe_scoped(topic, move |event: &ShopEvent| {
      if let Some(inner) = me.upgrade() {
        inner.handle(event);
      }
    })
  }

  fn emit(&self, outbound: Vec<ShopEvent>) {
    for event in outbound {
      self.broker.publish(event);
    }
  }

  fn ignored(&self, event: &ShopEvent, step: &CheckoutStep) {
    event!(Level::DEBUG, topic = ?event.topic(), %step, "Intent not applicable in current step, ignored.");
  }

  fn handle(&self, event: &ShopEvent) {
    match event {
      ShopEvent::ItemSelected(id) => self.select_item(event, id),
      ShopEvent::AddToBasket(id) => self.add_to_basket(event, id),
      ShopEvent::OpenBasket => self.open_basket(event),
      ShopEvent::BasketChanged(snapshot) => {
        let basket_open = self.machine.lock().step == CheckoutStep::BasketOpen;
        if basket_open {
          self.broker.publish(ShopEvent::SurfaceShown(Surface::basket(snapshot)));
        }
      }
      ShopEvent::RemoveFromBasket { position } => self.remove_from_basket(event, *position),
      ShopEvent::ProceedToDelivery => self.proceed_to_delivery(event),
      ShopEvent::DeliveryEdited(candidate) => self.delivery_edited(event, candidate),
      ShopEvent::ConfirmDelivery(candidate) => self.confirm_delivery(event, candidate),
      ShopEvent::ContactsEdited(candidate) => self.contacts_edited(event, candidate),
      ShopEvent::ConfirmContacts(candidate) => self.confirm_contacts(event, candidate),
      ShopEvent::CloseSurface => self.close(event),
      ShopEvent::AcknowledgeOrder => self.acknowledge(event),
      other => event!(Level::TRACE, topic = ?other.topic(), "Not a checkout trigger."),
    }
  }

  fn select_item(&self, event: &ShopEvent, id: &ItemId) {
    let item = match self.catalog.lookup(id) {
      Ok(item) => item,
      Err(e) => {
        event!(Level::WARN, error = %e, "Selected item is not in the catalog.");
        return;
      }
    };

    let outbound = {
      let mut machine = self.machine.lock();
      if !machine.step.is_idle() {
        self.ignored(event, &machine.step);
        return;
      }
      let lock_page = machine.step == CheckoutStep::Browsing;
      machine.enter(self, CheckoutStep::Previewing(id.clone()));

      let mut outbound = Vec::with_capacity(2);
      if lock_page {
        outbound.push(ShopEvent::PageLocked(true));
      }
      outbound.push(ShopEvent::SurfaceShown(Surface::Preview {
        can_add: self.basket.accepts(&item),
        item,
      }));
      outbound
    };
    self.emit(outbound);
  }

  fn add_to_basket(&self, event: &ShopEvent, id: &ItemId) {
    let step = self.machine.lock().step.clone();
    if !step.is_idle() {
      self.ignored(event, &step);
      return;
    }

    let item = match self.catalog.lookup(id) {
      Ok(item) => item,
      Err(e) => {
        event!(Level::WARN, error = %e, "Cannot add an item that is not in the catalog.");
        return;
      }
    };
    let outcome = self.basket.add(item.clone());
    event!(Level::DEBUG, item_id = %id, ?outcome, "Add to basket handled.");

    let previewing = matches!(&self.machine.lock().step, CheckoutStep::Previewing(shown) if shown == id);
    if previewing {
      self.broker.publish(ShopEvent::SurfaceShown(Surface::Preview {
        can_add: self.basket.accepts(&item),
        item,
      }));
    }
  }

  fn open_basket(&self, event: &ShopEvent) {
    let outbound = {
      let mut machine = self.machine.lock();
      if !machine.step.is_idle() {
        self.ignored(event, &machine.step);
        return;
      }
      let lock_page = machine.step == CheckoutStep::Browsing;
      machine.enter(self, CheckoutStep::BasketOpen);

      let mut outbound = Vec::with_capacity(2);
      if lock_page {
        outbound.push(ShopEvent::PageLocked(true));
      }
      outbound.push(ShopEvent::SurfaceShown(Surface::basket(&self.basket.snapshot())));
      outbound
    };
    self.emit(outbound);
  }

  fn remove_from_basket(&self, event: &ShopEvent, position: usize) {
    let step = self.machine.lock().step.clone();
    if step != CheckoutStep::BasketOpen {
      self.ignored(event, &step);
      return;
    }
    // Positions on screen start at 1.
    match position.checked_sub(1) {
      Some(index) => {
        if self.basket.remove_at(index).is_none() {
          event!(Level::DEBUG, position, "No basket line at this position.");
        }
      }
      None => event!(Level::WARN, "Basket positions start at 1, ignoring position 0."),
    }
  }

  fn proceed_to_delivery(&self, event: &ShopEvent) {
    let outbound = {
      let mut machine = self.machine.lock();
      if machine.step != CheckoutStep::BasketOpen {
        self.ignored(event, &machine.step);
        return;
      }
      if self.basket.count() == 0 {
        event!(Level::WARN, "Basket is empty, staying on the basket.");
        return;
      }
      machine.enter(self, CheckoutStep::DeliveryOpen);
      vec![ShopEvent::SurfaceShown(Surface::Delivery {
        info: machine.delivery.current().clone(),
        can_submit: machine.delivery.is_valid(),
      })]
    };
    self.emit(outbound);
  }

  fn delivery_edited(&self, event: &ShopEvent, candidate: &DeliveryInfo) {
    let enabled = {
      let machine = self.machine.lock();
      if machine.step != CheckoutStep::DeliveryOpen {
        self.ignored(event, &machine.step);
        return;
      }
      machine.delivery.validate(candidate)
    };
    self.broker.publish(ShopEvent::SubmitToggled { enabled });
  }

  fn confirm_delivery(&self, event: &ShopEvent, candidate: &DeliveryInfo) {
    let outbound = {
      let mut machine = self.machine.lock();
      if machine.step != CheckoutStep::DeliveryOpen {
        self.ignored(event, &machine.step);
        return;
      }
      if machine.delivery.commit(candidate.clone()) {
        machine.enter(self, CheckoutStep::ContactsOpen);
        vec![ShopEvent::SurfaceShown(machine.contacts_surface())]
      } else {
        event!(Level::DEBUG, "Delivery candidate incomplete, staying on the delivery form.");
        vec![ShopEvent::SubmitToggled { enabled: false }]
      }
    };
    self.emit(outbound);
  }

  fn contacts_edited(&self, event: &ShopEvent, candidate: &ContactInfo) {
    let enabled = {
      let machine = self.machine.lock();
      if machine.step != CheckoutStep::ContactsOpen {
        self.ignored(event, &machine.step);
        return;
      }
      machine.contact.validate(candidate)
    };
    self.broker.publish(ShopEvent::SubmitToggled { enabled });
  }

  fn confirm_contacts(&self, event: &ShopEvent, candidate: &ContactInfo) {
    let outbound = {
      let mut machine = self.machine.lock();
      if machine.step != CheckoutStep::ContactsOpen {
        self.ignored(event, &machine.step);
        return;
      }
      if !machine.contact.commit(candidate.clone()) {
        event!(Level::DEBUG, "Contact candidate incomplete, staying on the contact form.");
        vec![ShopEvent::SubmitToggled { enabled: false }]
      } else {
        let basket = self.basket.snapshot();
        if basket.is_empty() {
          event!(Level::ERROR, "Basket emptied before submission, order not assembled.");
          vec![ShopEvent::CheckoutFailed {
            message: "The basket is empty.".to_string(),
          }]
        } else {
          match OrderAssembler::assemble(&basket, machine.delivery.current(), machine.contact.current()) {
            Ok(order) => {
              machine.pending = Some(order.clone());
              machine.enter(self, CheckoutStep::Submitting);
              vec![
                ShopEvent::SubmitToggled { enabled: false },
                ShopEvent::OrderSubmitting(order),
              ]
            }
            Err(e) => {
              event!(Level::ERROR, error = %e, "Order assembly failed.");
              vec![ShopEvent::CheckoutFailed {
                message: e.user_message(),
              }]
            }
          }
        }
      }
    };
    self.emit(outbound);
  }

  fn finish_submission(&self, outcome: KioskResult<OrderConfirmation>) -> KioskResult<Option<OrderConfirmation>> {
    let (outbound, result) = {
      let mut machine = self.machine.lock();
      match outcome {
        Ok(confirmation) => {
          event!(Level::INFO, order_id = %confirmation.id, total = %confirmation.total, "Order confirmed.");
          machine.enter(self, CheckoutStep::Confirmed(confirmation.clone()));
          (
            vec![ShopEvent::SurfaceShown(Surface::Confirmation(confirmation.clone()))],
            Ok(Some(confirmation)),
          )
        }
        Err(e) => {
          event!(Level::ERROR, error = %e, "Order submission failed, returning to the contact form.");
          machine.enter(self, CheckoutStep::ContactsOpen);
          (
            vec![
              ShopEvent::SurfaceShown(machine.contacts_surface()),
              ShopEvent::CheckoutFailed {
                message: e.user_message(),
              },
            ],
            Err(e),
          )
        }
      }
    };
    self.emit(outbound);
    result
  }

  fn close(&self, event: &ShopEvent) {
    let outbound = {
      let mut machine = self.machine.lock();
      let step = machine.step.clone();
      match step {
        CheckoutStep::Browsing => return,
        CheckoutStep::Submitting => {
          event!(Level::WARN, "Close ignored while an order is being submitted.");
          return;
        }
        CheckoutStep::Confirmed(_) => {
          drop(machine);
          self.acknowledge(event);
          return;
        }
        CheckoutStep::Previewing(_) | CheckoutStep::BasketOpen => {}
        CheckoutStep::DeliveryOpen => machine.delivery.clear(),
        CheckoutStep::ContactsOpen => {
          machine.delivery.clear();
          machine.contact.clear();
        }
      }
      machine.enter(self, CheckoutStep::Browsing);
      vec![ShopEvent::SurfaceClosed, ShopEvent::PageLocked(false)]
    };
    self.emit(outbound);
  }

  /// Ends a completed cycle: the ordered items leave the basket and the forms
  /// are reset.
  fn acknowledge(&self, event: &ShopEvent) {
    {
      let mut machine = self.machine.lock();
      if !matches!(machine.step, CheckoutStep::Confirmed(_)) {
        self.ignored(event, &machine.step);
        return;
      }
      machine.delivery.clear();
      machine.contact.clear();
      machine.enter(self, CheckoutStep::Browsing);
    }
    self.basket.clear();
    self.emit(vec![ShopEvent::SurfaceClosed, ShopEvent::PageLocked(false)]);
  }
}
