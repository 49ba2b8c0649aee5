// kiosk/src/checkout/step.rs

//! Defines the checkout steps and which events each step listens to.

use std::fmt;

use crate::broker::Topic;
use crate::model::{ItemId, OrderConfirmation};

/// Where the shopper is in the checkout flow.
///
/// `Browsing` is the resting state. Exactly one surface is visible in every
/// other step.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutStep {
  Browsing,
  /// Product preview for one catalog item.
  Previewing(ItemId),
  BasketOpen,
  DeliveryOpen,
  ContactsOpen,
  /// An order is queued or in flight. Close and confirm intents are ignored.
  Submitting,
  Confirmed(OrderConfirmation),
}

impl CheckoutStep {
  pub fn name(&self) -> &'static str {
    match self {
      CheckoutStep::Browsing => "browsing",
      CheckoutStep::Previewing(_) => "previewing",
      CheckoutStep::BasketOpen => "basket",
      CheckoutStep::DeliveryOpen => "delivery",
      CheckoutStep::ContactsOpen => "contacts",
      CheckoutStep::Submitting => "submitting",
      CheckoutStep::Confirmed(_) => "confirmed",
    }
  }

  /// No checkout surface beyond an optional product preview is open.
  pub fn is_idle(&self) -> bool {
    matches!(self, CheckoutStep::Browsing | CheckoutStep::Previewing(_))
  }

  /// Topics whose listeners live only while this step is current.
  pub(crate) fn scoped_topics(&self) -> &'static [Topic] {
    match self {
      CheckoutStep::BasketOpen => &[Topic::BasketChanged, Topic::RemoveFromBasket, Topic::ProceedToDelivery],
      CheckoutStep::DeliveryOpen => &[Topic::DeliveryEdited, Topic::ConfirmDelivery],
      CheckoutStep::ContactsOpen => &[Topic::ContactsEdited, Topic::ConfirmContacts],
      CheckoutStep::Confirmed(_) => &[Topic::AcknowledgeOrder],
      CheckoutStep::Browsing | CheckoutStep::Previewing(_) | CheckoutStep::Submitting => &[],
    }
  }
}

impl fmt::Display for CheckoutStep {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
