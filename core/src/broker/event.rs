// kiosk/src/broker/event.rs

//! `ShopEvent` is the closed set of events exchanged between surfaces, stores
//! and the checkout. `Topic` is its fieldless key.

use super::bus::Event;
use crate::checkout::Surface;
use crate::forms::{ContactInfo, DeliveryInfo};
use crate::model::{Item, ItemId, OrderRequest};
use crate::store::BasketSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub enum ShopEvent {
  // --- Store notifications ---
  /// The catalog was replaced or cleared.
  CatalogChanged(Vec<Item>),
  /// The catalog could not be fetched; surfaces should show `reason`.
  CatalogUnavailable { reason: String },
  /// The basket was mutated. Carries the state after the mutation.
  BasketChanged(BasketSnapshot),

  // --- Intents published by surfaces ---
  ItemSelected(ItemId),
  AddToBasket(ItemId),
  /// Removal by the 1-based position shown on screen.
  RemoveFromBasket { position: usize },
  OpenBasket,
  ProceedToDelivery,
  DeliveryEdited(DeliveryInfo),
  ConfirmDelivery(DeliveryInfo),
  ContactsEdited(ContactInfo),
  ConfirmContacts(ContactInfo),
  CloseSurface,
  AcknowledgeOrder,

  // --- Published by the checkout for surfaces to render ---
  /// Replaces whatever surface is currently shown.
  SurfaceShown(Surface),
  SurfaceClosed,
  /// Enables or disables the submit control of the current form.
  SubmitToggled { enabled: bool },
  PageLocked(bool),
  OrderSubmitting(OrderRequest),
  CheckoutFailed { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Topic {
  CatalogChanged,
  CatalogUnavailable,
  BasketChanged,
  ItemSelected,
  AddToBasket,
  RemoveFromBasket,
  OpenBasket,
  ProceedToDelivery,
  DeliveryEdited,
  ConfirmDelivery,
  ContactsEdited,
  ConfirmContacts,
  CloseSurface,
  AcknowledgeOrder,
  SurfaceShown,
  SurfaceClosed,
  SubmitToggled,
  PageLocked,
  OrderSubmitting,
  CheckoutFailed,
}

impl Topic {
  /// Topics that carry shopper intent rather than state notifications.
  pub fn is_intent(self) -> bool {
    matches!(
      self,
      Topic::ItemSelected
        | Topic::AddToBasket
        | Topic::RemoveFromBasket
        | Topic::OpenBasket
        | Topic::ProceedToDelivery
        | Topic::DeliveryEdited
        | Topic::ConfirmDelivery
        | Topic::ContactsEdited
        | Topic::ConfirmContacts
        | Topic::CloseSurface
        | Topic::AcknowledgeOrder
    )
  }
}

impl Event for ShopEvent {
  type Topic = Topic;

  fn topic(&self) -> Topic {
    match self {
      ShopEvent::CatalogChanged(_) => Topic::CatalogChanged,
      ShopEvent::CatalogUnavailable { .. } => Topic::CatalogUnavailable,
      ShopEvent::BasketChanged(_) => Topic::BasketChanged,
      ShopEvent::ItemSelected(_) => Topic::ItemSelected,
      ShopEvent::AddToBasket(_) => Topic::AddToBasket,
      ShopEvent::RemoveFromBasket { .. } => Topic::RemoveFromBasket,
      ShopEvent::OpenBasket => Topic::OpenBasket,
      ShopEvent::ProceedToDelivery => Topic::ProceedToDelivery,
      ShopEvent::DeliveryEdited(_) => Topic::DeliveryEdited,
      ShopEvent::ConfirmDelivery(_) => Topic::ConfirmDelivery,
      ShopEvent::ContactsEdited(_) => Topic::ContactsEdited,
      ShopEvent::ConfirmContacts(_) => Topic::ConfirmContacts,
      ShopEvent::CloseSurface => Topic::CloseSurface,
      ShopEvent::AcknowledgeOrder => Topic::AcknowledgeOrder,
      ShopEvent::SurfaceShown(_) => Topic::SurfaceShown,
      ShopEvent::SurfaceClosed => Topic::SurfaceClosed,
      ShopEvent::SubmitToggled { .. } => Topic::SubmitToggled,
      ShopEvent::PageLocked(_) => Topic::PageLocked,
      ShopEvent::OrderSubmitting(_) => Topic::OrderSubmitting,
      ShopEvent::CheckoutFailed { .. } => Topic::CheckoutFailed,
    }
  }
}
