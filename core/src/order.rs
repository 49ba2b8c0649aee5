// kiosk/src/order.rs

//! Turns the basket and the committed forms into an `OrderRequest`.

use crate::error::{KioskError, KioskResult};
use crate::forms::{ContactInfo, DeliveryInfo, FormFields};
use crate::model::OrderRequest;
use crate::store::BasketSnapshot;

/// Pure constructor for order payloads.
///
/// The assembler does not check that the basket is non-empty; the checkout
/// guards that before calling it.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderAssembler;

impl OrderAssembler {
  /// Fails only when no payment method has been selected.
  pub fn assemble(
    basket: &BasketSnapshot,
    delivery: &DeliveryInfo,
    contact: &ContactInfo,
  ) -> KioskResult<OrderRequest> {
    let payment = delivery.payment.ok_or(KioskError::ValidationRejected {
      form: DeliveryInfo::FORM,
    })?;

    Ok(OrderRequest {
      payment,
      address: delivery.address.clone(),
      phone: contact.phone.clone(),
      email: contact.email.clone(),
      total: basket.total,
      items: basket.item_ids(),
    })
  }
}
