// kiosk/src/forms/delivery.rs

use serde::{Deserialize, Serialize};

use super::{filled, FormFields};
use crate::model::PaymentMethod;

/// Shipping half of an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryInfo {
  pub payment: Option<PaymentMethod>,
  pub address: String,
}

impl DeliveryInfo {
  pub fn new(payment: Option<PaymentMethod>, address: impl Into<String>) -> Self {
    Self {
      payment,
      address: address.into(),
    }
  }
}

impl FormFields for DeliveryInfo {
  const FORM: &'static str = "delivery";

  fn is_complete(&self) -> bool {
    self.payment.is_some() && filled(&self.address)
  }
}
