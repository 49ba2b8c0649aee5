// kiosk/src/model/order.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ItemId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
  Card,
  Cash,
}

impl fmt::Display for PaymentMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PaymentMethod::Card => f.write_str("card"),
      PaymentMethod::Cash => f.write_str("cash"),
    }
  }
}

/// Snapshot submitted to the order endpoint. Built once per submission
/// attempt by [`OrderAssembler`](crate::OrderAssembler).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
  pub payment: PaymentMethod,
  pub address: String,
  pub phone: String,
  pub email: String,
  pub total: Decimal,
  pub items: Vec<ItemId>,
}

/// Acknowledgement returned by the order endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfirmation {
  pub id: String,
  pub total: Decimal,
}
