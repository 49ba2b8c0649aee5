// tests/forms_and_order_tests.rs
mod common;

use common::*;
use kiosk::{
  BasketStore, ContactInfo, DeliveryInfo, FormState, ItemId, KioskError, OrderAssembler, PaymentMethod,
  PricelessPolicy, ShopBroker,
};
use rust_decimal_macros::dec;
use std::sync::Arc;

#[test]
fn test_delivery_validation_requires_payment_and_address() {
  let form = FormState::<DeliveryInfo>::new();

  assert!(!form.validate(&DeliveryInfo::default()));
  assert!(!form.validate(&DeliveryInfo::new(None, "Baker St 221b")));
  assert!(!form.validate(&DeliveryInfo::new(Some(PaymentMethod::Card), "   ")));
  assert!(form.validate(&DeliveryInfo::new(Some(PaymentMethod::Cash), "Baker St 221b")));
}

#[test]
fn test_contact_validation_requires_phone_and_email() {
  let form = FormState::<ContactInfo>::new();

  assert!(!form.validate(&ContactInfo::new("", "a@b.c")));
  assert!(!form.validate(&ContactInfo::new("+100", "")));
  // Formats are not checked.
  assert!(form.validate(&ContactInfo::new("x", "y")));
}

#[test]
fn test_commit_applies_only_valid_candidates() {
  let mut form = FormState::<ContactInfo>::new();
  let valid = ContactInfo::new("+100", "a@b.c");

  assert!(!form.commit(ContactInfo::new("+100", "")));
  assert_eq!(form.current(), &ContactInfo::default());
  assert!(!form.is_valid());

  assert!(form.commit(valid.clone()));
  assert_eq!(form.current(), &valid);
  assert!(form.is_valid());

  // A rejected candidate leaves the committed values alone.
  assert!(!form.commit(ContactInfo::default()));
  assert_eq!(form.current(), &valid);

  form.clear();
  assert_eq!(form.current(), &ContactInfo::default());
}

#[test]
fn test_assembler_snapshots_basket_and_forms() {
  setup_tracing();
  let broker = Arc::new(ShopBroker::new());
  let basket = BasketStore::new(Arc::clone(&broker), PricelessPolicy::Reject);
  basket.add(item_b());
  basket.add(item_a());

  let delivery = DeliveryInfo::new(Some(PaymentMethod::Card), "Baker St 221b");
  let contact = ContactInfo::new("+100", "a@b.c");
  let order = OrderAssembler::assemble(&basket.snapshot(), &delivery, &contact);

  let order = match order {
    Ok(order) => order,
    Err(e) => panic!("assembly failed: {}", e),
  };
  assert_eq!(order.items, vec![ItemId::new("B"), ItemId::new("A")]);
  assert_eq!(order.total, dec!(300));
  assert_eq!(order.payment, PaymentMethod::Card);
  assert_eq!(order.address, "Baker St 221b");
  assert_eq!(order.phone, "+100");
  assert_eq!(order.email, "a@b.c");
}

#[test]
fn test_assembler_rejects_missing_payment() {
  let broker = Arc::new(ShopBroker::new());
  let basket = BasketStore::new(broker, PricelessPolicy::Reject);
  basket.add(item_a());

  let result = OrderAssembler::assemble(
    &basket.snapshot(),
    &DeliveryInfo::new(None, "Baker St 221b"),
    &ContactInfo::new("+100", "a@b.c"),
  );

  assert!(matches!(result, Err(KioskError::ValidationRejected { form: "delivery" })));
}

#[test]
fn test_order_request_wire_format() {
  let broker = Arc::new(ShopBroker::new());
  let basket = BasketStore::new(broker, PricelessPolicy::Reject);
  basket.add(item_a());
  let order = OrderAssembler::assemble(
    &basket.snapshot(),
    &DeliveryInfo::new(Some(PaymentMethod::Cash), "Baker St 221b"),
    &ContactInfo::new("+100", "a@b.c"),
  )
  .expect("assembly should succeed");

  let json = serde_json::to_value(&order).expect("order should serialize");

  assert_eq!(json["payment"], "cash");
  assert_eq!(json["items"], serde_json::json!(["A"]));
  assert_eq!(json["total"].as_f64(), Some(100.0));
}
