// tests/config_tests.rs
mod common;

use common::*;
use kiosk::{ExtensionRewrite, KioskConfig, KioskError, PricelessPolicy};
use serial_test::serial;
use std::collections::HashMap;
use std::time::Duration;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
  let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
  move |name: &str| vars.get(name).cloned()
}

#[test]
fn test_defaults_apply_when_nothing_is_set() {
  let config = KioskConfig::from_lookup(|_| None).expect("defaults should be valid");

  assert_eq!(config.api_base_url, "http://localhost:3000/api/weblarek");
  assert_eq!(config.image_rewrite, Some(ExtensionRewrite::new("svg", "png")));
  assert_eq!(config.request_timeout, Duration::from_secs(15));
  assert_eq!(config.priceless_policy, PricelessPolicy::Reject);
}

#[test]
fn test_values_are_read_through_lookup() {
  let config = KioskConfig::from_lookup(lookup_from(&[
    ("KIOSK_API_URL", "https://shop.test/api"),
    ("KIOSK_ASSET_URL", "https://shop.test/content"),
    ("KIOSK_IMAGE_REWRITE", "none"),
    ("KIOSK_REQUEST_TIMEOUT_SECS", "3"),
    ("KIOSK_PRICELESS_POLICY", "Zero"),
  ]))
  .expect("config should parse");

  assert_eq!(config.api_base_url, "https://shop.test/api");
  assert_eq!(config.asset_base_url, "https://shop.test/content");
  assert_eq!(config.image_rewrite, None);
  assert_eq!(config.request_timeout, Duration::from_secs(3));
  assert_eq!(config.priceless_policy, PricelessPolicy::CountAsZero);
  assert_eq!(config.asset_resolver().resolve("x.svg"), "https://shop.test/content/x.svg");
}

#[test]
fn test_invalid_values_are_configuration_errors() {
  for (name, value) in [
    ("KIOSK_REQUEST_TIMEOUT_SECS", "soon"),
    ("KIOSK_PRICELESS_POLICY", "maybe"),
    ("KIOSK_IMAGE_REWRITE", "svg"),
  ] {
    let result = KioskConfig::from_lookup(lookup_from(&[(name, value)]));
    assert!(
      matches!(result, Err(KioskError::Configuration { .. })),
      "{}={} should be rejected, got {:?}",
      name,
      value,
      result
    );
  }
}

#[test]
#[serial]
fn test_from_env_reads_process_environment() {
  setup_tracing();
  std::env::set_var("KIOSK_API_URL", "http://env.test/api");
  std::env::set_var("KIOSK_IMAGE_REWRITE", "webp:jpg");
  let config = KioskConfig::from_env();
  std::env::remove_var("KIOSK_API_URL");
  std::env::remove_var("KIOSK_IMAGE_REWRITE");

  let config = config.expect("environment config should parse");
  assert_eq!(config.api_base_url, "http://env.test/api");
  assert_eq!(config.image_rewrite, Some(ExtensionRewrite::new(".webp", ".jpg")));
}
