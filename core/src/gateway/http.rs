// kiosk/src/gateway/http.rs

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{event, instrument, Level};

use super::StoreGateway;
use crate::config::KioskConfig;
use crate::error::{KioskError, KioskResult};
use crate::model::{Item, OrderConfirmation, OrderRequest};

#[derive(Debug, Deserialize)]
struct ProductList {
  items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
  error: String,
}

/// `StoreGateway` over the storefront's JSON API:
/// `GET {api}/product` and `POST {api}/order`.
#[derive(Debug, Clone)]
pub struct HttpGateway {
  client: reqwest::Client,
  api_base: String,
}

impl HttpGateway {
  pub fn new(api_base: impl Into<String>, timeout: Duration) -> KioskResult<Self> {
    let client = reqwest::Client::builder()
      .timeout(timeout)
      .build()
      .map_err(|e| KioskError::transport("http client setup", e))?;
    Ok(Self {
      client,
      api_base: api_base.into(),
    })
  }

  pub fn from_config(config: &KioskConfig) -> KioskResult<Self> {
    Self::new(config.api_base_url.clone(), config.request_timeout)
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.api_base.trim_end_matches('/'), path)
  }
}

#[async_trait]
impl StoreGateway for HttpGateway {
  #[instrument(name = "HttpGateway::fetch_catalog", skip_all, fields(api = %self.api_base), err(Display))]
  async fn fetch_catalog(&self) -> KioskResult<Vec<Item>> {
    let response = self
      .client
      .get(self.url("/product"))
      .send()
      .await
      .and_then(reqwest::Response::error_for_status)
      .map_err(|e| KioskError::transport("fetch_catalog", e))?;

    let list: ProductList = response
      .json()
      .await
      .map_err(|e| KioskError::transport("fetch_catalog (decode)", e))?;
    event!(Level::DEBUG, num_items = list.items.len(), "Catalog fetched.");
    Ok(list.items)
  }

  #[instrument(
    name = "HttpGateway::submit_order",
    skip_all,
    fields(api = %self.api_base, num_items = order.items.len(), total = %order.total),
    err(Display)
  )]
  async fn submit_order(&self, order: &OrderRequest) -> KioskResult<OrderConfirmation> {
    let response = self
      .client
      .post(self.url("/order"))
      .json(order)
      .send()
      .await
      .map_err(|e| KioskError::transport("submit_order", e))?;

    let status = response.status();
    if status.is_success() {
      let confirmation: OrderConfirmation = response
        .json()
        .await
        .map_err(|e| KioskError::transport("submit_order (decode)", e))?;
      event!(Level::INFO, order_id = %confirmation.id, "Order accepted.");
      return Ok(confirmation);
    }

    let body = match response.text().await {
      Ok(body) => body,
      Err(e) => {
        event!(Level::DEBUG, error = %e, %status, "Order rejection body could not be read.");
        String::new()
      }
    };
    Err(rejection(status, &body))
  }
}

/// Maps a non-success answer of the order endpoint to the crate error.
///
/// Client errors are rejections of the order itself; anything else means the
/// store could not process it. The reason comes from the `{ error }` body when
/// there is one.
fn rejection(status: StatusCode, body: &str) -> KioskError {
  let reason = serde_json::from_str::<ErrorBody>(body)
    .map(|b| b.error)
    .unwrap_or_else(|_| format!("HTTP {}", status));

  if status.is_client_error() {
    KioskError::SubmissionFailed { reason }
  } else {
    KioskError::transport(
      "submit_order",
      anyhow::anyhow!("server responded {}: {}", status, reason),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  #[test]
  fn test_client_error_with_body_is_a_rejection() {
    match rejection(StatusCode::BAD_REQUEST, r#"{"error":"Wrong total"}"#) {
      KioskError::SubmissionFailed { reason } => assert_eq!(reason, "Wrong total"),
      other => panic!("Expected SubmissionFailed, got {:?}", other),
    }
  }

  #[test]
  fn test_client_error_without_body_reports_status() {
    match rejection(StatusCode::UNPROCESSABLE_ENTITY, "not json") {
      KioskError::SubmissionFailed { reason } => assert_eq!(reason, "HTTP 422 Unprocessable Entity"),
      other => panic!("Expected SubmissionFailed, got {:?}", other),
    }
  }

  #[test]
  fn test_server_error_is_a_transport_failure() {
    let err = rejection(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"db down"}"#);
    match &err {
      KioskError::TransportFailure { operation, source } => {
        assert_eq!(*operation, "submit_order");
        assert!(source.to_string().contains("db down"));
      }
      other => panic!("Expected TransportFailure, got {:?}", other),
    }
    assert_eq!(err.user_message(), "The store could not be reached. Please try again.");
  }

  #[test]
  fn test_product_list_decodes_storefront_payload() {
    let payload = r#"{
      "total": 2,
      "items": [
        {"id": "c101", "title": "Lamp", "description": "Warm light", "image": "/lamp.svg",
         "category": "home", "price": 750},
        {"id": "c102", "title": "Poster", "description": "", "image": "/poster.svg",
         "category": "other", "price": null}
      ]
    }"#;

    let list: ProductList = serde_json::from_str(payload).expect("payload should decode");

    assert_eq!(list.items.len(), 2);
    assert_eq!(list.items[0].price, Some(dec!(750)));
    assert_eq!(list.items[0].image_ref, "/lamp.svg");
    assert!(list.items[1].is_priceless());
  }
}
