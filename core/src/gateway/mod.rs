// kiosk/src/gateway/mod.rs

//! The network collaborator: catalog retrieval and order submission.
//!
//! The checkout only sees the `StoreGateway` contract. `HttpGateway` talks to the
//! storefront API; `ScriptedGateway` answers from memory for tests and demos.

pub mod http;
pub mod scripted;

pub use http::HttpGateway;
pub use scripted::{ScriptedGateway, ScriptedReply};

use async_trait::async_trait;

use crate::error::KioskResult;
use crate::model::{Item, OrderConfirmation, OrderRequest};

#[async_trait]
pub trait StoreGateway: Send + Sync {
  /// Fetches the full catalog. Image references are returned as the server
  /// sends them; the storefront resolves them.
  ///
  /// Fails with `KioskError::TransportFailure` on network or parse errors.
  async fn fetch_catalog(&self) -> KioskResult<Vec<Item>>;

  /// Submits an order.
  ///
  /// Fails with `KioskError::SubmissionFailed` when the server rejects the order
  /// and with `KioskError::TransportFailure` when it cannot be reached.
  async fn submit_order(&self, order: &OrderRequest) -> KioskResult<OrderConfirmation>;
}
