// kiosk/src/gateway/scripted.rs

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{event, Level};

use super::StoreGateway;
use crate::error::{KioskError, KioskResult};
use crate::model::{Item, OrderConfirmation, OrderRequest};

/// How the scripted gateway answers the next order submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedReply {
  /// Accept with a generated id (`order-1`, `order-2`, ...).
  Accept,
  AcceptAs { id: String },
  /// Server-side rejection, surfaced as `KioskError::SubmissionFailed`.
  Reject(String),
  /// Unreachable server, surfaced as `KioskError::TransportFailure`.
  Offline(String),
}

/// In-memory `StoreGateway`.
///
/// Replies are consumed in order; once the script runs out every order is
/// accepted. Submitted orders are recorded for inspection.
#[derive(Debug, Default)]
pub struct ScriptedGateway {
  catalog: Mutex<Option<Vec<Item>>>,
  replies: Mutex<VecDeque<ScriptedReply>>,
  submitted: Mutex<Vec<OrderRequest>>,
  sequence: AtomicU64,
}

impl ScriptedGateway {
  pub fn new(catalog: Vec<Item>) -> Self {
    Self {
      catalog: Mutex::new(Some(catalog)),
      ..Self::default()
    }
  }

  /// A gateway whose catalog endpoint is unreachable.
  pub fn offline() -> Self {
    Self::default()
  }

  pub fn with_reply(self, reply: ScriptedReply) -> Self {
    self.push_reply(reply);
    self
  }

  pub fn push_reply(&self, reply: ScriptedReply) {
    self.replies.lock().push_back(reply);
  }

  pub fn submitted(&self) -> Vec<OrderRequest> {
    self.submitted.lock().clone()
  }
}

#[async_trait]
impl StoreGateway for ScriptedGateway {
  async fn fetch_catalog(&self) -> KioskResult<Vec<Item>> {
    self
      .catalog
      .lock()
      .clone()
      .ok_or_else(|| KioskError::transport("fetch_catalog", anyhow::anyhow!("catalog endpoint unreachable")))
  }

  async fn submit_order(&self, order: &OrderRequest) -> KioskResult<OrderConfirmation> {
    self.submitted.lock().push(order.clone());
    let reply = self.replies.lock().pop_front().unwrap_or(ScriptedReply::Accept);
    event!(Level::DEBUG, ?reply, "Scripted gateway answering order.");

    match reply {
      ScriptedReply::Accept => {
        let n = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(OrderConfirmation {
          id: format!("order-{}", n),
          total: order.total,
        })
      }
      ScriptedReply::AcceptAs { id } => Ok(OrderConfirmation { id, total: order.total }),
      ScriptedReply::Reject(reason) => Err(KioskError::SubmissionFailed { reason }),
      ScriptedReply::Offline(message) => Err(KioskError::transport("submit_order", anyhow::anyhow!(message))),
    }
  }
}
