// kiosk/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

use crate::model::ItemId;

#[derive(Debug, Error)]
pub enum KioskError {
  #[error("Item not found: {id}")]
  NotFound { id: ItemId },

  /// Local field validation failed. The checkout never raises this across the
  /// broker; it surfaces as a disabled submit control instead.
  #[error("Validation rejected for the {form} form")]
  ValidationRejected { form: &'static str },

  #[error("Order submission rejected: {reason}")]
  SubmissionFailed { reason: String },

  #[error("Transport failure during {operation}. Source: {source}")]
  TransportFailure {
    operation: &'static str,
    #[source]
    source: AnyhowError,
  },

  #[error("Configuration error: {message}")]
  Configuration { message: String },

  #[error("Internal kiosk error: {0}")]
  Internal(String),
}

impl KioskError {
  pub(crate) fn transport(operation: &'static str, source: impl Into<AnyhowError>) -> Self {
    KioskError::TransportFailure {
      operation,
      source: source.into(),
    }
  }

  /// Message suitable for showing to the shopper.
  pub fn user_message(&self) -> String {
    match self {
      KioskError::SubmissionFailed { reason } => format!("The order was not accepted: {}", reason),
      KioskError::TransportFailure { .. } => "The store could not be reached. Please try again.".to_string(),
      other => other.to_string(),
    }
  }
}

impl From<AnyhowError> for KioskError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<KioskError>() {
      Ok(kiosk_err) => kiosk_err,
      Err(err) => KioskError::Internal(format!("{:#}", err)),
    }
  }
}

pub type KioskResult<T, E = KioskError> = std::result::Result<T, E>;
