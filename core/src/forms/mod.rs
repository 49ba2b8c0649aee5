// kiosk/src/forms/mod.rs

//! Delivery and contact details with self-validation.
//!
//! Validation is minimal: required fields must be non-blank and a
//! payment method must be selected. Email and phone formats are not checked.

pub mod contact;
pub mod delivery;

pub use contact::ContactInfo;
pub use delivery::DeliveryInfo;

use std::fmt::Debug;

/// A set of fields that can be validated as a whole.
pub trait FormFields: Debug + Clone + Default + PartialEq + Send + Sync + 'static {
  /// Name used in logs and in `KioskError::ValidationRejected`.
  const FORM: &'static str;

  fn is_complete(&self) -> bool;
}

/// Committed form values. Candidates are only applied when they validate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState<T: FormFields> {
  current: T,
}

impl<T: FormFields> FormState<T> {
  pub fn new() -> Self {
    Self { current: T::default() }
  }

  /// Pure check of `candidate`; no side effect.
  pub fn validate(&self, candidate: &T) -> bool {
    candidate.is_complete()
  }

  /// Applies `candidate` if it validates, otherwise leaves the state untouched.
  /// Returns whether the candidate was applied.
  pub fn commit(&mut self, candidate: T) -> bool {
    if !self.validate(&candidate) {
      tracing::debug!(form = T::FORM, "Candidate rejected, state unchanged.");
      return false;
    }
    self.current = candidate;
    true
  }

  pub fn clear(&mut self) {
    self.current = T::default();
  }

  pub fn current(&self) -> &T {
    &self.current
  }

  pub fn is_valid(&self) -> bool {
    self.current.is_complete()
  }
}

pub(crate) fn filled(value: &str) -> bool {
  !value.trim().is_empty()
}
