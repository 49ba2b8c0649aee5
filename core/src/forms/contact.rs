// kiosk/src/forms/contact.rs

use serde::{Deserialize, Serialize};

use super::{filled, FormFields};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
  pub phone: String,
  pub email: String,
}

impl ContactInfo {
  pub fn new(phone: impl Into<String>, email: impl Into<String>) -> Self {
    Self {
      phone: phone.into(),
      email: email.into(),
    }
  }
}

impl FormFields for ContactInfo {
  const FORM: &'static str = "contacts";

  fn is_complete(&self) -> bool {
    filled(&self.phone) && filled(&self.email)
  }
}
