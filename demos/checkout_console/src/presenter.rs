// demos/checkout_console/src/presenter.rs

use kiosk::{Item, Presenter, Surface};
use tracing::{info, warn};

/// Renders every surface as a log line.
#[derive(Debug, Default)]
pub struct ConsolePresenter;

impl Presenter for ConsolePresenter {
  fn show(&self, surface: &Surface) {
    match surface {
      Surface::Preview { item, can_add } => {
        let price = item.price.map(|p| p.to_string()).unwrap_or_else(|| "priceless".to_string());
        info!(title = %item.title, %price, can_add, image = %item.image_ref, "[preview]");
      }
      Surface::Basket { lines, total, can_submit } => {
        for line in lines {
          info!(position = line.position, title = %line.item.title, price = %line.item.price_or_zero(), "[basket]");
        }
        info!(%total, can_submit, "[basket] total");
      }
      Surface::Delivery { info, can_submit } => {
        info!(payment = ?info.payment, address = %info.address, can_submit, "[delivery]");
      }
      Surface::Contacts { info, can_submit } => {
        info!(phone = %info.phone, email = %info.email, can_submit, "[contacts]");
      }
      Surface::Confirmation(confirmation) => {
        info!(order_id = %confirmation.id, total = %confirmation.total, "[confirmation] Order placed.");
      }
    }
  }

  fn close(&self) {
    info!("[overlay] closed");
  }

  fn submit_enabled(&self, enabled: bool) {
    info!(enabled, "[form] submit toggled");
  }

  fn catalog(&self, items: &[Item]) {
    info!(num_items = items.len(), "[gallery] catalog rendered");
  }

  fn basket_counter(&self, count: usize) {
    info!(count, "[header] basket counter");
  }

  fn notice(&self, message: &str) {
    warn!(%message, "[notice]");
  }
}
