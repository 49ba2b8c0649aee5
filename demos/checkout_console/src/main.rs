// demos/checkout_console/src/main.rs

mod presenter;

use crate::presenter::ConsolePresenter;

use kiosk::{
  attach_presenter, ContactInfo, DeliveryInfo, HttpGateway, Item, ItemId, KioskConfig, PaymentMethod,
  ScriptedGateway, ScriptedReply, ShopEvent, StoreGateway, Storefront,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

fn sample_items() -> Vec<Item> {
  let item = |id: &str, title: &str, image: &str, price: Option<Decimal>| Item {
    id: ItemId::new(id),
    title: title.to_string(),
    description: String::new(),
    image_ref: image.to_string(),
    category: "demo".to_string(),
    price,
  };
  vec![
    item("lamp", "Desk lamp", "/lamp.svg", Some(Decimal::new(2450, 2))),
    item("mug", "Coffee mug", "/mug.svg", Some(Decimal::new(750, 2))),
    item("poster", "Free poster", "/poster.svg", None),
  ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting checkout console...");
  let config = KioskConfig::from_env()?;

  // Talk to a real storefront API only when one is configured.
  let gateway: Arc<dyn StoreGateway> = if std::env::var("KIOSK_API_URL").is_ok() {
    tracing::info!(api = %config.api_base_url, "Using HTTP gateway.");
    Arc::new(HttpGateway::from_config(&config)?)
  } else {
    tracing::info!("KIOSK_API_URL not set, using the scripted gateway.");
    Arc::new(ScriptedGateway::new(sample_items()).with_reply(ScriptedReply::Reject("Card declined".to_string())))
  };

  let storefront = Storefront::new(&config, gateway);
  let _presenter = attach_presenter(storefront.broker(), Arc::new(ConsolePresenter));

  let loaded = storefront.load_catalog().await?;
  tracing::info!(loaded, "Catalog ready.");

  let purchasable: Vec<ItemId> = storefront
    .catalog()
    .items()
    .into_iter()
    .filter(|item| storefront.basket().accepts(item))
    .map(|item| item.id)
    .take(2)
    .collect();
  let (first_item, second_item) = match purchasable.as_slice() {
    [first, second, ..] => (first.clone(), second.clone()),
    _ => anyhow::bail!("The catalog needs at least two purchasable items for the walkthrough."),
  };

  let delivery = DeliveryInfo::new(Some(PaymentMethod::Card), "221b Baker Street");
  let contacts = ContactInfo::new("+44 20 7946 0000", "shopper@example.com");

  let walkthrough = vec![
    ShopEvent::ItemSelected(first_item.clone()),
    ShopEvent::AddToBasket(first_item),
    ShopEvent::AddToBasket(second_item),
    ShopEvent::OpenBasket,
    ShopEvent::RemoveFromBasket { position: 2 },
    ShopEvent::ProceedToDelivery,
    ShopEvent::DeliveryEdited(DeliveryInfo::new(None, "221b Baker Street")),
    ShopEvent::DeliveryEdited(delivery.clone()),
    ShopEvent::ConfirmDelivery(delivery),
    ShopEvent::ContactsEdited(contacts.clone()),
    ShopEvent::ConfirmContacts(contacts.clone()),
    // The scripted gateway declines the first attempt; retry from the contact form.
    ShopEvent::ConfirmContacts(contacts),
    ShopEvent::AcknowledgeOrder,
  ];

  for intent in walkthrough {
    match storefront.dispatch(intent).await {
      Ok(Some(confirmation)) => tracing::info!(order_id = %confirmation.id, "Checkout completed."),
      Ok(None) => {}
      Err(e) => tracing::warn!(error = %e, step = %storefront.checkout().step(), "Submission failed."),
    }
  }

  tracing::info!(
    step = %storefront.checkout().step(),
    basket = storefront.basket().count(),
    "Walkthrough finished."
  );
  Ok(())
}
