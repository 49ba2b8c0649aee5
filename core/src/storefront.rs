// kiosk/src/storefront.rs

//! Defines `Storefront`, the composition root. It owns the single broker and
//! hands it to every component it builds.
//!
//! Order submission is driven from the broker: when the checkout announces
//! `OrderSubmitting`, the storefront spawns the gateway call on the runtime it
//! was built in. Surfaces that only publish intents therefore complete a
//! checkout without calling into the storefront.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{event, instrument, Level};

use crate::assets::AssetResolver;
use crate::broker::{Event, ShopBroker, ShopEvent, Subscription, Topic};
use crate::checkout::Checkout;
use crate::config::KioskConfig;
use crate::error::{KioskError, KioskResult};
use crate::gateway::StoreGateway;
use crate::model::{Item, OrderConfirmation};
use crate::store::{BasketStore, CatalogStore};

type Submission = JoinHandle<KioskResult<Option<OrderConfirmation>>>;

pub struct Storefront {
  broker: Arc<ShopBroker>,
  catalog: Arc<CatalogStore>,
  basket: Arc<BasketStore>,
  checkout: Checkout,
  gateway: Arc<dyn StoreGateway>,
  assets: AssetResolver,
  in_flight: Arc<Mutex<Option<Submission>>>,
  _submitter: Option<Subscription<ShopEvent>>,
}

impl Storefront {
  /// Wires a fresh broker, both stores and the checkout around `gateway`.
  ///
  /// When called inside a tokio runtime, submissions are spawned on it as
  /// soon as the checkout queues them. Outside a runtime they run only when
  /// [`dispatch`](Self::dispatch) or [`settled`](Self::settled) is awaited.
  pub fn new(config: &KioskConfig, gateway: Arc<dyn StoreGateway>) -> Self {
    Self::build(config, gateway, Handle::try_current().ok())
  }

  /// Like [`new`](Self::new), spawning submissions on `runtime`.
  pub fn with_runtime(config: &KioskConfig, gateway: Arc<dyn StoreGateway>, runtime: Handle) -> Self {
    Self::build(config, gateway, Some(runtime))
  }

  fn build(config: &KioskConfig, gateway: Arc<dyn StoreGateway>, runtime: Option<Handle>) -> Self {
    let broker = Arc::new(ShopBroker::new());
    let catalog = Arc::new(CatalogStore::new(Arc::clone(&broker)));
    let basket = Arc::new(BasketStore::new(Arc::clone(&broker), config.priceless_policy));
    let checkout = Checkout::new(
      Arc::clone(&broker),
      Arc::clone(&catalog),
      Arc::clone(&basket),
      Arc::clone(&gateway),
    );
    let in_flight: Arc<Mutex<Option<Submission>>> = Arc::new(Mutex::new(None));

    let submitter = runtime.map(|runtime| {
      let checkout = checkout.clone();
      let in_flight = Arc::clone(&in_flight);
      broker.subscribe_scoped(Topic::OrderSubmitting, move |_: &ShopEvent| {
        let checkout = checkout.clone();
        let task = runtime.spawn(async move { checkout.settle().await });
        *in_flight.lock() = Some(task);
      })
    });
    event!(
      Level::DEBUG,
      policy = ?config.priceless_policy,
      spawns_submissions = submitter.is_some(),
      "Storefront assembled."
    );

    Self {
      broker,
      catalog,
      basket,
      checkout,
      gateway,
      assets: config.asset_resolver(),
      in_flight,
      _submitter: submitter,
    }
  }

  pub fn broker(&self) -> &Arc<ShopBroker> {
    &self.broker
  }

  pub fn catalog(&self) -> &Arc<CatalogStore> {
    &self.catalog
  }

  pub fn basket(&self) -> &Arc<BasketStore> {
    &self.basket
  }

  pub fn checkout(&self) -> &Checkout {
    &self.checkout
  }

  /// Fetches the catalog, resolves image references and loads it.
  ///
  /// On failure `CatalogUnavailable` is published, the catalog keeps its
  /// previous content and the error is returned.
  #[instrument(name = "Storefront::load_catalog", skip_all, err(Display))]
  pub async fn load_catalog(&self) -> KioskResult<usize> {
    match self.gateway.fetch_catalog().await {
      Ok(items) => {
        let items: Vec<Item> = items.into_iter().map(|item| self.assets.resolve_item(item)).collect();
        let loaded = items.len();
        self.catalog.load(items);
        event!(Level::INFO, loaded, "Catalog loaded.");
        Ok(loaded)
      }
      Err(e) => {
        event!(Level::ERROR, error = %e, "Catalog could not be fetched.");
        self.broker.publish(ShopEvent::CatalogUnavailable {
          reason: e.user_message(),
        });
        Err(e)
      }
    }
  }

  /// Publishes `intent`, then waits for any order the intent queued.
  ///
  /// Returns the confirmation when the intent completed a submission.
  pub async fn dispatch(&self, intent: ShopEvent) -> KioskResult<Option<OrderConfirmation>> {
    let topic = intent.topic();
    if !topic.is_intent() {
      event!(Level::WARN, ?topic, "Dispatching an event that is not a shopper intent.");
    }
    let handled = self.broker.publish(intent);
    event!(Level::TRACE, ?topic, handled, "Intent dispatched.");
    self.settled().await
  }

  /// Waits for the submission spawned by the last `OrderSubmitting`, or
  /// submits a queued order directly when none was spawned.
  pub async fn settled(&self) -> KioskResult<Option<OrderConfirmation>> {
    let spawned = self.in_flight.lock().take();
    match spawned {
      Some(task) => task.await.map_err(|e| KioskError::Internal(format!("Order submission task failed: {}", e)))?,
      None => self.checkout.settle().await,
    }
  }
}
