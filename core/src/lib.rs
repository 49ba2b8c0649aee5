// kiosk/src/lib.rs

//! Kiosk: an event-brokered storefront core for Rust.
//!
//! Every component talks through one publish/subscribe broker:
//!  - Stores for the catalog and the basket announce each mutation.
//!  - Presentation surfaces publish intents and render what the checkout shows.
//!  - The checkout is a gated state machine (basket, delivery, contacts,
//!    submission, confirmation) whose per-step listeners live only as long as
//!    the step.
//!  - Order submission goes through an async `StoreGateway`.

pub mod assets;
pub mod broker;
pub mod checkout;
pub mod config;
pub mod error;
pub mod forms;
pub mod gateway;
pub mod model;
pub mod order;
pub mod store;
pub mod storefront;

// --- Re-exports for the Public API ---

pub use crate::broker::{Event, EventBroker, ShopBroker, ShopEvent, Subscription, SubscriptionId, Topic};
pub use crate::model::{Item, ItemId, OrderConfirmation, OrderRequest, PaymentMethod};
pub use crate::store::{AddOutcome, BasketSnapshot, BasketStore, CatalogStore, PricelessPolicy};
pub use crate::forms::{ContactInfo, DeliveryInfo, FormFields, FormState};
pub use crate::order::OrderAssembler;
pub use crate::checkout::{attach_presenter, BasketLine, Checkout, CheckoutStep, Presenter, Surface};
pub use crate::gateway::{HttpGateway, ScriptedGateway, ScriptedReply, StoreGateway};
pub use crate::assets::{AssetResolver, ExtensionRewrite};
pub use crate::config::KioskConfig;
pub use crate::storefront::Storefront;

pub use crate::error::{KioskError, KioskResult};
