// kiosk/src/broker/mod.rs

//! The publish/subscribe hub every component is wired through, and the closed
//! set of storefront events it carries.

pub mod bus;
pub mod event;

pub use bus::{Event, EventBroker, Handler, Subscription, SubscriptionId};
pub use event::{ShopEvent, Topic};

/// The broker specialised to storefront events.
pub type ShopBroker = EventBroker<ShopEvent>;
