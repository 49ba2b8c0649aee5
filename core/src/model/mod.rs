// kiosk/src/model/mod.rs

//! Value types shared by the stores, the checkout and the gateway.

pub mod item;
pub mod order;

pub use item::{Item, ItemId};
pub use order::{OrderConfirmation, OrderRequest, PaymentMethod};
