// kiosk/src/store/mod.rs

//! Stores own their item collections and announce every mutation on the broker
//! once it is fully applied.

pub mod basket;
pub mod catalog;

pub use basket::{AddOutcome, BasketSnapshot, BasketStore, PricelessPolicy};
pub use catalog::CatalogStore;
