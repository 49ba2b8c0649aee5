// kiosk/src/checkout/mod.rs

//! The checkout orchestrator: a gated state machine driven by broker events.
//!
//! Surfaces publish intents; the orchestrator decides which surface is shown
//! next, validates form candidates, queues the assembled order and applies the
//! gateway's answer. Listeners that only make sense in one step are subscribed
//! when the step is entered and released when it is left.

pub mod orchestrator;
pub mod step;
pub mod surface;

pub use orchestrator::Checkout;
pub use step::CheckoutStep;
pub use surface::{attach_presenter, BasketLine, Presenter, Surface};
